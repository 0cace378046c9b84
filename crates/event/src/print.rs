//! Text listings of an event
//!
//! Two `Display` wrappers:
//! - [`Listing`]: vertex-by-vertex table with incoming (`I:`) and outgoing
//!   (`O:`) particles, momenta in scientific notation
//! - [`Content`]: flat dump of weights, attribute keys, particles and
//!   vertices, one line each

use crate::event::Event;
use crate::particle::ParticleRef;
use crate::vertex::VertexRef;
use std::fmt;

const RULE: &str =
    "________________________________________________________________________";

/// Vertex-by-vertex table of an event
pub struct Listing<'a> {
    event: &'a Event,
    precision: usize,
}

impl<'a> Listing<'a> {
    /// Listing with two significant decimals
    pub fn new(event: &'a Event) -> Self {
        Self {
            event,
            precision: 2,
        }
    }

    /// Set the number of decimals of momenta
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn particle_line(&self, f: &mut fmt::Formatter<'_>, p: &ParticleRef<'_>) -> fmt::Result {
        let m = p.momentum();
        let prec = self.precision;
        write!(
            f,
            " {:>6}{:>9} {:>+9.prec$e},{:>+9.prec$e},{:>+9.prec$e},{:>+9.prec$e} {:>3}",
            p.id().get(),
            p.pid(),
            m.px(),
            m.py(),
            m.pz(),
            m.e(),
            p.status(),
        )?;
        writeln!(f, "{:>6}", p.production_vertex_id().get())
    }

    fn vertex_block(&self, f: &mut fmt::Formatter<'_>, v: &VertexRef<'_>) -> fmt::Result {
        write!(f, "Vtx: {:>6} stat: {:>3}", v.id().get(), v.status())?;
        let pos = v.position();
        if pos.is_zero() {
            writeln!(f, " (X,cT): 0")?;
        } else {
            writeln!(f, " (X,cT): {} {} {} {}", pos.x(), pos.y(), pos.z(), pos.t())?;
        }
        for (i, p) in v.particles_in().enumerate() {
            f.write_str(if i == 0 { " I: " } else { "    " })?;
            self.particle_line(f, &p)?;
        }
        for (i, p) in v.particles_out().enumerate() {
            f.write_str(if i == 0 { " O: " } else { "    " })?;
            self.particle_line(f, &p)?;
        }
        Ok(())
    }
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let event = self.event;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Event: #{}", event.event_number())?;
        writeln!(
            f,
            " Momentum units: {} Position units: {}",
            event.momentum_unit(),
            event.length_unit()
        )?;
        writeln!(
            f,
            " Entries in this event: {} vertices, {} particles, {} weights.",
            event.vertex_count(),
            event.particle_count(),
            event.weights().len()
        )?;
        let pos = event.event_pos();
        writeln!(
            f,
            " Position offset: {}, {}, {}, {}",
            pos.x(),
            pos.y(),
            pos.z(),
            pos.t()
        )?;
        writeln!(f, "                                    Particle Legend")?;
        writeln!(
            f,
            "         ID    PDG ID   ( px,       py,       pz,     E )   Stat ProdVtx"
        )?;
        writeln!(f, "{}", RULE)?;
        for vertex in event.vertices() {
            self.vertex_block(f, &vertex)?;
        }
        writeln!(f, "{}", RULE)
    }
}

/// Flat dump of everything an event holds
pub struct Content<'a>(pub &'a Event);

impl fmt::Display for Content<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let event = self.0;
        writeln!(f, "--------------------------------")?;
        writeln!(f, "--------- EVENT CONTENT --------")?;
        writeln!(f, "--------------------------------")?;
        writeln!(f)?;

        writeln!(f, "Weights ({}):", event.weights().len())?;
        for w in event.weights() {
            write!(f, " {}", w)?;
        }
        writeln!(f)?;

        writeln!(f, "Attributes:")?;
        for (name, owner, _) in event.attributes.lock().iter() {
            writeln!(f, "{}: {}", owner, name)?;
        }

        writeln!(f, "Particles ({})", event.particle_count())?;
        for p in event.particles() {
            let m = p.momentum();
            writeln!(
                f,
                "Particle: {:>3} PDGID: {:>5} (P,E)={:+.2e},{:+.2e},{:+.2e},{:+.2e} Stat: {} PV: {} EV: {}",
                p.id().get(),
                p.pid(),
                m.px(),
                m.py(),
                m.pz(),
                m.e(),
                p.status(),
                p.production_vertex_id().get(),
                p.end_vertex_id().map_or(0, |v| v.get()),
            )?;
        }

        writeln!(f, "Vertices ({})", event.vertex_count())?;
        for v in event.vertices() {
            let pos = v.position();
            writeln!(
                f,
                "Vertex: {:>4} stat: {:>3} in: {} out: {} has_set_position: {} (X,cT): {}, {}, {}, {}",
                v.id().get(),
                v.status(),
                v.particles_in_size(),
                v.particles_out_size(),
                v.has_set_position(),
                pos.x(),
                pos.y(),
                pos.z(),
                pos.t(),
            )?;
        }
        writeln!(f, "-----------------------------")
    }
}

impl Event {
    /// Vertex-by-vertex table, see [`Listing`]
    pub fn listing(&self) -> Listing<'_> {
        Listing::new(self)
    }

    /// Flat dump, see [`Content`]
    pub fn content(&self) -> Content<'_> {
        Content(self)
    }
}
