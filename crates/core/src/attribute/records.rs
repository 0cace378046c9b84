//! Structured physics records carried as attributes
//!
//! Each record has a whitespace-separated string form used by every
//! on-disk format:
//!
//! | Record | String form |
//! |--------|-------------|
//! | `CrossSection` | `xs0 err0 accepted attempted [xs_i err_i]...` |
//! | `HeavyIon` | 9 integers followed by 5 reals |
//! | `PdfInfo` | `id1 id2 x1 x2 scale xf1 xf2 [pdf_id1 pdf_id2]` |
//! | `AssociatedParticle` | particle id |

use super::{format_real, AttributeContext, AttributeKind};
use crate::error::{Error, Result};
use crate::ids::ParticleId;
use crate::run_info::RunInfo;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A structured attribute payload with its own string codec
pub trait AttributeRecord: Sized {
    /// Discriminant of the record in [`AttributeValue`](super::AttributeValue)
    const KIND: AttributeKind;

    /// Parse from the string form
    fn parse(input: &str) -> Result<Self>;

    /// Produce the string form; fails when the record has none
    fn format(&self) -> Result<String>;

    /// Contextual initialization after a successful parse
    fn init(self, _ctx: &AttributeContext<'_>) -> Result<Self> {
        Ok(self)
    }
}

fn field<T: FromStr>(token: Option<&str>, kind: AttributeKind, input: &str) -> Result<T> {
    token
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| Error::AttributeParse {
            kind,
            input: input.to_string(),
        })
}

// ============================================================================
// Cross section
// ============================================================================

/// Generator cross section, one value/error pair per event weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    /// Cross section per weight
    pub cross_sections: Vec<f64>,
    /// Cross-section uncertainty per weight
    pub cross_section_errors: Vec<f64>,
    /// Number of accepted events (-1 if unknown)
    pub accepted_events: i64,
    /// Number of attempted events (-1 if unknown)
    pub attempted_events: i64,
}

impl Default for CrossSection {
    fn default() -> Self {
        Self {
            cross_sections: Vec::new(),
            cross_section_errors: Vec::new(),
            accepted_events: -1,
            attempted_events: -1,
        }
    }
}

impl CrossSection {
    /// Single-weight cross section with unknown event counts
    pub fn new(cross_section: f64, error: f64) -> Self {
        Self {
            cross_sections: vec![cross_section],
            cross_section_errors: vec![error],
            ..Self::default()
        }
    }

    /// Replace all entries with a single value/error pair and event counts
    pub fn set_cross_section(&mut self, cross_section: f64, error: f64, accepted: i64, attempted: i64) {
        self.cross_sections = vec![cross_section];
        self.cross_section_errors = vec![error];
        self.accepted_events = accepted;
        self.attempted_events = attempted;
    }

    /// Cross section of weight `index`
    pub fn xsec(&self, index: usize) -> Option<f64> {
        self.cross_sections.get(index).copied()
    }

    /// Cross-section error of weight `index`
    pub fn xsec_err(&self, index: usize) -> Option<f64> {
        self.cross_section_errors.get(index).copied()
    }

    /// Cross section of the weight called `name` in `run`
    pub fn xsec_named(&self, name: &str, run: &RunInfo) -> Option<f64> {
        run.weight_index(name).and_then(|i| self.xsec(i))
    }

    /// Cross-section error of the weight called `name` in `run`
    pub fn xsec_err_named(&self, name: &str, run: &RunInfo) -> Option<f64> {
        run.weight_index(name).and_then(|i| self.xsec_err(i))
    }

    /// Overwrite value and error of weight `index`; false if out of range
    pub fn set_xsec(&mut self, index: usize, value: f64, error: f64) -> bool {
        match (
            self.cross_sections.get_mut(index),
            self.cross_section_errors.get_mut(index),
        ) {
            (Some(xs), Some(err)) => {
                *xs = value;
                *err = error;
                true
            }
            _ => false,
        }
    }

    /// True if at least one entry exists and values and errors line up
    pub fn is_valid(&self) -> bool {
        !self.cross_sections.is_empty()
            && self.cross_sections.len() == self.cross_section_errors.len()
    }
}

impl AttributeRecord for CrossSection {
    const KIND: AttributeKind = AttributeKind::CrossSection;

    fn parse(input: &str) -> Result<Self> {
        let kind = Self::KIND;
        let tokens: Vec<&str> = input.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(Error::AttributeParse {
                kind,
                input: input.to_string(),
            });
        }

        let mut record = CrossSection::new(
            field(tokens.first().copied(), kind, input)?,
            field(tokens.get(1).copied(), kind, input)?,
        );
        if tokens.len() >= 4 {
            record.accepted_events = field(tokens.get(2).copied(), kind, input)?;
            record.attempted_events = field(tokens.get(3).copied(), kind, input)?;
        } else if tokens.len() == 3 {
            return Err(Error::AttributeParse {
                kind,
                input: input.to_string(),
            });
        }

        let rest = tokens.get(4..).unwrap_or(&[]);
        if rest.len() % 2 != 0 {
            return Err(Error::AttributeParse {
                kind,
                input: input.to_string(),
            });
        }
        for pair in rest.chunks(2) {
            record
                .cross_sections
                .push(field(pair.first().copied(), kind, input)?);
            record
                .cross_section_errors
                .push(field(pair.get(1).copied(), kind, input)?);
        }
        Ok(record)
    }

    fn format(&self) -> Result<String> {
        if !self.is_valid() {
            return Err(Error::AttributeFormat(format!(
                "cross section has {} values and {} errors",
                self.cross_sections.len(),
                self.cross_section_errors.len()
            )));
        }
        let mut out = format!(
            "{} {} {} {}",
            format_real(self.cross_sections[0]),
            format_real(self.cross_section_errors[0]),
            self.accepted_events,
            self.attempted_events
        );
        for (xs, err) in self
            .cross_sections
            .iter()
            .zip(&self.cross_section_errors)
            .skip(1)
        {
            out.push(' ');
            out.push_str(&format_real(*xs));
            out.push(' ');
            out.push_str(&format_real(*err));
        }
        Ok(out)
    }

    /// Match the number of entries to the number of event weights.
    ///
    /// A single entry is copied to every weight; a multi-entry record must
    /// already have one entry per weight.
    fn init(mut self, ctx: &AttributeContext<'_>) -> Result<Self> {
        let weights = ctx.weight_count;
        let entries = self.cross_sections.len();
        if weights <= 1 || entries == weights {
            return Ok(self);
        }
        if entries == 1 {
            let (xs, err) = (self.cross_sections[0], self.cross_section_errors[0]);
            self.cross_sections = vec![xs; weights];
            self.cross_section_errors = vec![err; weights];
            return Ok(self);
        }
        Err(Error::AttributeInit(format!(
            "cross section has {} entries but the event has {} weights",
            entries, weights
        )))
    }
}

// ============================================================================
// Heavy ion summary
// ============================================================================

/// Summary information from a heavy-ion generator
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HeavyIon {
    /// Number of hard collisions
    pub ncoll_hard: i32,
    /// Participating nucleons in the projectile
    pub npart_proj: i32,
    /// Participating nucleons in the target
    pub npart_targ: i32,
    /// Number of collisions
    pub ncoll: i32,
    /// Spectator neutrons
    pub spectator_neutrons: i32,
    /// Spectator protons
    pub spectator_protons: i32,
    /// Nucleon / wounded-nucleon collisions
    pub n_nwounded_collisions: i32,
    /// Wounded-nucleon / nucleon collisions
    pub nwounded_n_collisions: i32,
    /// Wounded-nucleon / wounded-nucleon collisions
    pub nwounded_nwounded_collisions: i32,
    /// Impact parameter
    pub impact_parameter: f64,
    /// Event plane angle
    pub event_plane_angle: f64,
    /// Eccentricity
    pub eccentricity: f64,
    /// Assumed inelastic nucleon-nucleon cross section
    pub sigma_inel_nn: f64,
    /// Centrality
    pub centrality: f64,
}

impl HeavyIon {
    /// True when every field carries information (is non-zero)
    pub fn is_valid(&self) -> bool {
        let ints = [
            self.ncoll_hard,
            self.npart_proj,
            self.npart_targ,
            self.ncoll,
            self.spectator_neutrons,
            self.spectator_protons,
            self.n_nwounded_collisions,
            self.nwounded_n_collisions,
            self.nwounded_nwounded_collisions,
        ];
        let reals = [
            self.impact_parameter,
            self.event_plane_angle,
            self.eccentricity,
            self.sigma_inel_nn,
            self.centrality,
        ];
        ints.iter().all(|v| *v != 0) && reals.iter().all(|v| *v != 0.0)
    }
}

impl AttributeRecord for HeavyIon {
    const KIND: AttributeKind = AttributeKind::HeavyIon;

    fn parse(input: &str) -> Result<Self> {
        let kind = Self::KIND;
        let tokens: Vec<&str> = input.split_whitespace().collect();
        if tokens.len() != 14 {
            return Err(Error::AttributeParse {
                kind,
                input: input.to_string(),
            });
        }
        let mut it = tokens.into_iter();
        Ok(HeavyIon {
            ncoll_hard: field(it.next(), kind, input)?,
            npart_proj: field(it.next(), kind, input)?,
            npart_targ: field(it.next(), kind, input)?,
            ncoll: field(it.next(), kind, input)?,
            spectator_neutrons: field(it.next(), kind, input)?,
            spectator_protons: field(it.next(), kind, input)?,
            n_nwounded_collisions: field(it.next(), kind, input)?,
            nwounded_n_collisions: field(it.next(), kind, input)?,
            nwounded_nwounded_collisions: field(it.next(), kind, input)?,
            impact_parameter: field(it.next(), kind, input)?,
            event_plane_angle: field(it.next(), kind, input)?,
            eccentricity: field(it.next(), kind, input)?,
            sigma_inel_nn: field(it.next(), kind, input)?,
            centrality: field(it.next(), kind, input)?,
        })
    }

    fn format(&self) -> Result<String> {
        Ok(format!(
            "{} {} {} {} {} {} {} {} {} {} {} {} {} {}",
            self.ncoll_hard,
            self.npart_proj,
            self.npart_targ,
            self.ncoll,
            self.spectator_neutrons,
            self.spectator_protons,
            self.n_nwounded_collisions,
            self.nwounded_n_collisions,
            self.nwounded_nwounded_collisions,
            format_real(self.impact_parameter),
            format_real(self.event_plane_angle),
            format_real(self.eccentricity),
            format_real(self.sigma_inel_nn),
            format_real(self.centrality),
        ))
    }
}

// ============================================================================
// PDF info
// ============================================================================

/// Parton density information of the hard scattering
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PdfInfo {
    /// PDG ids of the incoming partons
    pub parton_id: [i32; 2],
    /// Momentum fractions of the incoming partons
    pub x: [f64; 2],
    /// Factorization scale
    pub scale: f64,
    /// PDF values `x·f(x)` of the incoming partons
    pub xf: [f64; 2],
    /// LHAPDF set ids (0 if unknown)
    pub pdf_id: [i32; 2],
}

impl PdfInfo {
    /// True when any field carries information
    pub fn is_valid(&self) -> bool {
        self.parton_id.iter().any(|v| *v != 0)
            || self.x.iter().any(|v| *v != 0.0)
            || self.scale != 0.0
            || self.xf.iter().any(|v| *v != 0.0)
            || self.pdf_id.iter().any(|v| *v != 0)
    }
}

impl AttributeRecord for PdfInfo {
    const KIND: AttributeKind = AttributeKind::PdfInfo;

    fn parse(input: &str) -> Result<Self> {
        let kind = Self::KIND;
        let tokens: Vec<&str> = input.split_whitespace().collect();
        if tokens.len() != 7 && tokens.len() != 9 {
            return Err(Error::AttributeParse {
                kind,
                input: input.to_string(),
            });
        }
        let mut it = tokens.into_iter();
        let mut info = PdfInfo {
            parton_id: [field(it.next(), kind, input)?, field(it.next(), kind, input)?],
            x: [field(it.next(), kind, input)?, field(it.next(), kind, input)?],
            scale: field(it.next(), kind, input)?,
            xf: [field(it.next(), kind, input)?, field(it.next(), kind, input)?],
            pdf_id: [0, 0],
        };
        if it.len() == 2 {
            info.pdf_id = [field(it.next(), kind, input)?, field(it.next(), kind, input)?];
        }
        Ok(info)
    }

    fn format(&self) -> Result<String> {
        Ok(format!(
            "{} {} {} {} {} {} {} {} {}",
            self.parton_id[0],
            self.parton_id[1],
            format_real(self.x[0]),
            format_real(self.x[1]),
            format_real(self.scale),
            format_real(self.xf[0]),
            format_real(self.xf[1]),
            self.pdf_id[0],
            self.pdf_id[1],
        ))
    }
}

// ============================================================================
// Associated particle
// ============================================================================

/// Reference to another particle of the same event
///
/// Stored as a particle id; initialization checks that the id names a live
/// particle of the owning event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedParticle {
    particle_id: i32,
}

impl AssociatedParticle {
    /// Reference the given particle
    pub fn new(id: ParticleId) -> Self {
        Self {
            particle_id: id.get(),
        }
    }

    /// The referenced particle
    pub fn particle_id(&self) -> Option<ParticleId> {
        ParticleId::new(self.particle_id)
    }
}

impl AttributeRecord for AssociatedParticle {
    const KIND: AttributeKind = AttributeKind::AssociatedParticle;

    fn parse(input: &str) -> Result<Self> {
        Ok(Self {
            particle_id: field(Some(input.trim()), Self::KIND, input)?,
        })
    }

    fn format(&self) -> Result<String> {
        Ok(self.particle_id.to_string())
    }

    fn init(self, ctx: &AttributeContext<'_>) -> Result<Self> {
        if ctx.has_particle(self.particle_id) {
            Ok(self)
        } else {
            Err(Error::AttributeInit(format!(
                "associated particle {} is not part of the event ({} particles)",
                self.particle_id, ctx.particle_count
            )))
        }
    }
}
