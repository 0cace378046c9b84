//! Shared test utilities for all integration test suites.
//!
//! Import via `mod common;` from any test's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

pub use hepmc::{
    Attach, DecayTree, Event, EventData, FourVector, LengthUnit, MomentumUnit, Particle,
    ParticleId, Setup, Vertex, VertexId, EVENT_OWNER,
};

// ============================================================================
// Invariant checks
// ============================================================================

/// Assert every structural invariant of an event.
///
/// - particle ids are exactly `1..=n`, vertex ids exactly `-1..=-m`
/// - incoming/outgoing lists agree with end/production back-references
/// - every particle has a production vertex the event owns
pub fn assert_invariants(event: &Event) {
    for (i, particle) in event.particles().enumerate() {
        assert_eq!(particle.id().get(), i as i32 + 1, "particle ids are dense");

        let production = particle.production_vertex_id();
        assert!(
            event.contains_vertex(production),
            "particle {} has dangling production vertex {}",
            particle.id(),
            production
        );
        let producer = particle.production_vertex();
        assert_eq!(
            producer.particles_out().filter(|p| p.id() == particle.id()).count(),
            1,
            "particle {} missing from outgoing list of {}",
            particle.id(),
            production
        );

        if let Some(end) = particle.end_vertex() {
            assert_eq!(
                end.particles_in().filter(|p| p.id() == particle.id()).count(),
                1,
                "particle {} missing from incoming list of {}",
                particle.id(),
                end.id()
            );
        }
    }

    for (j, vertex) in event.vertices().enumerate() {
        assert_eq!(vertex.id().get(), -(j as i32) - 1, "vertex ids are dense");
        for p in vertex.particles_in() {
            assert_eq!(p.end_vertex_id(), Some(vertex.id()));
        }
        for p in vertex.particles_out() {
            assert_eq!(p.production_vertex_id(), vertex.id());
        }
    }

    for p in event.root_vertex().particles_out() {
        assert!(p.is_beam());
    }
    assert_eq!(event.root_vertex().particles_in_size(), 0);
}

// ============================================================================
// Event builders
// ============================================================================

/// Particle with a distinctive momentum derived from its pid
pub fn particle(pid: i32, status: i32) -> Particle {
    let pz = pid as f64 * 1.5;
    Particle::new(FourVector::new(0.1, -0.2, pz, pz.abs() + 1.0), pid, status)
}

/// Root produces A (11) and B (-11); A decays into C (22) and D (22).
///
/// Ids: A = 1, B = 2, C = 3, D = 4, decay vertex = -1.
pub fn two_beams_one_decay() -> Event {
    let mut event = Event::new();
    let a = event.add_particle(particle(11, 2));
    event.add_particle(particle(-11, 1));
    let mut decay = Vertex::new();
    decay
        .add_particle_in(a)
        .add_particle_out(particle(22, 1))
        .add_particle_out(particle(22, 1));
    event.add_vertex(decay);
    event
}

/// A two-level cascade: pp -> Z + jet, Z -> mu mu, jet -> 3 hadrons
///
/// ```text
/// p(1) p(2) -> v1 -> Z(3) jet(4)
///               Z(3) -> v2 -> mu(5) mu(6)
///             jet(4) -> v3 -> pi(7) pi(8) pi(9)
/// ```
pub fn drell_yan() -> Event {
    let mut event = Event::new();
    event.set_event_number(7);

    let mut hard = Vertex::with_position(FourVector::new(0.0, 0.0, 0.1, 0.0));
    hard.add_particle_in(particle(2212, 4))
        .add_particle_in(particle(2212, 4))
        .add_particle_out(particle(23, 2))
        .add_particle_out(particle(21, 2));
    let hard = event.add_vertex(hard);
    let z = ParticleId::from_index(2);
    let jet = ParticleId::from_index(3);
    assert_eq!(hard.get(), -1);

    let mut z_decay = Vertex::new();
    z_decay
        .add_particle_in(z)
        .add_particle_out(particle(13, 1))
        .add_particle_out(particle(-13, 1));
    event.add_vertex(z_decay);

    let mut hadronization = Vertex::with_position(FourVector::new(0.5, 0.5, 0.5, 1.0));
    hadronization
        .add_particle_in(jet)
        .add_particle_out(particle(211, 1))
        .add_particle_out(particle(-211, 1))
        .add_particle_out(particle(111, 1));
    event.add_vertex(hadronization);

    event.add_attribute("signal_process_id", 1i32, EVENT_OWNER);
    event.add_attribute("flow1", 501i32, 4);
    event.add_attribute("note", "hadronization", -3);
    event
}

/// Linear chain of `depth` decays hanging off one beam
pub fn chain(depth: usize) -> Event {
    let mut event = Event::new();
    let mut current = event.add_particle(particle(1, 2));
    for level in 0..depth {
        let mut v = Vertex::new();
        v.add_particle_in(current)
            .add_particle_out(particle(level as i32 + 2, 2));
        event.add_vertex(v);
        current = ParticleId::from_index(event.particle_count() - 1);
    }
    event
}
