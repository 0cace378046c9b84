//! Structural invariants under random construction and removal

use crate::common::*;
use hepmc::AssociatedParticle;
use proptest::prelude::*;
use std::collections::HashMap;

/// One vertex per entry: consume up to `take` open particles (or one new
/// beam when none are open) and produce `produce` new ones.
pub fn random_event(shape: &[(u8, u8)]) -> Event {
    let mut event = Event::new();
    let mut open: Vec<ParticleId> = Vec::new();
    let mut pid = 1;

    for &(take, produce) in shape {
        let mut vertex = Vertex::new();
        let take = (take as usize).min(open.len());
        if take == 0 {
            vertex.add_particle_in(particle(pid, 4));
            pid += 1;
        }
        for id in open.drain(..take) {
            vertex.add_particle_in(id);
        }
        for _ in 0..produce {
            vertex.add_particle_out(particle(pid, 1));
            pid += 1;
        }
        let before = event.particle_count();
        event.add_vertex(vertex);
        let first_new = before + usize::from(take == 0);
        open.extend((first_new..event.particle_count()).map(ParticleId::from_index));
    }
    event
}

fn shape() -> impl Strategy<Value = Vec<(u8, u8)>> {
    prop::collection::vec((0u8..4, 1u8..4), 0..20)
}

proptest! {
    /// Invariant: random construction yields a consistent graph.
    #[test]
    fn built_events_are_consistent(shape in shape()) {
        let event = random_event(&shape);
        prop_assert_eq!(event.vertex_count(), shape.len());
        assert_invariants(&event);
    }

    /// Invariant: ids stay dense and edges bidirectional after every removal.
    #[test]
    fn removals_keep_invariants(
        shape in shape(),
        ops in prop::collection::vec((any::<bool>(), any::<u16>()), 0..12),
    ) {
        let mut event = random_event(&shape);
        for (vertex, pick) in ops {
            let particles = event.particle_count();
            let vertices = event.vertex_count();
            if vertex && vertices > 0 {
                let id = VertexId::from_index(pick as usize % vertices);
                prop_assert!(event.remove_vertex(id).is_some());
                prop_assert!(event.vertex_count() < vertices);
            } else if particles > 0 {
                let id = ParticleId::from_index(pick as usize % particles);
                prop_assert!(event.remove_particle(id).is_some());
                prop_assert!(event.particle_count() < particles);
            }
            assert_invariants(&event);
        }
    }

    /// Invariant: batch removal is the same as removing highest id first.
    #[test]
    fn batch_removal_is_sequential_removal(
        shape in shape(),
        picks in prop::collection::vec(any::<u16>(), 1..6),
    ) {
        let mut batch = random_event(&shape);
        let count = batch.particle_count();
        prop_assume!(count > 0);

        let mut ids: Vec<ParticleId> = picks
            .iter()
            .map(|&p| ParticleId::from_index(p as usize % count))
            .collect();
        let mut sequential = batch.clone();
        batch.remove_particles(ids.clone());

        ids.sort_unstable_by(|a, b| b.cmp(a));
        ids.dedup();
        for id in ids {
            // cascades only reach newer, higher ids in these events
            sequential.remove_particle(id);
        }
        assert_invariants(&batch);
        prop_assert!(hepmc::compare::identical(&batch, &sequential));
    }

    /// Invariant: a particle reference keeps naming the same particle across
    /// removals, and disappears with its target.
    #[test]
    fn associated_particles_survive_removals(
        shape in shape(),
        links in prop::collection::vec(any::<u16>(), 1..8),
        picks in prop::collection::vec(any::<u16>(), 0..6),
    ) {
        let mut event = random_event(&shape);
        let count = event.particle_count();
        prop_assume!(count > 0);

        // pids are unique, so they identify particles across renumbering
        let mut expected: HashMap<i32, i32> = HashMap::new();
        for (i, &link) in links.iter().enumerate() {
            let owner = ParticleId::from_index(i % count);
            let target = ParticleId::from_index(link as usize % count);
            event.add_attribute("partner", AssociatedParticle::new(target), owner.get());
            prop_assert!(event.attribute::<AssociatedParticle>("partner", owner.get()).is_some());
            let owner_pid = event.particle(owner).unwrap().pid();
            let target_pid = event.particle(target).unwrap().pid();
            expected.insert(owner_pid, target_pid);
        }

        for pick in picks {
            let particles = event.particle_count();
            if particles == 0 {
                break;
            }
            event.remove_particle(ParticleId::from_index(pick as usize % particles));
        }

        let alive: Vec<i32> = event.particles().map(|p| p.pid()).collect();
        for particle in event.particles() {
            let owner = particle.id().get();
            let Some(&target_pid) = expected.get(&particle.pid()) else {
                prop_assert!(!event.contains_attribute("partner", owner));
                continue;
            };
            if alive.contains(&target_pid) {
                let partner = event.attribute::<AssociatedParticle>("partner", owner).unwrap();
                let target = event.particle(partner.particle_id().unwrap()).unwrap();
                prop_assert_eq!(target.pid(), target_pid);
            } else {
                prop_assert!(!event.contains_attribute("partner", owner));
            }
        }
        prop_assert!(event.attribute_count() <= alive.len());
        assert_invariants(&event);
    }
}
