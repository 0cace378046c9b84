//! Node removal
//!
//! Removing a node cascades:
//! - a vertex takes every particle it produces with it; the particles
//!   entering it survive without an end vertex
//! - a particle takes its end vertex with it if it was that vertex's last
//!   incoming particle, and likewise its production vertex if it was the
//!   last outgoing one (the root vertex is never removed)
//!
//! The cascade runs over an explicit work-list. Every node removed by one
//! call is then dropped in a single compaction pass that renumbers the
//! survivors and re-keys their attributes, which gives the same ids as
//! removing the nodes one at a time. Parsed `AssociatedParticle` records
//! are renumbered too, or dropped when their target is removed.

use crate::event::Event;
use crate::particle::Particle;
use crate::vertex::Vertex;
use hepmc_core::setup::DEBUG_REMOVAL;
use hepmc_core::{AssociatedParticle, Attribute, AttributeValue, ParticleId, VertexId};
use tracing::debug;

enum Work {
    Particle(usize),
    Vertex(usize),
}

impl Event {
    /// Remove a particle and whatever it cascades to
    ///
    /// Returns the removed particle, detached. Particles after it move down
    /// one id.
    pub fn remove_particle(&mut self, id: ParticleId) -> Option<Particle> {
        if !self.contains_particle(id) {
            return None;
        }
        let data = self.particles[id.index()].data;
        self.remove_nodes(vec![Work::Particle(id.index())]);
        Some(Particle::from_data(data))
    }

    /// Remove several particles at once
    ///
    /// All ids refer to the event as it is before the call; duplicates and
    /// unknown ids are ignored. Returns the number of particles removed,
    /// cascades included.
    pub fn remove_particles(&mut self, ids: impl IntoIterator<Item = ParticleId>) -> usize {
        let mut indices: Vec<usize> = ids
            .into_iter()
            .filter(|id| self.contains_particle(*id))
            .map(ParticleId::index)
            .collect();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();
        if indices.is_empty() {
            return 0;
        }
        self.remove_nodes(indices.into_iter().map(Work::Particle).collect())
    }

    /// Remove a vertex and its downstream subtree
    ///
    /// Returns the removed vertex, detached and without particles. The root
    /// vertex cannot be removed.
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<Vertex> {
        let index = id.index()?;
        let data = self.vertices.get(index)?.data;
        self.remove_nodes(vec![Work::Vertex(index)]);
        Some(Vertex::from_data(data))
    }

    fn remove_nodes(&mut self, mut work: Vec<Work>) -> usize {
        let mut dead_particles = vec![false; self.particles.len()];
        let mut dead_vertices = vec![false; self.vertices.len()];
        let mut particle_count = 0;
        let mut vertex_count = 0;

        while let Some(item) = work.pop() {
            match item {
                Work::Particle(i) => {
                    if dead_particles[i] {
                        continue;
                    }
                    dead_particles[i] = true;
                    particle_count += 1;
                    let id = ParticleId::from_index(i);
                    let (production, end) = {
                        let slot = &mut self.particles[i];
                        (slot.production, slot.end.take())
                    };

                    if let Some(j) = end.and_then(VertexId::index) {
                        if !dead_vertices[j] {
                            let incoming = &mut self.vertices[j].incoming;
                            incoming.retain(|p| *p != id);
                            if incoming.is_empty() {
                                work.push(Work::Vertex(j));
                            }
                        }
                    }
                    match production.index() {
                        None => self.root.outgoing.retain(|p| *p != id),
                        Some(j) if !dead_vertices[j] => {
                            let outgoing = &mut self.vertices[j].outgoing;
                            outgoing.retain(|p| *p != id);
                            if outgoing.is_empty() {
                                work.push(Work::Vertex(j));
                            }
                        }
                        Some(_) => {}
                    }
                }
                Work::Vertex(j) => {
                    if dead_vertices[j] {
                        continue;
                    }
                    dead_vertices[j] = true;
                    vertex_count += 1;
                    let slot = &mut self.vertices[j];
                    let incoming = std::mem::take(&mut slot.incoming);
                    let outgoing = std::mem::take(&mut slot.outgoing);
                    for p in incoming {
                        self.particles[p.index()].end = None;
                    }
                    work.extend(outgoing.into_iter().map(|p| Work::Particle(p.index())));
                }
            }
        }

        self.compact(&dead_particles, &dead_vertices);
        if self.setup.debug_enabled(DEBUG_REMOVAL) {
            debug!(
                target: "hepmc::event",
                particles = particle_count,
                vertices = vertex_count,
                "Removed subtree"
            );
        }
        particle_count
    }

    /// Drop dead slots and renumber everything that survives
    fn compact(&mut self, dead_particles: &[bool], dead_vertices: &[bool]) {
        let particle_map = survivors(dead_particles, ParticleId::from_index);
        let vertex_map = survivors(dead_vertices, VertexId::from_index);
        let new_particle = |id: ParticleId| particle_map[id.index()];
        let new_vertex = |id: VertexId| match id.index() {
            None => Some(VertexId::ROOT),
            Some(j) => vertex_map[j],
        };

        let particles = std::mem::take(&mut self.particles);
        self.particles = particles
            .into_iter()
            .zip(dead_particles)
            .filter(|(_, dead)| !**dead)
            .map(|(mut slot, _)| {
                slot.production = new_vertex(slot.production).unwrap_or(VertexId::ROOT);
                slot.end = slot.end.and_then(new_vertex);
                slot
            })
            .collect();

        let vertices = std::mem::take(&mut self.vertices);
        self.vertices = vertices
            .into_iter()
            .zip(dead_vertices)
            .filter(|(_, dead)| !**dead)
            .map(|(mut slot, _)| {
                slot.incoming = slot.incoming.iter().filter_map(|p| new_particle(*p)).collect();
                slot.outgoing = slot.outgoing.iter().filter_map(|p| new_particle(*p)).collect();
                slot
            })
            .collect();

        self.root.outgoing = self
            .root
            .outgoing
            .iter()
            .filter_map(|p| new_particle(*p))
            .collect();

        // Owners past the end never resolved; they move down by every removed id
        let removed_particles = dead_particles.iter().filter(|d| **d).count() as i32;
        let removed_vertices = dead_vertices.iter().filter(|d| **d).count() as i32;
        let remap_particle = |id: i32| match particle_map.get(id as usize - 1).copied() {
            Some(mapped) => mapped.map(ParticleId::get),
            None => Some(id - removed_particles),
        };
        let remap_vertex = |id: i32| match vertex_map.get(id.unsigned_abs() as usize - 1).copied() {
            Some(mapped) => mapped.map(VertexId::get),
            None => Some(id + removed_vertices),
        };

        let attributes = self.attributes.get_mut();
        attributes.remap_owners(|owner| match owner.signum() {
            1 => remap_particle(owner),
            -1 => remap_vertex(owner),
            _ => Some(owner),
        });
        // Parsed references follow their target; a reference to a removed
        // particle goes with it
        attributes.retain(|_, attribute| match attribute {
            Attribute::Parsed(AttributeValue::AssociatedParticle(associated)) => {
                let Some(target) = associated.particle_id() else {
                    return true;
                };
                match remap_particle(target.get()).and_then(ParticleId::new) {
                    Some(id) => {
                        *associated = AssociatedParticle::new(id);
                        true
                    }
                    None => false,
                }
            }
            _ => true,
        });
    }
}

/// New id of every slot, `None` for dead ones
fn survivors<T>(dead: &[bool], id: impl Fn(usize) -> T) -> Vec<Option<T>> {
    let mut next = 0;
    dead.iter()
        .map(|dead| {
            if *dead {
                None
            } else {
                next += 1;
                Some(id(next - 1))
            }
        })
        .collect()
}
