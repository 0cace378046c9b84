//! Bulk insertion of a detached decay tree
//!
//! A [`DecayTree`] is built independently of any event, in any order, and
//! may reference vertices before they exist in an event. [`Event::add_tree`]
//! moves the whole tree in with one call.
//!
//! # Algorithm
//!
//! Acyclic trees are inserted producer-first. A deque is seeded with the
//! source vertices; the front vertex is deferred (its missing producer pushed
//! in front of it) until all its producers are in, then added, and the end
//! vertices of its products are queued at the back.
//!
//! A tree with a production cycle has no producer-first order. Whether the
//! tree is cyclic is checked once per event with a depth-first search for
//! back edges, and the outcome is stored as the boolean event attribute
//! [`CYCLES_ATTRIBUTE`]. Later calls honor the stored marker:
//!
//! | Marker | Behavior |
//! |--------|----------|
//! | absent | check, store the result, then insert accordingly |
//! | `false` | producer-first; a cycle found on the way sets the marker and switches to direct insertion |
//! | `true` | direct insertion in tree order |

use crate::event::Event;
use crate::particle::Particle;
use hepmc_core::setup::DEBUG_TREE_STATS;
use hepmc_core::{ParticleData, ParticleId, VertexData, VertexId, EVENT_OWNER};
use std::collections::VecDeque;
use tracing::debug;

/// Name of the event attribute recording whether inserted trees had cycles
pub const CYCLES_ATTRIBUTE: &str = "cycles";

/// Particle handle within a [`DecayTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeParticleId(usize);

/// Vertex handle within a [`DecayTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeVertexId(usize);

#[derive(Debug, Clone)]
struct TreeParticle {
    data: ParticleData,
    production: Option<usize>,
    end: Option<usize>,
}

#[derive(Debug, Clone, Default)]
struct TreeVertex {
    data: VertexData,
    incoming: Vec<usize>,
    outgoing: Vec<usize>,
}

/// Particles and vertices linked to each other outside of any event
#[derive(Debug, Clone, Default)]
pub struct DecayTree {
    particles: Vec<TreeParticle>,
    vertices: Vec<TreeVertex>,
}

impl DecayTree {
    /// Empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unlinked particle
    pub fn add_particle(&mut self, particle: Particle) -> TreeParticleId {
        self.particles.push(TreeParticle {
            data: particle.into_data(),
            production: None,
            end: None,
        });
        TreeParticleId(self.particles.len() - 1)
    }

    /// Add a vertex without particles
    pub fn add_vertex(&mut self, data: VertexData) -> TreeVertexId {
        self.vertices.push(TreeVertex {
            data,
            ..TreeVertex::default()
        });
        TreeVertexId(self.vertices.len() - 1)
    }

    /// Link `particle` as entering `vertex`, leaving its previous end vertex
    pub fn add_particle_in(&mut self, vertex: TreeVertexId, particle: TreeParticleId) -> bool {
        if vertex.0 >= self.vertices.len() || particle.0 >= self.particles.len() {
            return false;
        }
        match self.particles[particle.0].end {
            Some(v) if v == vertex.0 => return true,
            Some(v) => self.vertices[v].incoming.retain(|p| *p != particle.0),
            None => {}
        }
        self.particles[particle.0].end = Some(vertex.0);
        self.vertices[vertex.0].incoming.push(particle.0);
        true
    }

    /// Link `particle` as produced by `vertex`, leaving its previous production vertex
    pub fn add_particle_out(&mut self, vertex: TreeVertexId, particle: TreeParticleId) -> bool {
        if vertex.0 >= self.vertices.len() || particle.0 >= self.particles.len() {
            return false;
        }
        match self.particles[particle.0].production {
            Some(v) if v == vertex.0 => return true,
            Some(v) => self.vertices[v].outgoing.retain(|p| *p != particle.0),
            None => {}
        }
        self.particles[particle.0].production = Some(vertex.0);
        self.vertices[vertex.0].outgoing.push(particle.0);
        true
    }

    /// Number of particles
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Flat record of a particle
    pub fn particle(&self, id: TreeParticleId) -> Option<&ParticleData> {
        self.particles.get(id.0).map(|p| &p.data)
    }

    /// Producing vertex of a particle
    pub fn production_vertex(&self, id: TreeParticleId) -> Option<TreeVertexId> {
        self.particles.get(id.0)?.production.map(TreeVertexId)
    }

    /// Vertex a particle enters
    pub fn end_vertex(&self, id: TreeParticleId) -> Option<TreeVertexId> {
        self.particles.get(id.0)?.end.map(TreeVertexId)
    }

    /// Vertices with no incoming particle or with an incoming particle
    /// that nothing produces
    fn sources(&self) -> Vec<usize> {
        (0..self.vertices.len())
            .filter(|&v| {
                let incoming = &self.vertices[v].incoming;
                incoming.is_empty()
                    || incoming
                        .iter()
                        .any(|&p| self.particles[p].production.is_none())
            })
            .collect()
    }

    /// Depth-first search from the sources
    ///
    /// Returns whether a cycle exists and the vertices in discovery order.
    /// Vertices unreachable from any source can only sit on or behind a
    /// cycle.
    fn detect_cycles(&self, sources: &[usize]) -> (bool, Vec<usize>) {
        const WHITE: u8 = 0;
        const GRAY: u8 = 1;
        const BLACK: u8 = 2;

        let mut color = vec![WHITE; self.vertices.len()];
        let mut order = Vec::with_capacity(self.vertices.len());
        let mut cyclic = false;

        for &source in sources {
            if color[source] != WHITE {
                continue;
            }
            color[source] = GRAY;
            order.push(source);
            let mut stack = vec![(source, 0usize)];
            while let Some(&(v, next)) = stack.last() {
                match self.vertices[v].outgoing.get(next) {
                    Some(&p) => {
                        if let Some(top) = stack.last_mut() {
                            top.1 += 1;
                        }
                        if let Some(child) = self.particles[p].end {
                            match color[child] {
                                WHITE => {
                                    color[child] = GRAY;
                                    order.push(child);
                                    stack.push((child, 0));
                                }
                                GRAY => cyclic = true,
                                _ => {}
                            }
                        }
                    }
                    None => {
                        color[v] = BLACK;
                        stack.pop();
                    }
                }
            }
        }

        if color.iter().any(|c| *c == WHITE) {
            cyclic = true;
        }
        (cyclic, order)
    }
}

/// Where the nodes of a tree ended up in the event
#[derive(Debug, Clone, Default)]
pub struct TreeInsertion {
    particles: Vec<Option<ParticleId>>,
    vertices: Vec<Option<VertexId>>,
    cyclic: bool,
}

impl TreeInsertion {
    /// Event id of a tree particle
    pub fn particle(&self, id: TreeParticleId) -> Option<ParticleId> {
        self.particles.get(id.0).copied().flatten()
    }

    /// Event id of a tree vertex
    pub fn vertex(&self, id: TreeVertexId) -> Option<VertexId> {
        self.vertices.get(id.0).copied().flatten()
    }

    /// True if the tree was inserted without a producer-first order
    pub fn was_cyclic(&self) -> bool {
        self.cyclic
    }
}

#[derive(Debug, Default)]
struct TreeStats {
    iterations: usize,
    max_queue: usize,
}

impl Event {
    /// Insert a whole decay tree
    ///
    /// Every tree vertex and particle ends up in the event. Particles with
    /// no producer in the tree become beams. Never loops forever, cycles
    /// included.
    pub fn add_tree(&mut self, tree: DecayTree) -> TreeInsertion {
        let mut insertion = TreeInsertion {
            particles: vec![None; tree.particles.len()],
            vertices: vec![None; tree.vertices.len()],
            cyclic: false,
        };
        let mut stats = TreeStats::default();
        let sources = tree.sources();

        let cyclic = match self.cycle_marker() {
            Some(true) => {
                let order: Vec<usize> = (0..tree.vertices.len()).collect();
                self.insert_directly(&tree, &mut insertion, &order);
                true
            }
            Some(false) => !self.insert_ordered(&tree, &mut insertion, &sources, &mut stats),
            None => {
                let (cyclic, order) = tree.detect_cycles(&sources);
                self.add_attribute(CYCLES_ATTRIBUTE, cyclic, EVENT_OWNER);
                if cyclic {
                    self.insert_directly(&tree, &mut insertion, &order);
                    true
                } else {
                    !self.insert_ordered(&tree, &mut insertion, &sources, &mut stats)
                }
            }
        };

        // whatever the ordered pass could not reach, and the rest after a fallback
        let remaining: Vec<usize> = (0..tree.vertices.len())
            .filter(|&v| insertion.vertices[v].is_none())
            .collect();
        let cyclic = cyclic || !remaining.is_empty();
        self.insert_directly(&tree, &mut insertion, &remaining);
        if cyclic {
            self.add_attribute(CYCLES_ATTRIBUTE, true, EVENT_OWNER);
        }

        for (i, particle) in tree.particles.iter().enumerate() {
            if insertion.particles[i].is_none() {
                insertion.particles[i] = Some(self.push_particle(particle.data, Some(VertexId::ROOT)));
            }
        }

        if self.setup.debug_enabled(DEBUG_TREE_STATS) {
            debug!(
                target: "hepmc::tree",
                particles = tree.particles.len(),
                vertices = tree.vertices.len(),
                iterations = stats.iterations,
                max_queue = stats.max_queue,
                cyclic,
                "Inserted decay tree"
            );
        }
        insertion.cyclic = cyclic;
        insertion
    }

    fn cycle_marker(&self) -> Option<bool> {
        if !self.contains_attribute(CYCLES_ATTRIBUTE, EVENT_OWNER) {
            return None;
        }
        self.attribute::<bool>(CYCLES_ATTRIBUTE, EVENT_OWNER)
    }

    /// Producer-first insertion; false if a cycle was met
    fn insert_ordered(
        &mut self,
        tree: &DecayTree,
        insertion: &mut TreeInsertion,
        sources: &[usize],
        stats: &mut TreeStats,
    ) -> bool {
        let mut queue: VecDeque<usize> = sources.iter().copied().collect();
        let mut deferred = vec![false; tree.vertices.len()];

        while let Some(&front) = queue.front() {
            stats.iterations += 1;
            stats.max_queue = stats.max_queue.max(queue.len());
            if insertion.vertices[front].is_some() {
                queue.pop_front();
                continue;
            }

            let missing = tree.vertices[front]
                .incoming
                .iter()
                .filter_map(|&p| tree.particles[p].production)
                .find(|&v| insertion.vertices[v].is_none());
            if let Some(producer) = missing {
                deferred[front] = true;
                // the producer is itself waiting on this chain
                if deferred[producer] {
                    return false;
                }
                queue.push_front(producer);
                continue;
            }

            queue.pop_front();
            deferred[front] = false;
            self.insert_tree_vertex(tree, insertion, front);
            for &p in &tree.vertices[front].outgoing {
                if let Some(end) = tree.particles[p].end {
                    if insertion.vertices[end].is_none() {
                        queue.push_back(end);
                    }
                }
            }
        }
        true
    }

    fn insert_directly(&mut self, tree: &DecayTree, insertion: &mut TreeInsertion, order: &[usize]) {
        for &v in order {
            if insertion.vertices[v].is_none() {
                self.insert_tree_vertex(tree, insertion, v);
            }
        }
    }

    fn insert_tree_vertex(&mut self, tree: &DecayTree, insertion: &mut TreeInsertion, index: usize) {
        let source = &tree.vertices[index];
        let vertex = self.push_vertex(source.data);
        insertion.vertices[index] = Some(vertex);

        for &p in &source.incoming {
            let id = match insertion.particles[p] {
                Some(id) => id,
                None => {
                    let particle = &tree.particles[p];
                    // a particle whose producer is still pending stays unlisted
                    let production = match particle.production {
                        None => Some(VertexId::ROOT),
                        Some(v) => insertion.vertices[v],
                    };
                    let id = self.push_particle(particle.data, production);
                    insertion.particles[p] = Some(id);
                    id
                }
            };
            self.attach_in(vertex, id);
        }

        for &p in &source.outgoing {
            match insertion.particles[p] {
                Some(id) => self.attach_out(vertex, id),
                None => {
                    let id = self.push_particle(tree.particles[p].data, Some(vertex));
                    insertion.particles[p] = Some(id);
                }
            }
        }
    }
}
