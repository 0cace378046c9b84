//! Vertices
//!
//! A standalone [`Vertex`] lists the particles it should be linked to once
//! added to an event. Entries are either new particles, which the event takes
//! ownership of, or ids of particles the event already owns:
//!
//! ```text
//! Vertex::new()
//!     .add_particle_in(beam_id)           // Attach::Existing
//!     .add_particle_out(Particle::new(..)) // Attach::New
//! ```
//!
//! Owned vertices are inspected through [`VertexRef`].

use crate::event::Event;
use crate::particle::{Particle, ParticleRef};
use hepmc_core::{FourVector, ParticleId, VertexData, VertexId};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// One end of an edge in a standalone vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Attach {
    /// Particle to be moved into the event
    New(Particle),
    /// Particle already owned by the event
    Existing(ParticleId),
}

impl From<Particle> for Attach {
    fn from(particle: Particle) -> Self {
        Attach::New(particle)
    }
}

impl From<ParticleId> for Attach {
    fn from(id: ParticleId) -> Self {
        Attach::Existing(id)
    }
}

/// A vertex not (yet) owned by any event
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex {
    data: VertexData,
    incoming: Vec<Attach>,
    outgoing: Vec<Attach>,
}

impl Vertex {
    /// Vertex without position or particles
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertex at an explicit position
    pub fn with_position(position: FourVector) -> Self {
        Self {
            data: VertexData {
                status: 0,
                position: Some(position),
            },
            ..Self::default()
        }
    }

    /// Wrap a flat record
    pub fn from_data(data: VertexData) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    /// Flat record
    pub fn data(&self) -> &VertexData {
        &self.data
    }

    /// Status code
    pub fn status(&self) -> i32 {
        self.data.status
    }

    /// Set the status code
    pub fn set_status(&mut self, status: i32) {
        self.data.status = status;
    }

    /// Explicit position, if set
    pub fn position(&self) -> Option<FourVector> {
        self.data.position
    }

    /// Set an explicit position
    pub fn set_position(&mut self, position: FourVector) {
        self.data.position = Some(position);
    }

    /// Forget the explicit position
    pub fn unset_position(&mut self) {
        self.data.position = None;
    }

    /// True if an explicit position was set
    pub fn has_set_position(&self) -> bool {
        self.data.position.is_some()
    }

    /// Queue a particle entering this vertex
    pub fn add_particle_in(&mut self, particle: impl Into<Attach>) -> &mut Self {
        self.incoming.push(particle.into());
        self
    }

    /// Queue a particle leaving this vertex
    pub fn add_particle_out(&mut self, particle: impl Into<Attach>) -> &mut Self {
        self.outgoing.push(particle.into());
        self
    }

    /// Queued incoming particles
    pub fn particles_in(&self) -> &[Attach] {
        &self.incoming
    }

    /// Queued outgoing particles
    pub fn particles_out(&self) -> &[Attach] {
        &self.outgoing
    }

    pub(crate) fn into_parts(self) -> (VertexData, Vec<Attach>, Vec<Attach>) {
        (self.data, self.incoming, self.outgoing)
    }
}

impl From<VertexData> for Vertex {
    fn from(data: VertexData) -> Self {
        Self::from_data(data)
    }
}

/// Borrowed view of a vertex owned by an event (or of its root vertex)
#[derive(Clone, Copy)]
pub struct VertexRef<'a> {
    event: &'a Event,
    id: VertexId,
}

impl<'a> VertexRef<'a> {
    pub(crate) fn new(event: &'a Event, id: VertexId) -> Self {
        Self { event, id }
    }

    /// Id within the owning event
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// True for the root vertex
    pub fn is_root(&self) -> bool {
        self.id.is_root()
    }

    /// Flat record
    pub fn data(&self) -> &'a VertexData {
        &self.event.vertex_slot(self.id).data
    }

    /// Status code
    pub fn status(&self) -> i32 {
        self.data().status
    }

    /// True if an explicit position was set
    pub fn has_set_position(&self) -> bool {
        self.data().position.is_some()
    }

    /// Effective position
    ///
    /// The explicit position if set; otherwise the first explicit position
    /// found walking up through the producers of the incoming particles,
    /// falling back to the event position.
    pub fn position(&self) -> FourVector {
        let mut seen = FxHashSet::default();
        let mut stack = vec![self.id];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let slot = self.event.vertex_slot(id);
            if let Some(position) = slot.data.position {
                return position;
            }
            for p in slot.incoming.iter().rev() {
                stack.push(self.event.particle_slot(*p).production);
            }
        }
        self.event.event_pos()
    }

    /// Incoming particles in link order
    pub fn particles_in(&self) -> impl Iterator<Item = ParticleRef<'a>> + 'a {
        let event = self.event;
        event
            .vertex_slot(self.id)
            .incoming
            .iter()
            .map(move |p| ParticleRef::new(event, *p))
    }

    /// Outgoing particles in link order
    pub fn particles_out(&self) -> impl Iterator<Item = ParticleRef<'a>> + 'a {
        let event = self.event;
        event
            .vertex_slot(self.id)
            .outgoing
            .iter()
            .map(move |p| ParticleRef::new(event, *p))
    }

    /// Number of incoming particles
    pub fn particles_in_size(&self) -> usize {
        self.event.vertex_slot(self.id).incoming.len()
    }

    /// Number of outgoing particles
    pub fn particles_out_size(&self) -> usize {
        self.event.vertex_slot(self.id).outgoing.len()
    }

    /// Names of attributes attached to this vertex
    pub fn attribute_names(&self) -> Vec<String> {
        self.event.attribute_names(self.id.get())
    }

    /// String form of an attribute attached to this vertex
    pub fn attribute_as_string(&self, name: &str) -> String {
        self.event.attribute_as_string(name, self.id.get())
    }
}

impl std::fmt::Debug for VertexRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.event.vertex_slot(self.id);
        f.debug_struct("VertexRef")
            .field("id", &self.id)
            .field("data", &slot.data)
            .field("incoming", &slot.incoming)
            .field("outgoing", &slot.outgoing)
            .finish()
    }
}

impl PartialEq for VertexRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.event, other.event) && self.id == other.id
    }
}
