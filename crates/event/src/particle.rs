//! Particles
//!
//! A [`Particle`] is a standalone value: it has no id and no links until it
//! is moved into an [`Event`]. Particles owned by an event are inspected
//! through [`ParticleRef`], a borrowed view that resolves links on demand.

use crate::event::Event;
use crate::vertex::VertexRef;
use hepmc_core::{FourVector, ParticleData, ParticleId, VertexId};
use serde::{Deserialize, Serialize};

/// A particle not (yet) owned by any event
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Particle {
    data: ParticleData,
}

impl Particle {
    /// Particle with the given momentum, PDG code and status
    pub fn new(momentum: FourVector, pid: i32, status: i32) -> Self {
        Self {
            data: ParticleData::new(pid, status, momentum),
        }
    }

    /// Wrap a flat record
    pub fn from_data(data: ParticleData) -> Self {
        Self { data }
    }

    /// Flat record
    pub fn data(&self) -> &ParticleData {
        &self.data
    }

    /// Consume into the flat record
    pub fn into_data(self) -> ParticleData {
        self.data
    }

    /// PDG code
    pub fn pid(&self) -> i32 {
        self.data.pid
    }

    /// Status code
    pub fn status(&self) -> i32 {
        self.data.status
    }

    /// Four-momentum
    pub fn momentum(&self) -> FourVector {
        self.data.momentum
    }

    /// Set the PDG code
    pub fn set_pid(&mut self, pid: i32) {
        self.data.pid = pid;
    }

    /// Set the status code
    pub fn set_status(&mut self, status: i32) {
        self.data.status = status;
    }

    /// Set the four-momentum
    pub fn set_momentum(&mut self, momentum: FourVector) {
        self.data.momentum = momentum;
    }

    /// Explicit mass if set, otherwise the invariant mass of the momentum
    pub fn generated_mass(&self) -> f64 {
        generated_mass(&self.data)
    }

    /// Set an explicit generated mass
    pub fn set_generated_mass(&mut self, mass: f64) {
        self.data.mass = Some(mass);
    }

    /// Forget the explicit generated mass
    pub fn unset_generated_mass(&mut self) {
        self.data.mass = None;
    }

    /// True if an explicit mass was set
    pub fn is_generated_mass_set(&self) -> bool {
        self.data.mass.is_some()
    }
}

impl From<ParticleData> for Particle {
    fn from(data: ParticleData) -> Self {
        Self::from_data(data)
    }
}

pub(crate) fn generated_mass(data: &ParticleData) -> f64 {
    data.mass.unwrap_or_else(|| data.momentum.m())
}

/// Borrowed view of a particle owned by an event
#[derive(Clone, Copy)]
pub struct ParticleRef<'a> {
    event: &'a Event,
    id: ParticleId,
}

impl<'a> ParticleRef<'a> {
    pub(crate) fn new(event: &'a Event, id: ParticleId) -> Self {
        Self { event, id }
    }

    /// Id within the owning event
    pub fn id(&self) -> ParticleId {
        self.id
    }

    /// Owning event
    pub fn event(&self) -> &'a Event {
        self.event
    }

    /// Flat record
    pub fn data(&self) -> &'a ParticleData {
        &self.event.particle_slot(self.id).data
    }

    /// PDG code
    pub fn pid(&self) -> i32 {
        self.data().pid
    }

    /// Status code
    pub fn status(&self) -> i32 {
        self.data().status
    }

    /// Four-momentum
    pub fn momentum(&self) -> FourVector {
        self.data().momentum
    }

    /// Explicit mass if set, otherwise the invariant mass of the momentum
    pub fn generated_mass(&self) -> f64 {
        generated_mass(self.data())
    }

    /// Id of the producing vertex; the root vertex for beams
    pub fn production_vertex_id(&self) -> VertexId {
        self.event.particle_slot(self.id).production
    }

    /// Id of the vertex this particle enters, if any
    pub fn end_vertex_id(&self) -> Option<VertexId> {
        self.event.particle_slot(self.id).end
    }

    /// Producing vertex; the root vertex for beams
    pub fn production_vertex(&self) -> VertexRef<'a> {
        VertexRef::new(self.event, self.production_vertex_id())
    }

    /// Vertex this particle enters, if any
    pub fn end_vertex(&self) -> Option<VertexRef<'a>> {
        self.end_vertex_id().map(|v| VertexRef::new(self.event, v))
    }

    /// True if produced by the root vertex
    pub fn is_beam(&self) -> bool {
        self.production_vertex_id().is_root()
    }

    /// Incoming particles of the producing vertex
    pub fn parents(&self) -> Vec<ParticleRef<'a>> {
        self.production_vertex().particles_in().collect()
    }

    /// Outgoing particles of the end vertex
    pub fn children(&self) -> Vec<ParticleRef<'a>> {
        match self.end_vertex() {
            Some(v) => v.particles_out().collect(),
            None => Vec::new(),
        }
    }

    /// Names of attributes attached to this particle
    pub fn attribute_names(&self) -> Vec<String> {
        self.event.attribute_names(self.id.get())
    }

    /// String form of an attribute attached to this particle
    pub fn attribute_as_string(&self, name: &str) -> String {
        self.event.attribute_as_string(name, self.id.get())
    }
}

impl std::fmt::Debug for ParticleRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleRef")
            .field("id", &self.id)
            .field("data", self.data())
            .field("production", &self.production_vertex_id())
            .field("end", &self.end_vertex_id())
            .finish()
    }
}

impl PartialEq for ParticleRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.event, other.event) && self.id == other.id
    }
}
