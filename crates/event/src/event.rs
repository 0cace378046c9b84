//! The event graph
//!
//! An [`Event`] is an arena: particles and vertices live in two vectors and
//! refer to each other by id. Ids are positional, so the arena slots and the
//! ids always agree:
//!
//! ```text
//! particles[i]  <->  ParticleId(i + 1)
//! vertices[j]   <->  VertexId(-(j + 1))
//! root          <->  VertexId(0)
//! ```
//!
//! # Invariants
//!
//! After every public call:
//! - particle ids are exactly `1..=n` and vertex ids exactly `-1..=-m`
//! - a particle listed as outgoing (incoming) of a vertex has that vertex as
//!   its production (end) vertex, and vice versa
//! - every particle has a production vertex; beams are produced by the root
//!
//! Calls naming a node the event does not own are silent no-ops.

use crate::attributes::AttributeTable;
use crate::particle::{Particle, ParticleRef};
use crate::vertex::{Attach, Vertex, VertexRef};
use hepmc_core::{
    convert_length, convert_momentum, FourVector, LengthUnit, MomentumUnit, ParticleData,
    ParticleId, RunInfo, Setup, VertexData, VertexId,
};
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::sync::Arc;

pub(crate) type ParticleList = SmallVec<[ParticleId; 4]>;

/// Arena slot of an owned particle
#[derive(Debug, Clone)]
pub(crate) struct ParticleSlot {
    pub(crate) data: ParticleData,
    pub(crate) production: VertexId,
    pub(crate) end: Option<VertexId>,
}

/// Arena slot of an owned vertex
#[derive(Debug, Clone, Default)]
pub(crate) struct VertexSlot {
    pub(crate) data: VertexData,
    pub(crate) incoming: ParticleList,
    pub(crate) outgoing: ParticleList,
}

impl VertexSlot {
    fn new(data: VertexData) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    fn root() -> Self {
        Self::new(VertexData {
            status: 0,
            position: Some(FourVector::ZERO),
        })
    }
}

/// One collision event
#[derive(Debug)]
pub struct Event {
    event_number: i64,
    momentum_unit: MomentumUnit,
    length_unit: LengthUnit,
    weights: Vec<f64>,
    pub(crate) particles: Vec<ParticleSlot>,
    pub(crate) vertices: Vec<VertexSlot>,
    pub(crate) root: VertexSlot,
    run_info: Option<Arc<RunInfo>>,
    pub(crate) attributes: Mutex<AttributeTable>,
    pub(crate) setup: Setup,
}

impl Default for Event {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Event {
    fn clone(&self) -> Self {
        Self {
            event_number: self.event_number,
            momentum_unit: self.momentum_unit,
            length_unit: self.length_unit,
            weights: self.weights.clone(),
            particles: self.particles.clone(),
            vertices: self.vertices.clone(),
            root: self.root.clone(),
            run_info: self.run_info.clone(),
            attributes: Mutex::new(self.attributes.lock().clone()),
            setup: self.setup,
        }
    }
}

impl Event {
    /// Empty event in GeV and mm with a single unit weight
    pub fn new() -> Self {
        Self::with_units(MomentumUnit::default(), LengthUnit::default())
    }

    /// Empty event in the given units
    pub fn with_units(momentum_unit: MomentumUnit, length_unit: LengthUnit) -> Self {
        Self {
            event_number: 0,
            momentum_unit,
            length_unit,
            weights: vec![1.0],
            particles: Vec::new(),
            vertices: Vec::new(),
            root: VertexSlot::root(),
            run_info: None,
            attributes: Mutex::new(AttributeTable::default()),
            setup: Setup::default(),
        }
    }

    /// Empty event belonging to `run`, with one unit weight per run weight
    pub fn new_with_run_info(run: Arc<RunInfo>) -> Self {
        let mut event = Self::new();
        event.set_run_info(Some(run));
        event
    }

    /// Replace the diagnostic settings
    pub fn with_setup(mut self, setup: Setup) -> Self {
        self.setup = setup;
        self
    }

    /// Diagnostic settings
    pub fn setup(&self) -> &Setup {
        &self.setup
    }

    /// Replace the diagnostic settings
    pub fn set_setup(&mut self, setup: Setup) {
        self.setup = setup;
    }

    // ========================================================================
    // Scalars
    // ========================================================================

    /// Event number
    pub fn event_number(&self) -> i64 {
        self.event_number
    }

    /// Set the event number
    pub fn set_event_number(&mut self, number: i64) {
        self.event_number = number;
    }

    /// Unit of momenta and masses
    pub fn momentum_unit(&self) -> MomentumUnit {
        self.momentum_unit
    }

    /// Unit of positions
    pub fn length_unit(&self) -> LengthUnit {
        self.length_unit
    }

    /// Change units, converting every stored quantity
    ///
    /// Momenta and explicit masses follow the momentum unit; explicit vertex
    /// positions and the event position follow the length unit. Unset
    /// positions stay unset. Requesting the current unit changes nothing.
    pub fn set_units(&mut self, momentum_unit: MomentumUnit, length_unit: LengthUnit) {
        let from = self.momentum_unit;
        if from != momentum_unit {
            for slot in &mut self.particles {
                convert_momentum(&mut slot.data.momentum, from, momentum_unit);
                if let Some(mass) = slot.data.mass.as_mut() {
                    convert_momentum(mass, from, momentum_unit);
                }
            }
            self.momentum_unit = momentum_unit;
        }

        let from = self.length_unit;
        if from != length_unit {
            for slot in self.vertices.iter_mut().chain(std::iter::once(&mut self.root)) {
                if let Some(position) = slot.data.position.as_mut() {
                    convert_length(position, from, length_unit);
                }
            }
            self.length_unit = length_unit;
        }
    }

    /// Relabel the units without touching any stored value
    pub(crate) fn restore_units(&mut self, momentum_unit: MomentumUnit, length_unit: LengthUnit) {
        self.momentum_unit = momentum_unit;
        self.length_unit = length_unit;
    }

    /// Event weights
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Mutable event weights
    pub fn weights_mut(&mut self) -> &mut Vec<f64> {
        &mut self.weights
    }

    /// Weight called `name` in the attached run
    pub fn weight(&self, name: &str) -> Option<f64> {
        let index = self.run_info.as_ref()?.weight_index(name)?;
        self.weights.get(index).copied()
    }

    /// Set the weight called `name`; false if the run has no such weight
    pub fn set_weight(&mut self, name: &str, value: f64) -> bool {
        let index = match self.run_info.as_ref().and_then(|r| r.weight_index(name)) {
            Some(index) => index,
            None => return false,
        };
        if index >= self.weights.len() {
            self.weights.resize(index + 1, 1.0);
        }
        self.weights[index] = value;
        true
    }

    /// Run this event belongs to
    pub fn run_info(&self) -> Option<&Arc<RunInfo>> {
        self.run_info.as_ref()
    }

    /// Attach (or detach) the run
    ///
    /// When the run names its weights, the weight vector is resized to match,
    /// new entries defaulting to 1.
    pub fn set_run_info(&mut self, run: Option<Arc<RunInfo>>) {
        if let Some(run) = &run {
            let count = run.weight_names().len();
            if count > 0 && self.weights.len() != count {
                self.weights.resize(count, 1.0);
            }
        }
        self.run_info = run;
    }

    /// Position of the root vertex
    pub fn event_pos(&self) -> FourVector {
        self.root.data.position.unwrap_or(FourVector::ZERO)
    }

    /// Shift the event position and every explicit vertex position
    pub fn shift_position_by(&mut self, delta: FourVector) {
        self.root.data.position = Some(self.event_pos() + delta);
        for slot in &mut self.vertices {
            if let Some(position) = slot.data.position.as_mut() {
                *position += delta;
            }
        }
    }

    /// Shift everything so that the event position becomes `target`
    pub fn shift_position_to(&mut self, target: FourVector) {
        let delta = target - self.event_pos();
        self.shift_position_by(delta);
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Number of particles
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Number of vertices, root excluded
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// True if the event has no particles and no vertices
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.vertices.is_empty()
    }

    /// True if `id` names a particle of this event
    pub fn contains_particle(&self, id: ParticleId) -> bool {
        id.index() < self.particles.len()
    }

    /// True if `id` names a vertex of this event or the root vertex
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        match id.index() {
            None => true,
            Some(index) => index < self.vertices.len(),
        }
    }

    /// View of a particle
    pub fn particle(&self, id: ParticleId) -> Option<ParticleRef<'_>> {
        self.contains_particle(id).then(|| ParticleRef::new(self, id))
    }

    /// View of a vertex (the root included)
    pub fn vertex(&self, id: VertexId) -> Option<VertexRef<'_>> {
        self.contains_vertex(id).then(|| VertexRef::new(self, id))
    }

    /// View of the root vertex
    pub fn root_vertex(&self) -> VertexRef<'_> {
        VertexRef::new(self, VertexId::ROOT)
    }

    /// All particles in id order
    pub fn particles(&self) -> impl Iterator<Item = ParticleRef<'_>> + '_ {
        (0..self.particles.len()).map(move |i| ParticleRef::new(self, ParticleId::from_index(i)))
    }

    /// All vertices in id order (-1, -2, ...), root excluded
    pub fn vertices(&self) -> impl Iterator<Item = VertexRef<'_>> + '_ {
        (0..self.vertices.len()).map(move |i| VertexRef::new(self, VertexId::from_index(i)))
    }

    /// Particles produced by the root vertex
    pub fn beams(&self) -> impl Iterator<Item = ParticleRef<'_>> + '_ {
        self.root
            .outgoing
            .iter()
            .map(move |p| ParticleRef::new(self, *p))
    }

    /// First two beam particles
    pub fn beam_particles(&self) -> (Option<ParticleRef<'_>>, Option<ParticleRef<'_>>) {
        let mut beams = self.beams();
        (beams.next(), beams.next())
    }

    /// Anchor two particles on the root vertex
    ///
    /// Each one leaves its previous production vertex. Returns the ids, `None`
    /// for a particle this event does not own.
    pub fn set_beam_particles(
        &mut self,
        first: impl Into<Attach>,
        second: impl Into<Attach>,
    ) -> (Option<ParticleId>, Option<ParticleId>) {
        let first = self.add_particle_out(VertexId::ROOT, first);
        let second = self.add_particle_out(VertexId::ROOT, second);
        (first, second)
    }

    /// True if exactly two particles hang off the root vertex
    pub fn valid_beam_particles(&self) -> bool {
        self.root.outgoing.len() == 2
    }

    /// Mutable flat record of a particle
    pub fn particle_data_mut(&mut self, id: ParticleId) -> Option<&mut ParticleData> {
        self.particles.get_mut(id.index()).map(|slot| &mut slot.data)
    }

    /// Mutable flat record of a vertex; the root is changed through the shift methods
    pub fn vertex_data_mut(&mut self, id: VertexId) -> Option<&mut VertexData> {
        let index = id.index()?;
        self.vertices.get_mut(index).map(|slot| &mut slot.data)
    }

    pub(crate) fn particle_slot(&self, id: ParticleId) -> &ParticleSlot {
        &self.particles[id.index()]
    }

    pub(crate) fn vertex_slot(&self, id: VertexId) -> &VertexSlot {
        match id.index() {
            None => &self.root,
            Some(index) => &self.vertices[index],
        }
    }

    fn vertex_slot_mut(&mut self, id: VertexId) -> &mut VertexSlot {
        match id.index() {
            None => &mut self.root,
            Some(index) => &mut self.vertices[index],
        }
    }

    // ========================================================================
    // Building
    // ========================================================================

    /// Pre-size the arenas; no other effect
    pub fn reserve(&mut self, particles: usize, vertices: usize) {
        self.particles.reserve(particles);
        self.vertices.reserve(vertices);
    }

    /// Remove all particles, vertices, weights and attributes
    ///
    /// Units, run and settings are kept.
    pub fn clear(&mut self) {
        self.event_number = 0;
        self.weights.clear();
        self.particles.clear();
        self.vertices.clear();
        self.root = VertexSlot::root();
        self.attributes.get_mut().clear();
    }

    /// Take ownership of a particle and produce it from the root vertex
    pub fn add_particle(&mut self, particle: Particle) -> ParticleId {
        self.push_particle(particle.into_data(), Some(VertexId::ROOT))
    }

    /// Take ownership of a vertex and link its queued particles
    ///
    /// New incoming particles become beams that end in the vertex; new
    /// outgoing particles are produced by it. Particles are numbered in the
    /// order they are queued, incoming first. Existing particles are moved
    /// from their previous vertex; unknown ids are skipped.
    pub fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
        let (data, incoming, outgoing) = vertex.into_parts();
        let id = self.push_vertex(data);
        for attach in incoming {
            self.add_particle_in(id, attach);
        }
        for attach in outgoing {
            self.add_particle_out(id, attach);
        }
        id
    }

    /// Link a particle as entering `vertex`
    ///
    /// The particle leaves its previous end vertex. Returns the particle id,
    /// or `None` if the vertex is the root or not owned.
    pub fn add_particle_in(&mut self, vertex: VertexId, particle: impl Into<Attach>) -> Option<ParticleId> {
        if vertex.is_root() || !self.contains_vertex(vertex) {
            return None;
        }
        let id = match particle.into() {
            Attach::New(p) => self.add_particle(p),
            Attach::Existing(id) if self.contains_particle(id) => id,
            Attach::Existing(_) => return None,
        };
        self.attach_in(vertex, id);
        Some(id)
    }

    /// Link a particle as produced by `vertex` (the root included)
    ///
    /// The particle leaves its previous production vertex. Returns the
    /// particle id, or `None` if the vertex is not owned.
    pub fn add_particle_out(&mut self, vertex: VertexId, particle: impl Into<Attach>) -> Option<ParticleId> {
        if !self.contains_vertex(vertex) {
            return None;
        }
        match particle.into() {
            Attach::New(p) => Some(self.push_particle(p.into_data(), Some(vertex))),
            Attach::Existing(id) if self.contains_particle(id) => {
                self.attach_out(vertex, id);
                Some(id)
            }
            Attach::Existing(_) => None,
        }
    }

    /// Unlink a particle from the vertex it enters; no cascade
    pub fn remove_particle_in(&mut self, vertex: VertexId, particle: ParticleId) -> bool {
        if !self.contains_particle(particle) || self.particle_slot(particle).end != Some(vertex) {
            return false;
        }
        self.vertex_slot_mut(vertex).incoming.retain(|p| *p != particle);
        self.particles[particle.index()].end = None;
        true
    }

    /// Unlink a particle from its non-root production vertex; no cascade
    ///
    /// The particle becomes a beam.
    pub fn remove_particle_out(&mut self, vertex: VertexId, particle: ParticleId) -> bool {
        if vertex.is_root()
            || !self.contains_particle(particle)
            || self.particle_slot(particle).production != vertex
        {
            return false;
        }
        self.attach_out(VertexId::ROOT, particle);
        true
    }

    /// Append a particle; `production` of `None` leaves it unlisted until
    /// a producer is attached
    pub(crate) fn push_particle(&mut self, data: ParticleData, production: Option<VertexId>) -> ParticleId {
        let id = ParticleId::from_index(self.particles.len());
        self.particles.push(ParticleSlot {
            data,
            production: production.unwrap_or(VertexId::ROOT),
            end: None,
        });
        if let Some(vertex) = production {
            self.vertex_slot_mut(vertex).outgoing.push(id);
        }
        id
    }

    pub(crate) fn push_vertex(&mut self, data: VertexData) -> VertexId {
        let id = VertexId::from_index(self.vertices.len());
        self.vertices.push(VertexSlot::new(data));
        id
    }

    pub(crate) fn attach_in(&mut self, vertex: VertexId, particle: ParticleId) {
        let previous = self.particles[particle.index()].end;
        if previous == Some(vertex) {
            return;
        }
        if let Some(previous) = previous {
            self.vertex_slot_mut(previous).incoming.retain(|p| *p != particle);
        }
        self.particles[particle.index()].end = Some(vertex);
        self.vertex_slot_mut(vertex).incoming.push(particle);
    }

    pub(crate) fn attach_out(&mut self, vertex: VertexId, particle: ParticleId) {
        let previous = self.particles[particle.index()].production;
        if previous == vertex && self.vertex_slot(vertex).outgoing.contains(&particle) {
            return;
        }
        self.vertex_slot_mut(previous).outgoing.retain(|p| *p != particle);
        self.particles[particle.index()].production = vertex;
        self.vertex_slot_mut(vertex).outgoing.push(particle);
    }
}
