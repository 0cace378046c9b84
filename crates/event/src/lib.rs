//! Event graph for the HepMC event record
//!
//! This crate owns the particle/vertex graph of one collision event:
//! - Event: arena of particles and vertices with dense, positional ids
//! - Particle / Vertex: standalone nodes and borrowed views into an event
//! - Attribute table: `(name, owner)` keyed, lazily parsed
//! - Removal: cascading removal with a single compaction pass
//! - DecayTree: bulk, cycle-safe insertion of an unordered graph
//! - Codec: conversion to and from the flat `EventData` form
//! - Compare / Print: structural comparison and text listings

#![warn(missing_docs)]
#![warn(clippy::all)]

mod attributes;
mod codec;
pub mod compare;
pub mod event;
pub mod particle;
pub mod print;
mod removal;
pub mod tree;
pub mod vertex;

pub use event::Event;
pub use particle::{Particle, ParticleRef};
pub use print::{Content, Listing};
pub use tree::{DecayTree, TreeInsertion, TreeParticleId, TreeVertexId, CYCLES_ATTRIBUTE};
pub use vertex::{Attach, Vertex, VertexRef};
