//! HepMC - in-memory event record for Monte Carlo event generators
//!
//! An event is a directed bipartite graph of vertices and particles, plus
//! typed attributes, weights and a shared run record. Format readers and
//! writers exchange events through the flat [`EventData`] form.
//!
//! # Quick Start
//!
//! ```
//! use hepmc::{Event, FourVector, Particle, Vertex};
//!
//! let mut event = Event::new();
//! let mut decay = Vertex::new();
//! decay
//!     .add_particle_in(Particle::new(FourVector::new(0.0, 0.0, 45.0, 91.2), 23, 2))
//!     .add_particle_out(Particle::new(FourVector::new(0.0, 30.0, 20.0, 45.6), 11, 1))
//!     .add_particle_out(Particle::new(FourVector::new(0.0, -30.0, 25.0, 45.6), -11, 1));
//! event.add_vertex(decay);
//!
//! let data = event.write_data();
//! let copy = Event::from_data(&data).unwrap();
//! assert!(hepmc::compare::identical(&event, &copy));
//! ```
//!
//! # Architecture
//!
//! Value types, attributes, the run record and the flat records live in
//! `hepmc-core`; the graph itself lives in `hepmc-event`. Both are
//! re-exported here.

pub use hepmc_core::*;
pub use hepmc_event::*;
