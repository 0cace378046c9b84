//! Core types for the HepMC event record
//!
//! This crate defines everything that does not need the event graph itself:
//! - FourVector: momentum / position value type
//! - Units: momentum and length units with fixed conversion factors
//! - Ids: signed particle / vertex ids and the event owner id
//! - Attribute: lazily parsed attribute values and physics records
//! - RunInfo: metadata shared by all events of one run
//! - Flat records: ParticleData, VertexData, EventData, RunInfoData
//! - Setup: diagnostic settings loaded from `hepmc.toml`
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attribute;
pub mod data;
pub mod error;
pub mod four_vector;
pub mod ids;
pub mod run_info;
pub mod setup;
pub mod units;

pub use attribute::{
    AssociatedParticle, Attribute, AttributeContext, AttributeKind, AttributeRecord,
    AttributeValue, CrossSection, FromAttribute, HeavyIon, PdfInfo,
};
pub use data::{EventData, ParticleData, RunInfoData, VertexData};
pub use error::{Error, Result};
pub use four_vector::FourVector;
pub use ids::{ParticleId, VertexId, EVENT_OWNER};
pub use run_info::{RunInfo, ToolInfo};
pub use setup::Setup;
pub use units::{convert_length, convert_momentum, Convertible, LengthUnit, MomentumUnit};
