//! Flat records
//!
//! Struct-of-arrays encoding of one event (and of the run metadata) that
//! every on-disk format reads and writes. Format adapters depend on these
//! records only, never on the event graph itself.
//!
//! ## Edge encoding
//!
//! `links1[i]`/`links2[i]` form one edge each:
//!
//! | `links1` | `links2` | Edge |
//! |----------|----------|------|
//! | particle id (> 0) | vertex id (< 0) | particle enters vertex |
//! | vertex id (< 0) | particle id (> 0) | vertex produces particle |
//!
//! Edges from the root vertex are implicit: a particle with no producing
//! edge is a beam.

use crate::error::{Error, Result};
use crate::four_vector::FourVector;
use crate::units::{LengthUnit, MomentumUnit};
use serde::{Deserialize, Serialize};

/// Flat particle record
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParticleData {
    /// PDG particle code
    pub pid: i32,
    /// Generator status code
    pub status: i32,
    /// Four-momentum
    pub momentum: FourVector,
    /// Generated mass, if set explicitly
    pub mass: Option<f64>,
}

impl ParticleData {
    /// Record with the given code, status and momentum
    pub fn new(pid: i32, status: i32, momentum: FourVector) -> Self {
        Self {
            pid,
            status,
            momentum,
            mass: None,
        }
    }
}

/// Flat vertex record
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VertexData {
    /// Generator status code
    pub status: i32,
    /// Position, if set explicitly
    pub position: Option<FourVector>,
}

/// Flat event record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventData {
    /// Event number
    pub event_number: i64,
    /// Unit of momenta and masses
    pub momentum_unit: MomentumUnit,
    /// Unit of positions
    pub length_unit: LengthUnit,
    /// Position of the root vertex
    pub event_pos: FourVector,
    /// Event weights
    pub weights: Vec<f64>,
    /// Particles in id order
    pub particles: Vec<ParticleData>,
    /// Vertices in id order
    pub vertices: Vec<VertexData>,
    /// First element of every edge
    pub links1: Vec<i32>,
    /// Second element of every edge
    pub links2: Vec<i32>,
    /// Owner id of every attribute
    pub attribute_id: Vec<i32>,
    /// Name of every attribute
    pub attribute_name: Vec<String>,
    /// String form of every attribute
    pub attribute_string: Vec<String>,
}

impl EventData {
    /// Check internal consistency
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidData` on mismatched array lengths or on edges
    /// whose ends are not one particle and one vertex of this record.
    /// Attribute owners are not checked; they may name ids past the end.
    pub fn validate(&self) -> Result<()> {
        if self.links1.len() != self.links2.len() {
            return Err(Error::InvalidData(format!(
                "links arrays differ in length ({} vs {})",
                self.links1.len(),
                self.links2.len()
            )));
        }
        if self.attribute_id.len() != self.attribute_name.len()
            || self.attribute_id.len() != self.attribute_string.len()
        {
            return Err(Error::InvalidData(format!(
                "attribute arrays differ in length ({}, {}, {})",
                self.attribute_id.len(),
                self.attribute_name.len(),
                self.attribute_string.len()
            )));
        }

        let particles = self.particles.len();
        let vertices = self.vertices.len();
        let is_particle = |id: i32| id > 0 && (id as usize) <= particles;
        let is_vertex = |id: i32| id < 0 && (id.unsigned_abs() as usize) <= vertices;

        for (i, (&first, &second)) in self.links1.iter().zip(&self.links2).enumerate() {
            let valid = (is_particle(first) && is_vertex(second))
                || (is_vertex(first) && is_particle(second));
            if !valid {
                return Err(Error::InvalidData(format!(
                    "link {} ({}, {}) does not join a particle and a vertex",
                    i, first, second
                )));
            }
        }
        Ok(())
    }

    /// Number of edges
    pub fn link_count(&self) -> usize {
        self.links1.len()
    }

    /// Encode as an opaque binary blob
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a blob produced by [`EventData::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Flat run record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunInfoData {
    /// Names of the event weights
    pub weight_names: Vec<String>,
    /// Tool names
    pub tool_name: Vec<String>,
    /// Tool versions
    pub tool_version: Vec<String>,
    /// Tool descriptions
    pub tool_description: Vec<String>,
    /// Run attribute names
    pub attribute_name: Vec<String>,
    /// Run attribute strings
    pub attribute_string: Vec<String>,
}

impl RunInfoData {
    /// Check that the parallel arrays line up
    pub fn validate(&self) -> Result<()> {
        if self.tool_name.len() != self.tool_version.len()
            || self.tool_name.len() != self.tool_description.len()
        {
            return Err(Error::InvalidData(format!(
                "tool arrays differ in length ({}, {}, {})",
                self.tool_name.len(),
                self.tool_version.len(),
                self.tool_description.len()
            )));
        }
        if self.attribute_name.len() != self.attribute_string.len() {
            return Err(Error::InvalidData(format!(
                "run attribute arrays differ in length ({} vs {})",
                self.attribute_name.len(),
                self.attribute_string.len()
            )));
        }
        Ok(())
    }

    /// Encode as an opaque binary blob
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a blob produced by [`RunInfoData::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
