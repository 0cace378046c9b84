//! Node identifiers
//!
//! Particle and vertex ids share one signed integer namespace so that the
//! sign alone tells the node kind apart:
//!
//! | Range | Meaning |
//! |-------|---------|
//! | `> 0` | particle (1-based position in the event) |
//! | `0`   | the event itself / the root vertex |
//! | `< 0` | vertex (`-1` is the first vertex) |
//!
//! Ids are positional. Removing a node renumbers every node after it, so an
//! id is only meaningful for the event state it was obtained from.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute owner id that addresses the event itself
pub const EVENT_OWNER: i32 = 0;

/// Id of a particle owned by an event (always positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct ParticleId(i32);

impl ParticleId {
    /// Wrap a raw id; `None` unless `id > 0`
    pub fn new(id: i32) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    /// Id of the particle stored at arena slot `index`
    pub fn from_index(index: usize) -> Self {
        Self(index as i32 + 1)
    }

    /// Arena slot of this particle
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Raw signed id
    pub fn get(self) -> i32 {
        self.0
    }
}

/// Id of a vertex owned by an event (zero for the root, negative otherwise)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct VertexId(i32);

impl VertexId {
    /// The root vertex that anchors beam particles
    pub const ROOT: VertexId = VertexId(0);

    /// Wrap a raw id; `None` unless `id <= 0`
    ///
    /// `i32::MIN` is rejected as well since its slot index is not
    /// representable.
    pub fn new(id: i32) -> Option<Self> {
        (id <= 0 && id != i32::MIN).then_some(Self(id))
    }

    /// Id of the vertex stored at arena slot `index`
    pub fn from_index(index: usize) -> Self {
        Self(-(index as i32) - 1)
    }

    /// Arena slot of this vertex; `None` for the root
    pub fn index(self) -> Option<usize> {
        if self.is_root() {
            None
        } else {
            Some((-self.0 - 1) as usize)
        }
    }

    /// True for the root vertex
    pub fn is_root(self) -> bool {
        self.0 == 0
    }

    /// Raw signed id
    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<ParticleId> for i32 {
    fn from(id: ParticleId) -> i32 {
        id.0
    }
}

impl From<VertexId> for i32 {
    fn from(id: VertexId) -> i32 {
        id.0
    }
}

impl TryFrom<i32> for ParticleId {
    type Error = Error;

    fn try_from(id: i32) -> Result<Self, Error> {
        Self::new(id).ok_or_else(|| Error::InvalidData(format!("{} is not a particle id", id)))
    }
}

impl TryFrom<i32> for VertexId {
    type Error = Error;

    fn try_from(id: i32) -> Result<Self, Error> {
        Self::new(id).ok_or_else(|| Error::InvalidData(format!("{} is not a vertex id", id)))
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
