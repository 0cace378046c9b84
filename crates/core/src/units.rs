//! Momentum and length units
//!
//! Two independent enumerations with fixed conversion factors:
//!
//! | From | To  | Factor |
//! |------|-----|--------|
//! | GeV  | MeV | 1000   |
//! | cm   | mm  | 10     |
//!
//! Converting in the opposite direction divides by the same factor.
//! Canonical names are `MEV`, `GEV`, `MM` and `CM`.

use crate::error::{Error, Result};
use crate::four_vector::FourVector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of MeV in one GeV
pub const MEV_PER_GEV: f64 = 1000.0;

/// Number of millimetres in one centimetre
pub const MM_PER_CM: f64 = 10.0;

/// Unit of momentum and energy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MomentumUnit {
    /// Mega-electronvolt
    MeV,
    /// Giga-electronvolt
    #[default]
    GeV,
}

/// Unit of length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    /// Millimetre
    #[default]
    Mm,
    /// Centimetre
    Cm,
}

impl MomentumUnit {
    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            MomentumUnit::MeV => "MEV",
            MomentumUnit::GeV => "GEV",
        }
    }

    /// Factor that converts a value expressed in `self` into `to`
    pub fn conversion_factor(self, to: MomentumUnit) -> f64 {
        match (self, to) {
            (MomentumUnit::GeV, MomentumUnit::MeV) => MEV_PER_GEV,
            (MomentumUnit::MeV, MomentumUnit::GeV) => 1.0 / MEV_PER_GEV,
            _ => 1.0,
        }
    }
}

impl LengthUnit {
    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthUnit::Mm => "MM",
            LengthUnit::Cm => "CM",
        }
    }

    /// Factor that converts a value expressed in `self` into `to`
    pub fn conversion_factor(self, to: LengthUnit) -> f64 {
        match (self, to) {
            (LengthUnit::Cm, LengthUnit::Mm) => MM_PER_CM,
            (LengthUnit::Mm, LengthUnit::Cm) => 1.0 / MM_PER_CM,
            _ => 1.0,
        }
    }
}

impl fmt::Display for MomentumUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MomentumUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MEV" => Ok(MomentumUnit::MeV),
            "GEV" => Ok(MomentumUnit::GeV),
            _ => Err(Error::UnknownUnit(s.to_string())),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MM" => Ok(LengthUnit::Mm),
            "CM" => Ok(LengthUnit::Cm),
            _ => Err(Error::UnknownUnit(s.to_string())),
        }
    }
}

/// Unit-bearing quantities that can be rescaled in place
pub trait Convertible {
    /// Multiply every component by `factor`
    fn rescale(&mut self, factor: f64);
}

impl Convertible for f64 {
    fn rescale(&mut self, factor: f64) {
        *self *= factor;
    }
}

impl Convertible for FourVector {
    fn rescale(&mut self, factor: f64) {
        *self *= factor;
    }
}

/// Convert a momentum-like quantity between units
///
/// No-op when both units are equal, so values stay bit-identical.
pub fn convert_momentum<T: Convertible>(value: &mut T, from: MomentumUnit, to: MomentumUnit) {
    if from != to {
        value.rescale(from.conversion_factor(to));
    }
}

/// Convert a length-like quantity between units
///
/// No-op when both units are equal, so values stay bit-identical.
pub fn convert_length<T: Convertible>(value: &mut T, from: LengthUnit, to: LengthUnit) {
    if from != to {
        value.rescale(from.conversion_factor(to));
    }
}
