//! Attribute values with lazy string parsing
//!
//! An attribute is either the raw string it was read from or a concretely
//! typed value. Conversion is explicit and idempotent:
//!
//! ```text
//! Unparsed("3.5") --parse(Double)--> Parsed(Double(3.5))
//! ```
//!
//! A failed conversion leaves the attribute exactly as it was.
//!
//! ## Kinds
//!
//! | Kind | Payload | String form |
//! |------|---------|-------------|
//! | `Bool` | `bool` | `1` / `0` |
//! | `Int`, `Long` | `i32`, `i64` | decimal |
//! | `Float`, `Double` | `f32`, `f64` | shortest round-trip decimal |
//! | `String` | `String` | verbatim |
//! | `Vector*` | `Vec<_>` | space-separated elements |
//! | records | see [`records`] | space-separated fields |
//!
//! Attributes never point back at their owner. The owner is described by an
//! [`AttributeContext`] built from the table key when conversion happens.

pub mod records;

pub use records::{AssociatedParticle, AttributeRecord, CrossSection, HeavyIon, PdfInfo};

use crate::error::{Error, Result};
use crate::run_info::RunInfo;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discriminant of [`AttributeValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Boolean flag
    Bool,
    /// 32-bit integer
    Int,
    /// 64-bit integer
    Long,
    /// Single-precision real
    Float,
    /// Double-precision real
    Double,
    /// Free text
    String,
    /// List of 32-bit integers
    VectorInt,
    /// List of 64-bit integers
    VectorLong,
    /// List of single-precision reals
    VectorFloat,
    /// List of double-precision reals
    VectorDouble,
    /// List of whitespace-free words
    VectorString,
    /// Generator cross section
    CrossSection,
    /// Heavy-ion summary
    HeavyIon,
    /// Parton density information
    PdfInfo,
    /// Reference to another particle
    AssociatedParticle,
}

impl AttributeKind {
    /// Name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Bool => "Bool",
            AttributeKind::Int => "Int",
            AttributeKind::Long => "Long",
            AttributeKind::Float => "Float",
            AttributeKind::Double => "Double",
            AttributeKind::String => "String",
            AttributeKind::VectorInt => "VectorInt",
            AttributeKind::VectorLong => "VectorLong",
            AttributeKind::VectorFloat => "VectorFloat",
            AttributeKind::VectorDouble => "VectorDouble",
            AttributeKind::VectorString => "VectorString",
            AttributeKind::CrossSection => "CrossSection",
            AttributeKind::HeavyIon => "HeavyIon",
            AttributeKind::PdfInfo => "PdfInfo",
            AttributeKind::AssociatedParticle => "AssociatedParticle",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an attribute lives, computed from its table key
///
/// `owner` follows the id convention: 0 is the event, positive ids are
/// particles and negative ids are vertices.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeContext<'a> {
    /// Owner id from the table key
    pub owner: i32,
    /// Number of particles in the owning event
    pub particle_count: usize,
    /// Number of vertices in the owning event
    pub vertex_count: usize,
    /// Number of weights the attribute should agree with
    pub weight_count: usize,
    /// Run the owning event belongs to
    pub run_info: Option<&'a RunInfo>,
}

impl<'a> AttributeContext<'a> {
    /// Context for an attribute that is not attached anywhere
    pub fn detached() -> Self {
        Self::default()
    }

    /// True if `id` names a particle of the owning event
    pub fn has_particle(&self, id: i32) -> bool {
        id > 0 && (id as usize) <= self.particle_count
    }

    /// True if `id` names a vertex of the owning event
    pub fn has_vertex(&self, id: i32) -> bool {
        id < 0 && (id.unsigned_abs() as usize) <= self.vertex_count
    }

    /// True if the owner id resolves to the event or one of its nodes
    pub fn owner_is_live(&self) -> bool {
        self.owner == 0 || self.has_particle(self.owner) || self.has_vertex(self.owner)
    }
}

/// A concretely typed attribute payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Boolean flag
    Bool(bool),
    /// 32-bit integer
    Int(i32),
    /// 64-bit integer
    Long(i64),
    /// Single-precision real
    Float(f32),
    /// Double-precision real
    Double(f64),
    /// Free text
    String(String),
    /// List of 32-bit integers
    VectorInt(Vec<i32>),
    /// List of 64-bit integers
    VectorLong(Vec<i64>),
    /// List of single-precision reals
    VectorFloat(Vec<f32>),
    /// List of double-precision reals
    VectorDouble(Vec<f64>),
    /// List of whitespace-free words
    VectorString(Vec<String>),
    /// Generator cross section
    CrossSection(CrossSection),
    /// Heavy-ion summary
    HeavyIon(HeavyIon),
    /// Parton density information
    PdfInfo(PdfInfo),
    /// Reference to another particle
    AssociatedParticle(AssociatedParticle),
}

/// Format a double so that parsing the result gives back the same bits
pub(crate) fn format_real(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-5..1e16).contains(&magnitude) {
        format!("{:?}", value)
    } else {
        format!("{}", value)
    }
}

fn format_real32(value: f32) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-5..1e16).contains(&magnitude) {
        format!("{:?}", value)
    } else {
        format!("{}", value)
    }
}

fn parse_scalar<T: FromStr>(kind: AttributeKind, input: &str) -> Result<T> {
    input.trim().parse().map_err(|_| Error::AttributeParse {
        kind,
        input: input.to_string(),
    })
}

fn parse_list<T: FromStr>(kind: AttributeKind, input: &str) -> Result<Vec<T>> {
    input
        .split_whitespace()
        .map(|token| {
            token.parse().map_err(|_| Error::AttributeParse {
                kind,
                input: input.to_string(),
            })
        })
        .collect()
}

fn join<T>(values: &[T], format: impl Fn(&T) -> String) -> String {
    values.iter().map(format).collect::<Vec<_>>().join(" ")
}

impl AttributeValue {
    /// Kind of the payload
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttributeValue::Bool(_) => AttributeKind::Bool,
            AttributeValue::Int(_) => AttributeKind::Int,
            AttributeValue::Long(_) => AttributeKind::Long,
            AttributeValue::Float(_) => AttributeKind::Float,
            AttributeValue::Double(_) => AttributeKind::Double,
            AttributeValue::String(_) => AttributeKind::String,
            AttributeValue::VectorInt(_) => AttributeKind::VectorInt,
            AttributeValue::VectorLong(_) => AttributeKind::VectorLong,
            AttributeValue::VectorFloat(_) => AttributeKind::VectorFloat,
            AttributeValue::VectorDouble(_) => AttributeKind::VectorDouble,
            AttributeValue::VectorString(_) => AttributeKind::VectorString,
            AttributeValue::CrossSection(_) => AttributeKind::CrossSection,
            AttributeValue::HeavyIon(_) => AttributeKind::HeavyIon,
            AttributeValue::PdfInfo(_) => AttributeKind::PdfInfo,
            AttributeValue::AssociatedParticle(_) => AttributeKind::AssociatedParticle,
        }
    }

    /// Parse the string form of `kind`
    pub fn from_string(kind: AttributeKind, input: &str) -> Result<Self> {
        Ok(match kind {
            AttributeKind::Bool => match input.trim() {
                "1" | "true" => AttributeValue::Bool(true),
                "0" | "false" => AttributeValue::Bool(false),
                _ => {
                    return Err(Error::AttributeParse {
                        kind,
                        input: input.to_string(),
                    })
                }
            },
            AttributeKind::Int => AttributeValue::Int(parse_scalar(kind, input)?),
            AttributeKind::Long => AttributeValue::Long(parse_scalar(kind, input)?),
            AttributeKind::Float => AttributeValue::Float(parse_scalar(kind, input)?),
            AttributeKind::Double => AttributeValue::Double(parse_scalar(kind, input)?),
            AttributeKind::String => AttributeValue::String(input.to_string()),
            AttributeKind::VectorInt => AttributeValue::VectorInt(parse_list(kind, input)?),
            AttributeKind::VectorLong => AttributeValue::VectorLong(parse_list(kind, input)?),
            AttributeKind::VectorFloat => AttributeValue::VectorFloat(parse_list(kind, input)?),
            AttributeKind::VectorDouble => AttributeValue::VectorDouble(parse_list(kind, input)?),
            AttributeKind::VectorString => AttributeValue::VectorString(
                input.split_whitespace().map(str::to_string).collect(),
            ),
            AttributeKind::CrossSection => AttributeValue::CrossSection(CrossSection::parse(input)?),
            AttributeKind::HeavyIon => AttributeValue::HeavyIon(HeavyIon::parse(input)?),
            AttributeKind::PdfInfo => AttributeValue::PdfInfo(PdfInfo::parse(input)?),
            AttributeKind::AssociatedParticle => {
                AttributeValue::AssociatedParticle(AssociatedParticle::parse(input)?)
            }
        })
    }

    /// Contextual initialization, run once after parsing or attaching
    pub fn init(self, ctx: &AttributeContext<'_>) -> Result<Self> {
        Ok(match self {
            AttributeValue::CrossSection(xs) => AttributeValue::CrossSection(xs.init(ctx)?),
            AttributeValue::AssociatedParticle(ap) => {
                AttributeValue::AssociatedParticle(ap.init(ctx)?)
            }
            other => other,
        })
    }

    /// String form of the value
    pub fn to_string_repr(&self) -> Result<String> {
        Ok(match self {
            AttributeValue::Bool(v) => String::from(if *v { "1" } else { "0" }),
            AttributeValue::Int(v) => v.to_string(),
            AttributeValue::Long(v) => v.to_string(),
            AttributeValue::Float(v) => format_real32(*v),
            AttributeValue::Double(v) => format_real(*v),
            AttributeValue::String(v) => v.clone(),
            AttributeValue::VectorInt(v) => join(v, i32::to_string),
            AttributeValue::VectorLong(v) => join(v, i64::to_string),
            AttributeValue::VectorFloat(v) => join(v, |x| format_real32(*x)),
            AttributeValue::VectorDouble(v) => join(v, |x| format_real(*x)),
            AttributeValue::VectorString(v) => {
                if let Some(bad) = v
                    .iter()
                    .find(|s| s.is_empty() || s.chars().any(char::is_whitespace))
                {
                    return Err(Error::AttributeFormat(format!(
                        "vector element {:?} is empty or contains whitespace",
                        bad
                    )));
                }
                v.join(" ")
            }
            AttributeValue::CrossSection(v) => v.format()?,
            AttributeValue::HeavyIon(v) => v.format()?,
            AttributeValue::PdfInfo(v) => v.format()?,
            AttributeValue::AssociatedParticle(v) => v.format()?,
        })
    }
}

/// An attribute as stored in an attribute table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Attribute {
    /// Raw string awaiting conversion
    Unparsed(String),
    /// Concretely typed value
    Parsed(AttributeValue),
}

impl Attribute {
    /// Raw attribute holding `input`
    pub fn unparsed(input: impl Into<String>) -> Self {
        Attribute::Unparsed(input.into())
    }

    /// True once converted to a concrete kind
    pub fn is_parsed(&self) -> bool {
        matches!(self, Attribute::Parsed(_))
    }

    /// Kind of the parsed value, if any
    pub fn kind(&self) -> Option<AttributeKind> {
        match self {
            Attribute::Parsed(value) => Some(value.kind()),
            Attribute::Unparsed(_) => None,
        }
    }

    /// Parsed value, if any
    pub fn value(&self) -> Option<&AttributeValue> {
        match self {
            Attribute::Parsed(value) => Some(value),
            Attribute::Unparsed(_) => None,
        }
    }

    /// String form, whether parsed or not
    pub fn as_string(&self) -> Result<String> {
        match self {
            Attribute::Unparsed(raw) => Ok(raw.clone()),
            Attribute::Parsed(value) => value.to_string_repr(),
        }
    }

    /// Convert to `kind` in place
    ///
    /// Parsing an attribute that is already of `kind` is a no-op. On error the
    /// attribute is left untouched.
    pub fn parse(&mut self, kind: AttributeKind, ctx: &AttributeContext<'_>) -> Result<&AttributeValue> {
        let converted = match self {
            Attribute::Unparsed(raw) => Some(AttributeValue::from_string(kind, raw)?.init(ctx)?),
            Attribute::Parsed(_) => None,
        };
        if let Some(value) = converted {
            *self = Attribute::Parsed(value);
        }
        match &*self {
            Attribute::Parsed(value) if value.kind() == kind => Ok(value),
            Attribute::Parsed(value) => Err(Error::KindMismatch {
                expected: kind,
                found: value.kind(),
            }),
            Attribute::Unparsed(raw) => Err(Error::AttributeParse {
                kind,
                input: raw.clone(),
            }),
        }
    }

    /// Convert to `T` in place and return a copy of the value
    pub fn get<T: FromAttribute>(&mut self, ctx: &AttributeContext<'_>) -> Result<T> {
        let value = self.parse(T::KIND, ctx)?;
        T::from_value(value).ok_or(Error::KindMismatch {
            expected: T::KIND,
            found: value.kind(),
        })
    }
}

impl From<AttributeValue> for Attribute {
    fn from(value: AttributeValue) -> Self {
        Attribute::Parsed(value)
    }
}

impl From<&str> for Attribute {
    fn from(value: &str) -> Self {
        Attribute::Parsed(AttributeValue::String(value.to_string()))
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

/// Rust types that can be read out of an [`AttributeValue`]
pub trait FromAttribute: Sized {
    /// Kind an attribute must be parsed as to yield `Self`
    const KIND: AttributeKind;

    /// Extract from a value of kind [`Self::KIND`]
    fn from_value(value: &AttributeValue) -> Option<Self>;
}

macro_rules! attribute_type {
    ($ty:ty, $variant:ident) => {
        impl FromAttribute for $ty {
            const KIND: AttributeKind = AttributeKind::$variant;

            fn from_value(value: &AttributeValue) -> Option<Self> {
                match value {
                    AttributeValue::$variant(v) => Some(Clone::clone(v)),
                    _ => None,
                }
            }
        }

        impl From<$ty> for AttributeValue {
            fn from(value: $ty) -> Self {
                AttributeValue::$variant(value)
            }
        }

        impl From<$ty> for Attribute {
            fn from(value: $ty) -> Self {
                Attribute::Parsed(AttributeValue::$variant(value))
            }
        }
    };
}

attribute_type!(bool, Bool);
attribute_type!(i32, Int);
attribute_type!(i64, Long);
attribute_type!(f32, Float);
attribute_type!(f64, Double);
attribute_type!(String, String);
attribute_type!(Vec<i32>, VectorInt);
attribute_type!(Vec<i64>, VectorLong);
attribute_type!(Vec<f32>, VectorFloat);
attribute_type!(Vec<f64>, VectorDouble);
attribute_type!(Vec<String>, VectorString);
attribute_type!(CrossSection, CrossSection);
attribute_type!(HeavyIon, HeavyIon);
attribute_type!(PdfInfo, PdfInfo);
attribute_type!(AssociatedParticle, AssociatedParticle);
