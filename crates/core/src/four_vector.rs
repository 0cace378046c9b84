//! Four-component vector used for momenta and positions
//!
//! The same type carries both interpretations:
//! - momentum: (px, py, pz, e)
//! - position: (x, y, z, t)
//!
//! Accessors for both naming schemes read the same components.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Generic four-vector
///
/// Plain value type with no identity. Components are stored as
/// `x, y, z, t`; `px/py/pz/e` are aliases for the same fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FourVector {
    x: f64,
    y: f64,
    z: f64,
    t: f64,
}

impl FourVector {
    /// The zero vector
    pub const ZERO: FourVector = FourVector {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        t: 0.0,
    };

    /// Create a new four-vector
    pub const fn new(x: f64, y: f64, z: f64, t: f64) -> Self {
        Self { x, y, z, t }
    }

    /// x component
    pub fn x(&self) -> f64 {
        self.x
    }

    /// y component
    pub fn y(&self) -> f64 {
        self.y
    }

    /// z component
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Time component
    pub fn t(&self) -> f64 {
        self.t
    }

    /// x momentum component
    pub fn px(&self) -> f64 {
        self.x
    }

    /// y momentum component
    pub fn py(&self) -> f64 {
        self.y
    }

    /// z momentum component
    pub fn pz(&self) -> f64 {
        self.z
    }

    /// Energy component
    pub fn e(&self) -> f64 {
        self.t
    }

    /// Set x component
    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    /// Set y component
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Set z component
    pub fn set_z(&mut self, z: f64) {
        self.z = z;
    }

    /// Set time component
    pub fn set_t(&mut self, t: f64) {
        self.t = t;
    }

    /// Set all four components
    pub fn set(&mut self, x: f64, y: f64, z: f64, t: f64) {
        *self = Self::new(x, y, z, t);
    }

    /// True if every component is exactly zero
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0 && self.t == 0.0
    }

    /// Squared magnitude of the spatial part
    pub fn length2(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Magnitude of the spatial part
    pub fn length(&self) -> f64 {
        self.length2().sqrt()
    }

    /// Squared transverse component (x-y plane)
    pub fn perp2(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Transverse component (pT for momenta)
    pub fn perp(&self) -> f64 {
        self.perp2().sqrt()
    }

    /// Alias of [`perp`](Self::perp) for momenta
    pub fn pt(&self) -> f64 {
        self.perp()
    }

    /// Spacetime interval `t² - |r|²` (squared invariant mass for momenta)
    pub fn interval(&self) -> f64 {
        self.t * self.t - self.length2()
    }

    /// Alias of [`interval`](Self::interval)
    pub fn m2(&self) -> f64 {
        self.interval()
    }

    /// Invariant mass; negative when the interval is spacelike
    pub fn m(&self) -> f64 {
        let mm = self.m2();
        if mm > 0.0 {
            mm.sqrt()
        } else {
            -(-mm).sqrt()
        }
    }

    /// Azimuthal angle in (-π, π]
    pub fn phi(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Polar angle
    pub fn theta(&self) -> f64 {
        self.perp().atan2(self.z)
    }

    /// Pseudorapidity
    ///
    /// Infinite (with the sign of z) for vectors along the beam axis.
    pub fn eta(&self) -> f64 {
        let p = self.length();
        if p == self.z.abs() {
            return if self.z >= 0.0 {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
        }
        0.5 * ((p + self.z) / (p - self.z)).ln()
    }

    /// Alias of [`eta`](Self::eta)
    pub fn pseudo_rapidity(&self) -> f64 {
        self.eta()
    }

    /// Rapidity
    ///
    /// Infinite (with the sign of z) when `|e| == |pz|`.
    pub fn rap(&self) -> f64 {
        if self.t == self.z.abs() || self.t == -self.z.abs() {
            return if self.z >= 0.0 {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
        }
        0.5 * ((self.t + self.z) / (self.t - self.z)).ln()
    }

    /// Alias of [`rap`](Self::rap)
    pub fn rapidity(&self) -> f64 {
        self.rap()
    }

    /// Absolute pseudorapidity
    pub fn abs_eta(&self) -> f64 {
        self.eta().abs()
    }

    /// Absolute rapidity
    pub fn abs_rap(&self) -> f64 {
        self.rap().abs()
    }

    /// Signed azimuthal difference, wrapped into [-π, π)
    pub fn delta_phi(&self, other: &FourVector) -> f64 {
        let mut dphi = self.phi() - other.phi();
        while dphi >= PI {
            dphi -= 2.0 * PI;
        }
        while dphi < -PI {
            dphi += 2.0 * PI;
        }
        dphi
    }

    /// Pseudorapidity difference
    pub fn delta_eta(&self, other: &FourVector) -> f64 {
        self.eta() - other.eta()
    }

    /// Rapidity difference
    pub fn delta_rap(&self, other: &FourVector) -> f64 {
        self.rap() - other.rap()
    }

    /// Cone distance in (eta, phi)
    pub fn delta_r_eta(&self, other: &FourVector) -> f64 {
        self.delta_eta(other).hypot(self.delta_phi(other))
    }

    /// Cone distance in (rapidity, phi)
    pub fn delta_r_rap(&self, other: &FourVector) -> f64 {
        self.delta_rap(other).hypot(self.delta_phi(other))
    }

    /// Component-wise comparison with an absolute tolerance
    pub fn is_close(&self, other: &FourVector, eps: f64) -> bool {
        (self.x - other.x).abs() < eps
            && (self.y - other.y).abs() < eps
            && (self.z - other.z).abs() < eps
            && (self.t - other.t).abs() < eps
    }
}

impl Add for FourVector {
    type Output = FourVector;

    fn add(self, rhs: FourVector) -> FourVector {
        FourVector::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.t + rhs.t)
    }
}

impl Sub for FourVector {
    type Output = FourVector;

    fn sub(self, rhs: FourVector) -> FourVector {
        FourVector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.t - rhs.t)
    }
}

impl Neg for FourVector {
    type Output = FourVector;

    fn neg(self) -> FourVector {
        FourVector::new(-self.x, -self.y, -self.z, -self.t)
    }
}

impl Mul<f64> for FourVector {
    type Output = FourVector;

    fn mul(self, rhs: f64) -> FourVector {
        FourVector::new(self.x * rhs, self.y * rhs, self.z * rhs, self.t * rhs)
    }
}

impl Mul<FourVector> for f64 {
    type Output = FourVector;

    fn mul(self, rhs: FourVector) -> FourVector {
        rhs * self
    }
}

impl Div<f64> for FourVector {
    type Output = FourVector;

    fn div(self, rhs: f64) -> FourVector {
        FourVector::new(self.x / rhs, self.y / rhs, self.z / rhs, self.t / rhs)
    }
}

impl AddAssign for FourVector {
    fn add_assign(&mut self, rhs: FourVector) {
        *self = *self + rhs;
    }
}

impl SubAssign for FourVector {
    fn sub_assign(&mut self, rhs: FourVector) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for FourVector {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl DivAssign<f64> for FourVector {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl fmt::Display for FourVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.t)
    }
}
