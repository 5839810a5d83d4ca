//! Mersenne-127 scalar field wrapper
//! Field elements live in [0, p) with p = 2^127 - 1.

use crate::errors::QapError;
use ark_ff::fields::{Fp128, MontBackend, MontConfig};
use ark_ff::{FftField, Field, One, PrimeField, UniformRand, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::RngCore;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// The field modulus 2^127 - 1.
pub const MODULUS: u128 = (1u128 << 127) - 1;

/// 43 is the smallest primitive root of 2^127 - 1.
#[derive(MontConfig)]
#[modulus = "170141183460469231731687303715884105727"]
#[generator = "43"]
pub struct M127Config;

pub type Fp127 = Fp128<MontBackend<M127Config, 2>>;

/// Wrapper around the Mersenne-127 prime field element
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, CanonicalSerialize, CanonicalDeserialize,
)]
pub struct Scalar(pub Fp127);

impl Scalar {
    /// The zero scalar
    pub fn zero() -> Self {
        Scalar(Fp127::zero())
    }

    /// The one scalar
    pub fn one() -> Self {
        Scalar(Fp127::one())
    }

    /// Multiplicative generator of the field, used as the commitment base
    pub fn generator() -> Self {
        Scalar(Fp127::GENERATOR)
    }

    /// Generate a uniformly random scalar in [0, p)
    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        Scalar(Fp127::rand(rng))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Compute the multiplicative inverse
    pub fn invert(&self) -> Result<Self, QapError> {
        self.0.inverse().map(Scalar).ok_or(QapError::DivisionByZero)
    }

    /// Create from u64
    pub fn from_u64(val: u64) -> Self {
        Scalar(Fp127::from(val))
    }

    /// Create from u128, reducing modulo p
    pub fn from_u128(val: u128) -> Self {
        Scalar(Fp127::from_le_bytes_mod_order(&val.to_le_bytes()))
    }

    /// Canonical integer representative in [0, p)
    pub fn to_u128(&self) -> u128 {
        let limbs = self.0.into_bigint().0;
        ((limbs[1] as u128) << 64) | limbs[0] as u128
    }

    /// Convert to bytes (little-endian, 16 bytes)
    pub fn to_bytes(&self) -> [u8; 16] {
        self.to_u128().to_le_bytes()
    }

    /// Create from bytes (little-endian, 16 bytes); rejects non-canonical encodings
    pub fn from_bytes(bytes: &[u8; 16]) -> Option<Self> {
        let val = u128::from_le_bytes(*bytes);
        if val >= MODULUS {
            return None;
        }
        Some(Self::from_u128(val))
    }

    /// Square the scalar
    pub fn square(&self) -> Self {
        Scalar(self.0.square())
    }

    /// Raise to a power
    pub fn pow(&self, exp: u128) -> Self {
        Scalar(self.0.pow([exp as u64, (exp >> 64) as u64]))
    }
}

impl From<u64> for Scalar {
    fn from(val: u64) -> Self {
        Scalar::from_u64(val)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_u128())
    }
}

// Arithmetic operations
impl Add for Scalar {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Scalar(self.0 + rhs.0)
    }
}

impl Sub for Scalar {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Scalar(self.0 - rhs.0)
    }
}

impl Mul for Scalar {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Scalar(self.0 * rhs.0)
    }
}

impl Neg for Scalar {
    type Output = Self;
    fn neg(self) -> Self {
        Scalar(-self.0)
    }
}

impl AddAssign for Scalar {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Scalar {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl MulAssign for Scalar {
    fn mul_assign(&mut self, rhs: Self) {
        self.0 *= rhs.0;
    }
}

impl std::iter::Sum for Scalar {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Scalar::zero(), |acc, x| acc + x)
    }
}

impl<'a> std::iter::Sum<&'a Scalar> for Scalar {
    fn sum<I: Iterator<Item = &'a Scalar>>(iter: I) -> Self {
        iter.fold(Scalar::zero(), |acc, x| acc + *x)
    }
}

impl std::iter::Product for Scalar {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Scalar::one(), |acc, x| acc * x)
    }
}

// Serde support: one 128-bit integer per element
impl serde::Serialize for Scalar {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_u128().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Scalar {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let val: u128 = serde::Deserialize::deserialize(deserializer)?;
        if val >= MODULUS {
            return Err(serde::de::Error::custom("scalar not reduced modulo p"));
        }
        Ok(Scalar::from_u128(val))
    }
}
