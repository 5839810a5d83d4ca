//! Pairing capability used by the committed variant
//!
//! `FakePairing` emulates a bilinear map with plain modular multiplication:
//! group elements carry their discrete logarithm, so the "pairing" of two
//! elements is the product of their exponents. It offers no hiding at all and
//! exists so the protocol can be exercised without a pairing-friendly curve.
//! A real backend implements the same two traits.

use crate::scalar::Scalar;
use core::borrow::Borrow;
use std::fmt::Debug;

/// Additively written group with scalar multiplication
pub trait GroupLike: Copy + Debug + PartialEq + Eq {
    fn identity() -> Self;
    fn generator() -> Self;
    fn add(&self, other: &Self) -> Self;
    fn scale(&self, s: &Scalar) -> Self;

    /// Multi-scalar multiplication sum_i scalars[i] * bases[i]
    fn msm<I, J>(scalars: I, bases: J) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<Scalar>,
        J: IntoIterator,
        J::Item: Borrow<Self>,
    {
        scalars
            .into_iter()
            .zip(bases)
            .fold(Self::identity(), |acc, (s, g)| {
                acc.add(&g.borrow().scale(s.borrow()))
            })
    }
}

/// Bilinear map e: G1 x G2 -> Gt
pub trait PairingLike {
    type G1: GroupLike;
    type G2: GroupLike;
    type Gt: Copy + Debug + PartialEq + Eq;

    fn pairing(p: &Self::G1, q: &Self::G2) -> Self::Gt;

    /// Group operation in Gt (written multiplicatively)
    fn gt_mul(a: &Self::Gt, b: &Self::Gt) -> Self::Gt;
}

/// Group element represented by its exponent with respect to the generator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmulatedElement(Scalar);

impl EmulatedElement {
    /// g^e mod p, the value a discrete-log group would publish
    pub fn image(&self) -> Scalar {
        Scalar::generator().pow(self.0.to_u128())
    }
}

impl GroupLike for EmulatedElement {
    fn identity() -> Self {
        EmulatedElement(Scalar::zero())
    }

    fn generator() -> Self {
        EmulatedElement(Scalar::one())
    }

    fn add(&self, other: &Self) -> Self {
        EmulatedElement(self.0 + other.0)
    }

    fn scale(&self, s: &Scalar) -> Self {
        EmulatedElement(self.0 * *s)
    }
}

/// Target-group element, again carried as an exponent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmulatedGt(Scalar);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FakePairing;

impl PairingLike for FakePairing {
    type G1 = EmulatedElement;
    type G2 = EmulatedElement;
    type Gt = EmulatedGt;

    fn pairing(p: &EmulatedElement, q: &EmulatedElement) -> EmulatedGt {
        EmulatedGt(p.0 * q.0)
    }

    fn gt_mul(a: &EmulatedGt, b: &EmulatedGt) -> EmulatedGt {
        EmulatedGt(a.0 + b.0)
    }
}
