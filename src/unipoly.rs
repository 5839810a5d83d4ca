//! Univariate polynomial representation
//! Dense coefficients, lowest degree first.

use crate::errors::QapError;
use crate::scalar::Scalar;
use std::ops::{Add, Mul, Sub};

/// Univariate polynomial in coefficient form
/// ax^2 + bx + c stored as vec![c, b, a]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UniPoly {
    coeffs: Vec<Scalar>,
}

impl UniPoly {
    pub fn new(coeffs: Vec<Scalar>) -> Self {
        let mut poly = UniPoly { coeffs };
        poly.trim();
        poly
    }

    pub fn zero() -> Self {
        UniPoly { coeffs: vec![] }
    }

    pub fn constant(c: Scalar) -> Self {
        Self::new(vec![c])
    }

    /// The monic linear polynomial x - root
    pub fn linear(root: Scalar) -> Self {
        Self::new(vec![-root, Scalar::one()])
    }

    /// Vanishing polynomial (x - 1)(x - 2)...(x - n)
    pub fn vanishing(n: usize) -> Self {
        (1..=n as u64).fold(Self::constant(Scalar::one()), |acc, i| {
            &acc * &Self::linear(Scalar::from_u64(i))
        })
    }

    fn trim(&mut self) {
        while self.coeffs.last().is_some_and(|c| c.is_zero()) {
            self.coeffs.pop();
        }
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree of the polynomial; the zero polynomial reports 0
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn coeffs(&self) -> &[Scalar] {
        &self.coeffs
    }

    pub fn as_vec(&self) -> Vec<Scalar> {
        self.coeffs.clone()
    }

    pub fn evaluate(&self, r: &Scalar) -> Scalar {
        self.coeffs
            .iter()
            .rev()
            .fold(Scalar::zero(), |acc, c| acc * *r + *c)
    }

    /// Evaluate from precomputed powers r^0, r^1, ...
    /// Returns `None` when too few powers are supplied.
    pub fn evaluate_with_powers(&self, powers: &[Scalar]) -> Option<Scalar> {
        if powers.len() < self.coeffs.len() {
            return None;
        }
        Some(
            self.coeffs
                .iter()
                .zip(powers.iter())
                .map(|(c, p)| *c * *p)
                .sum(),
        )
    }

    pub fn scale(&self, s: &Scalar) -> Self {
        Self::new(self.coeffs.iter().map(|c| *c * *s).collect())
    }

    /// Long division by `divisor`, returning (quotient, remainder)
    pub fn div_rem(&self, divisor: &UniPoly) -> Result<(UniPoly, UniPoly), QapError> {
        let lead = divisor.coeffs.last().ok_or(QapError::DivisionByZero)?;
        let lead_inv = lead.invert()?;

        if self.coeffs.len() < divisor.coeffs.len() {
            return Ok((UniPoly::zero(), self.clone()));
        }

        let d = divisor.degree();
        let mut rem = self.coeffs.clone();
        let mut quotient = vec![Scalar::zero(); rem.len() - d];

        for i in (0..quotient.len()).rev() {
            let q = rem[i + d] * lead_inv;
            quotient[i] = q;
            for (j, dc) in divisor.coeffs.iter().enumerate() {
                rem[i + j] -= q * *dc;
            }
        }
        rem.truncate(d);

        Ok((UniPoly::new(quotient), UniPoly::new(rem)))
    }
}

impl Add for &UniPoly {
    type Output = UniPoly;
    fn add(self, rhs: &UniPoly) -> UniPoly {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let coeffs = (0..len)
            .map(|i| {
                let a = self.coeffs.get(i).copied().unwrap_or_else(Scalar::zero);
                let b = rhs.coeffs.get(i).copied().unwrap_or_else(Scalar::zero);
                a + b
            })
            .collect();
        UniPoly::new(coeffs)
    }
}

impl Sub for &UniPoly {
    type Output = UniPoly;
    fn sub(self, rhs: &UniPoly) -> UniPoly {
        self + &rhs.scale(&-Scalar::one())
    }
}

impl Mul for &UniPoly {
    type Output = UniPoly;
    fn mul(self, rhs: &UniPoly) -> UniPoly {
        if self.is_zero() || rhs.is_zero() {
            return UniPoly::zero();
        }
        let mut coeffs = vec![Scalar::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += *a * *b;
            }
        }
        UniPoly::new(coeffs)
    }
}
