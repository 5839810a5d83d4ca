//! Trusted setup
//!
//! Samples the secret evaluation point τ (the toxic waste) and derives the
//! public parameters. τ stays inside `ToxicWaste`; only the prover of this
//! toy scheme is trusted with it.

use crate::errors::QapError;
use crate::pairing::{EmulatedElement, GroupLike};
use crate::qap::Qap;
use crate::random::RandomTape;
use crate::scalar::Scalar;
use crate::timer::Timer;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The secret evaluation point. Not serializable and redacted in `Debug`.
pub struct ToxicWaste {
    tau: Scalar,
}

impl ToxicWaste {
    /// Wrap an explicit point, for deterministic setups
    pub fn from_scalar(tau: Scalar) -> Self {
        ToxicWaste { tau }
    }

    pub(crate) fn tau(&self) -> &Scalar {
        &self.tau
    }
}

impl fmt::Debug for ToxicWaste {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToxicWaste").finish_non_exhaustive()
    }
}

/// Public material derived from τ
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicParams {
    /// τ^0, τ^1, ..., τ^n for n constraints
    pub tau_powers: Vec<Scalar>,
    /// g^τ mod p with g the field generator
    pub tau_commitment: Scalar,
}

impl PublicParams {
    pub fn max_degree(&self) -> usize {
        self.tau_powers.len().saturating_sub(1)
    }

    /// The powers start at 1, form a geometric sequence in τ^1, and τ^1 opens
    /// `tau_commitment`.
    pub fn is_consistent(&self) -> bool {
        let (Some(one), Some(tau)) = (self.tau_powers.first(), self.tau_powers.get(1)) else {
            return false;
        };
        if *one != Scalar::one() || commit_to(tau) != self.tau_commitment {
            return false;
        }
        self.tau_powers
            .windows(2)
            .all(|pair| pair[1] == pair[0] * *tau)
    }
}

/// g^τ as published by a discrete-log group over the field
fn commit_to(tau: &Scalar) -> Scalar {
    EmulatedElement::generator().scale(tau).image()
}

pub struct Setup;

impl Setup {
    /// Sample τ uniformly from [1, p - 1] using OS randomness bound to the statement
    pub fn sample(qap: &Qap) -> ToxicWaste {
        let mut tape = RandomTape::new(b"r1cs-qap setup");
        Self::sample_from_tape(qap, &mut tape)
    }

    /// Same as `sample` with a caller-supplied seed source
    pub fn sample_with_rng<R: RngCore>(qap: &Qap, rng: &mut R) -> ToxicWaste {
        let mut tape = RandomTape::from_rng(b"r1cs-qap setup", rng);
        Self::sample_from_tape(qap, &mut tape)
    }

    fn sample_from_tape(qap: &Qap, tape: &mut RandomTape) -> ToxicWaste {
        tape.bind(b"statement", &qap.shape().get_digest());
        ToxicWaste {
            tau: tape.random_nonzero_scalar(b"tau"),
        }
    }

    /// Derive the public parameters; fails if τ is a root of Z
    #[tracing::instrument(skip_all, name = "Setup::derive_public")]
    pub fn derive_public(qap: &Qap, toxic: &ToxicWaste) -> Result<PublicParams, QapError> {
        let timer = Timer::new("Setup::derive_public");
        let tau = toxic.tau();
        if qap.vanishing().evaluate(tau).is_zero() {
            tracing::debug!("sampled point is a constraint index");
            return Err(QapError::DegenerateChallenge);
        }

        let max_degree = qap.vanishing().degree();
        let mut tau_powers = Vec::with_capacity(max_degree + 1);
        let mut power = Scalar::one();
        for _ in 0..=max_degree {
            tau_powers.push(power);
            power *= *tau;
        }

        timer.stop();
        Ok(PublicParams {
            tau_powers,
            tau_commitment: commit_to(tau),
        })
    }
}
