//! Committed variant of the QAP argument
//!
//! The setup publishes [τ^i] in both source groups (KZG-style powers of tau).
//! The prover commits to its private polynomials with those powers and never
//! sees τ; the verifier checks
//!
//!   e(πA + [A_pub], πB + [B_pub]) == e(πH, [Z]) · e(πC + [C_pub + K], g2)
//!
//! through a `PairingLike` backend.

use crate::errors::QapError;
use crate::pairing::{GroupLike, PairingLike};
use crate::qap::Qap;
use crate::r1cs::Witness;
use crate::scalar::Scalar;
use crate::setup::ToxicWaste;
use crate::timer::Timer;
use crate::unipoly::UniPoly;

/// Powers of tau in G1 and G2: [τ^0], [τ^1], ..., [τ^n]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommittedParams<P: PairingLike> {
    pub powers_g1: Vec<P::G1>,
    pub powers_g2: Vec<P::G2>,
}

impl<P: PairingLike> CommittedParams<P> {
    #[tracing::instrument(skip_all, name = "CommittedParams::derive")]
    pub fn derive(qap: &Qap, toxic: &ToxicWaste) -> Result<Self, QapError> {
        let timer = Timer::new("CommittedParams::derive");
        let tau = toxic.tau();
        if qap.vanishing().evaluate(tau).is_zero() {
            return Err(QapError::DegenerateChallenge);
        }

        let max_degree = qap.vanishing().degree();
        let mut powers_g1 = Vec::with_capacity(max_degree + 1);
        let mut powers_g2 = Vec::with_capacity(max_degree + 1);
        let mut tau_power = Scalar::one();
        for _ in 0..=max_degree {
            powers_g1.push(P::G1::generator().scale(&tau_power));
            powers_g2.push(P::G2::generator().scale(&tau_power));
            tau_power *= *tau;
        }

        timer.stop();
        Ok(CommittedParams {
            powers_g1,
            powers_g2,
        })
    }

    pub fn max_degree(&self) -> usize {
        self.powers_g1.len().saturating_sub(1)
    }
}

/// C = sum_i coeffs[i] * [τ^i]
fn commit<G: GroupLike>(poly: &UniPoly, powers: &[G]) -> Result<G, QapError> {
    if poly.coeffs().len() > powers.len() {
        return Err(QapError::InvalidDimensions(format!(
            "polynomial degree {} exceeds setup size {}",
            poly.degree(),
            powers.len()
        )));
    }
    Ok(G::msm(poly.coeffs(), &powers[..poly.coeffs().len()]))
}

/// Proof with every element committed into the pairing groups
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommittedProof<P: PairingLike> {
    pub a: P::G1,
    pub b: P::G2,
    pub c: P::G1,
    pub h: P::G1,
}

pub struct CommittedProver<'a> {
    qap: &'a Qap,
}

impl<'a> CommittedProver<'a> {
    pub fn new(qap: &'a Qap) -> Self {
        CommittedProver { qap }
    }

    #[tracing::instrument(skip_all, name = "CommittedProver::prove")]
    pub fn prove<P: PairingLike>(
        &self,
        witness: &Witness,
        params: &CommittedParams<P>,
    ) -> Result<CommittedProof<P>, QapError> {
        let timer = Timer::new("CommittedProver::prove");
        if !self.qap.shape().is_sat(witness) {
            return Err(QapError::InvalidWitness);
        }

        let z = witness.z();
        let num_public = self.qap.shape().num_public_wires();
        let (a, b, c) = self.qap.witness_polys(&z, num_public..z.len());
        let h = self.qap.quotient_poly(witness)?;

        let proof = CommittedProof {
            a: commit(&a, &params.powers_g1)?,
            b: commit(&b, &params.powers_g2)?,
            c: commit(&c, &params.powers_g1)?,
            h: commit(&h, &params.powers_g1)?,
        };
        timer.stop();
        Ok(proof)
    }
}

pub struct CommittedVerifier<'a> {
    qap: &'a Qap,
}

impl<'a> CommittedVerifier<'a> {
    pub fn new(qap: &'a Qap) -> Self {
        CommittedVerifier { qap }
    }

    #[tracing::instrument(skip_all, name = "CommittedVerifier::verify")]
    pub fn verify<P: PairingLike>(
        &self,
        proof: &CommittedProof<P>,
        inputs: &[Scalar],
        params: &CommittedParams<P>,
    ) -> bool {
        let shape = self.qap.shape();
        if inputs.len() != shape.get_num_inputs() {
            return false;
        }

        let mut public = Vec::with_capacity(shape.num_public_wires());
        public.push(Scalar::one());
        public.extend_from_slice(inputs);

        let (a_pub, b_pub, c_pub) = self.qap.witness_polys(&public, 0..public.len());
        let public_term = &c_pub + self.qap.K.poly();

        let commitments = (
            commit(&a_pub, &params.powers_g1),
            commit(&b_pub, &params.powers_g2),
            commit(&public_term, &params.powers_g1),
            commit(self.qap.vanishing(), &params.powers_g2),
        );
        let (Ok(a_pub), Ok(b_pub), Ok(public_term), Ok(z)) = commitments else {
            tracing::debug!(max_degree = params.max_degree(), "setup too small for statement");
            return false;
        };

        let lhs = P::pairing(&proof.a.add(&a_pub), &proof.b.add(&b_pub));
        let rhs = P::gt_mul(
            &P::pairing(&proof.h, &z),
            &P::pairing(&proof.c.add(&public_term), &P::G2::generator()),
        );
        lhs == rhs
    }
}
