//! QAP prover
//!
//! Evaluates the witness-weighted column polynomials at the secret point and
//! divides by Z(τ) in the field. The division stands in for exact polynomial
//! division, which is sound only because the witness is checked first.

use crate::errors::QapError;
use crate::qap::Qap;
use crate::r1cs::Witness;
use crate::scalar::Scalar;
use crate::setup::{PublicParams, ToxicWaste};
use crate::timer::Timer;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde::{Deserialize, Serialize};

/// Proof for the field-arithmetic variant.
///
/// `a`, `b` and `c` are the private-wire shares of A(τ), B(τ) and C(τ), not
/// the full values: the verifier adds the share of the constant wire and the
/// public inputs from the published powers of τ. `c` is part of the proof
/// because C(τ) depends on private wires. `h` is the full quotient H(τ).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    CanonicalSerialize,
    CanonicalDeserialize,
)]
pub struct Proof {
    pub a: Scalar,
    pub b: Scalar,
    pub c: Scalar,
    pub h: Scalar,
}

impl Proof {
    pub const SIZE: usize = 64;

    /// Fixed-size encoding: four little-endian 128-bit integers (a, b, c, h)
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        for (chunk, s) in bytes
            .chunks_exact_mut(16)
            .zip([self.a, self.b, self.c, self.h].iter())
        {
            chunk.copy_from_slice(&s.to_bytes());
        }
        bytes
    }

    pub fn from_bytes(bytes: &[u8; Self::SIZE]) -> Result<Self, QapError> {
        let mut scalars = [Scalar::zero(); 4];
        for (s, chunk) in scalars.iter_mut().zip(bytes.chunks_exact(16)) {
            let mut buf = [0u8; 16];
            buf.copy_from_slice(chunk);
            *s = Scalar::from_bytes(&buf).ok_or(QapError::InvalidScalar)?;
        }
        let [a, b, c, h] = scalars;
        Ok(Proof { a, b, c, h })
    }
}

/// H(τ) = Q(τ) / Z(τ)
pub fn quotient_at(q: &Scalar, z: &Scalar) -> Result<Scalar, QapError> {
    Ok(*q * z.invert()?)
}

pub struct Prover<'a> {
    qap: &'a Qap,
}

impl<'a> Prover<'a> {
    pub fn new(qap: &'a Qap) -> Self {
        Prover { qap }
    }

    #[tracing::instrument(
        skip_all,
        name = "Prover::prove",
        fields(num_cons = self.qap.shape().get_num_cons())
    )]
    pub fn prove(
        &self,
        witness: &Witness,
        params: &PublicParams,
        toxic: &ToxicWaste,
    ) -> Result<Proof, QapError> {
        let timer = Timer::new("Prover::prove");
        if !self.qap.shape().is_sat(witness) {
            tracing::debug!("refusing to prove an unsatisfying witness");
            return Err(QapError::InvalidWitness);
        }
        if params.tau_powers.get(1) != Some(toxic.tau()) || !params.is_consistent() {
            return Err(QapError::SetupMismatch);
        }

        let tau = toxic.tau();
        let evals = self.qap.evaluate_at(tau);
        if evals.Z.is_zero() {
            return Err(QapError::DegenerateChallenge);
        }

        let z = witness.z();
        let num_public = self.qap.shape().num_public_wires();
        let (a, b, c) = evals.combine(&z, 0..z.len());
        let (a_priv, b_priv, c_priv) = evals.combine(&z, num_public..z.len());

        let q = a * b - c - evals.K;
        let h = quotient_at(&q, &evals.Z)?;

        timer.stop();
        Ok(Proof {
            a: a_priv,
            b: b_priv,
            c: c_priv,
            h,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r1cs::SquareCircuit;
    use crate::setup::Setup;
    use crate::verifier::Verifier;

    fn setup_at(qap: &Qap, tau: u64) -> (PublicParams, ToxicWaste) {
        let toxic = ToxicWaste::from_scalar(Scalar::from_u64(tau));
        let params = Setup::derive_public(qap, &toxic).unwrap();
        (params, toxic)
    }

    #[test]
    fn test_reference_values() {
        // tau = 3: L_1(3) = -1, L_2(3) = 2, Z(3) = 2
        let circuit = SquareCircuit::new(25);
        let qap = Qap::from_r1cs(&circuit.shape().unwrap()).unwrap();
        let (params, toxic) = setup_at(&qap, 3);

        let proof = Prover::new(&qap)
            .prove(&circuit.witness(&Scalar::from_u64(5)), &params, &toxic)
            .unwrap();

        // A(3) = 5 * L_1 + 25 * L_2 = 45, B(3) = 5 * L_1 + L_2 = -3 (private share -5)
        // C(3) = 25 * L_1 = -25, K(3) = 25 * L_2 = 50
        // H = (45 * -3 + 25 - 50) / 2 = -80
        assert_eq!(proof.a, Scalar::from_u64(45));
        assert_eq!(proof.b, -Scalar::from_u64(5));
        assert_eq!(proof.c, -Scalar::from_u64(25));
        assert_eq!(proof.h, -Scalar::from_u64(80));
    }

    #[test]
    fn test_invalid_witness_rejected() {
        let circuit = SquareCircuit::new(25);
        let qap = Qap::from_r1cs(&circuit.shape().unwrap()).unwrap();
        let (params, toxic) = setup_at(&qap, 1234);
        let prover = Prover::new(&qap);
        for x in [4u64, 7, 9] {
            let res = prover.prove(&circuit.witness(&Scalar::from_u64(x)), &params, &toxic);
            assert_eq!(res, Err(QapError::InvalidWitness));
        }
    }

    #[test]
    fn test_mismatched_setup_rejected() {
        let circuit = SquareCircuit::new(25);
        let qap = Qap::from_r1cs(&circuit.shape().unwrap()).unwrap();
        let (params, _) = setup_at(&qap, 1234);
        let other = ToxicWaste::from_scalar(Scalar::from_u64(4321));
        let res = Prover::new(&qap).prove(&circuit.witness(&Scalar::from_u64(5)), &params, &other);
        assert_eq!(res, Err(QapError::SetupMismatch));

        let (mut params, toxic) = setup_at(&qap, 1234);
        params.tau_commitment = Scalar::generator().pow(4321);
        let res = Prover::new(&qap).prove(&circuit.witness(&Scalar::from_u64(5)), &params, &toxic);
        assert_eq!(res, Err(QapError::SetupMismatch));
    }

    #[test]
    fn test_degenerate_point_rejected_by_prover() {
        let circuit = SquareCircuit::new(25);
        let qap = Qap::from_r1cs(&circuit.shape().unwrap()).unwrap();
        let toxic = ToxicWaste::from_scalar(Scalar::from_u64(2));
        // Parameters forged around the setup check
        let params = PublicParams {
            tau_powers: vec![Scalar::one(), Scalar::from_u64(2), Scalar::from_u64(4)],
            tau_commitment: Scalar::generator().pow(2),
        };
        let res = Prover::new(&qap).prove(&circuit.witness(&Scalar::from_u64(5)), &params, &toxic);
        assert_eq!(res, Err(QapError::DegenerateChallenge));
    }

    #[test]
    fn test_quotient_at_zero_is_division_by_zero() {
        let qap = Qap::from_r1cs(&SquareCircuit::new(25).shape().unwrap()).unwrap();
        let z = qap.vanishing().evaluate(&Scalar::from_u64(1));
        assert_eq!(
            quotient_at(&Scalar::from_u64(7), &z),
            Err(QapError::DivisionByZero)
        );
    }

    #[test]
    fn test_bypassed_guard_does_not_verify() {
        // A cheating prover without the satisfaction guard still has to produce
        // a polynomial H(X); the remainder of the division shows up at tau.
        let circuit = SquareCircuit::new(25);
        let qap = Qap::from_r1cs(&circuit.shape().unwrap()).unwrap();
        let mut rng = ark_std::test_rng();

        for x in [4u64, 7, 9] {
            let toxic = Setup::sample_with_rng(&qap, &mut rng);
            let params = Setup::derive_public(&qap, &toxic).unwrap();
            let witness = circuit.witness(&Scalar::from_u64(x));
            let z = witness.z();

            let evals = qap.evaluate_at(toxic.tau());
            let (a, b, c) = evals.combine(&z, 1..z.len());
            let (h_poly, rem) = qap.quotient_and_remainder(&witness).unwrap();
            assert!(!rem.is_zero());

            let forged = Proof {
                a,
                b,
                c,
                h: h_poly.evaluate(toxic.tau()),
            };
            assert!(!Verifier::new(&qap).verify(&forged, &[], &params));
        }
    }

    #[test]
    fn test_proof_bytes_roundtrip() {
        let circuit = SquareCircuit::new(25);
        let qap = Qap::from_r1cs(&circuit.shape().unwrap()).unwrap();
        let (params, toxic) = setup_at(&qap, 987_654_321);
        let proof = Prover::new(&qap)
            .prove(&circuit.witness(&Scalar::from_u64(5)), &params, &toxic)
            .unwrap();

        let bytes = proof.to_bytes();
        assert_eq!(Proof::from_bytes(&bytes).unwrap(), proof);

        let mut compressed = Vec::new();
        proof.serialize_compressed(&mut compressed).unwrap();
        assert_eq!(compressed.len(), Proof::SIZE);
        assert_eq!(Proof::deserialize_compressed(&compressed[..]).unwrap(), proof);

        let mut bad = bytes;
        bad[..16].copy_from_slice(&u128::MAX.to_le_bytes());
        assert_eq!(Proof::from_bytes(&bad), Err(QapError::InvalidScalar));
    }
}
