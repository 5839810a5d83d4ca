//! QAP verifier for the field-arithmetic variant

use crate::prover::Proof;
use crate::qap::Qap;
use crate::scalar::Scalar;
use crate::setup::PublicParams;
use crate::timer::Timer;

pub struct Verifier<'a> {
    qap: &'a Qap,
}

impl<'a> Verifier<'a> {
    pub fn new(qap: &'a Qap) -> Self {
        Verifier { qap }
    }

    /// Accepts iff A(τ)B(τ) - C(τ) - K(τ) == H(τ)Z(τ).
    ///
    /// The public-wire shares of A, B, C together with K(τ) and Z(τ) are
    /// recomputed from the published powers of τ; τ itself is never needed.
    #[tracing::instrument(
        skip_all,
        name = "Verifier::verify",
        fields(num_inputs = inputs.len())
    )]
    pub fn verify(&self, proof: &Proof, inputs: &[Scalar], params: &PublicParams) -> bool {
        let timer = Timer::new("Verifier::verify");
        let shape = self.qap.shape();
        if inputs.len() != shape.get_num_inputs() {
            tracing::debug!(expected = shape.get_num_inputs(), "wrong number of public inputs");
            return false;
        }

        if !params.is_consistent() {
            tracing::debug!("public parameters do not match their commitment");
            return false;
        }

        let mut public = Vec::with_capacity(shape.num_public_wires());
        public.push(Scalar::one());
        public.extend_from_slice(inputs);

        let powers = &params.tau_powers;
        let (a_pub, b_pub, c_pub) = self.qap.witness_polys(&public, 0..public.len());
        let evals = (
            a_pub.evaluate_with_powers(powers),
            b_pub.evaluate_with_powers(powers),
            c_pub.evaluate_with_powers(powers),
            self.qap.K.poly().evaluate_with_powers(powers),
            self.qap.vanishing().evaluate_with_powers(powers),
        );
        let (Some(a_pub), Some(b_pub), Some(c_pub), Some(k), Some(z)) = evals else {
            tracing::debug!(max_degree = params.max_degree(), "public parameters too short");
            return false;
        };

        let a = proof.a + a_pub;
        let b = proof.b + b_pub;
        let c = proof.c + c_pub;

        let lhs = a * b - c - k;
        let rhs = proof.h * z;

        timer.stop();
        if lhs != rhs {
            tracing::debug!("QAP relation does not hold at tau");
            return false;
        }
        true
    }
}
