//! Random tape for setup randomness

use crate::scalar::Scalar;
use crate::transcript::ProofTranscript;
use merlin::Transcript;
use rand::rngs::OsRng;
use rand::RngCore;

/// Random tape seeded from the OS and bound to a statement digest
pub struct RandomTape {
    tape: Transcript,
}

impl RandomTape {
    pub fn new(name: &'static [u8]) -> Self {
        Self::from_rng(name, &mut OsRng)
    }

    pub fn from_rng<R: RngCore>(name: &'static [u8], rng: &mut R) -> Self {
        let mut tape = Transcript::new(name);
        tape.append_scalar(b"init_randomness", &Scalar::random(rng));
        Self { tape }
    }

    /// Mix the statement digest into every subsequent draw
    pub fn bind(&mut self, label: &'static [u8], digest: &[u8]) {
        self.tape.append_message(label, digest);
    }

    pub fn random_scalar(&mut self, label: &'static [u8]) -> Scalar {
        self.tape.challenge_scalar(label)
    }

    pub fn random_nonzero_scalar(&mut self, label: &'static [u8]) -> Scalar {
        self.tape.challenge_nonzero_scalar(label)
    }
}
