//! Merlin transcript extensions for Mersenne-127 scalars

use crate::scalar::{Fp127, Scalar};
use ark_ff::PrimeField;
use merlin::Transcript;

/// Extension trait for Transcript to absorb and squeeze Scalars
pub trait ProofTranscript {
    /// Append a scalar to the transcript
    fn append_scalar(&mut self, label: &'static [u8], scalar: &Scalar);

    /// Get a challenge scalar from the transcript
    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar;

    /// Get a challenge scalar in [1, p - 1]
    fn challenge_nonzero_scalar(&mut self, label: &'static [u8]) -> Scalar;
}

impl ProofTranscript for Transcript {
    fn append_scalar(&mut self, label: &'static [u8], scalar: &Scalar) {
        self.append_message(label, &scalar.to_bytes());
    }

    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar {
        // 64 bytes reduced mod a 127-bit prime leaves a negligible bias
        let mut buf = [0u8; 64];
        self.challenge_bytes(label, &mut buf);
        Scalar(Fp127::from_le_bytes_mod_order(&buf))
    }

    fn challenge_nonzero_scalar(&mut self, label: &'static [u8]) -> Scalar {
        loop {
            let s = self.challenge_scalar(label);
            if !s.is_zero() {
                return s;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenges_are_deterministic() {
        let mut t1 = Transcript::new(b"test");
        let mut t2 = Transcript::new(b"test");
        t1.append_scalar(b"x", &Scalar::from_u64(5));
        t2.append_scalar(b"x", &Scalar::from_u64(5));
        assert_eq!(t1.challenge_scalar(b"c"), t2.challenge_scalar(b"c"));

        let mut t3 = Transcript::new(b"test");
        t3.append_scalar(b"x", &Scalar::from_u64(6));
        assert_ne!(t1.challenge_scalar(b"c"), t3.challenge_scalar(b"c"));
    }
}
