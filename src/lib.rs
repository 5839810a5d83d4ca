//! R1CS to QAP proving pipeline over the Mersenne field 2^127 - 1
//!
//! A constraint system (A, B, C, K) is interpolated column by column into a
//! quadratic arithmetic program. A trusted setup samples a secret point τ,
//! the prover evaluates the program at τ and the verifier checks a single
//! field identity.
//!
//! # Field variant
//! `Setup`, `Prover` and `Verifier`: the proof is four field elements and the
//! verifier checks A·B - C - K == H·Z at τ using the published powers of τ.
//!
//! # Committed variant
//! `CommittedParams`, `CommittedProver` and `CommittedVerifier`: the same
//! relation checked through a `PairingLike` backend. `FakePairing` is an
//! exponent-tracking emulation, not a cryptographic group.

#![allow(non_snake_case)]

pub mod committed;
pub mod errors;
pub mod pairing;
pub mod prover;
pub mod qap;
pub mod r1cs;
pub mod random;
pub mod scalar;
pub mod setup;
pub mod timer;
pub mod transcript;
pub mod unipoly;
pub mod verifier;

// Re-exports
pub use committed::{CommittedParams, CommittedProof, CommittedProver, CommittedVerifier};
pub use errors::QapError;
pub use pairing::{EmulatedElement, FakePairing, GroupLike, PairingLike};
pub use prover::{Proof, Prover};
pub use qap::{ColumnPoly, LagrangeBasis, LagrangeSet, Qap, QapEvaluation};
pub use r1cs::{R1CSShape, SquareCircuit, Witness};
pub use random::RandomTape;
pub use scalar::{Scalar, MODULUS};
pub use setup::{PublicParams, Setup, ToxicWaste};
pub use unipoly::UniPoly;
pub use verifier::Verifier;
