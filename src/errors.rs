//! Error types for the R1CS/QAP pipeline

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QapError {
    #[error("Attempted to invert zero modulo p")]
    DivisionByZero,
    #[error("Witness does not satisfy the constraint system")]
    InvalidWitness,
    #[error("Challenge point is a root of the vanishing polynomial")]
    DegenerateChallenge,
    #[error("Public parameters were derived from a different setup secret")]
    SetupMismatch,
    #[error("Lagrange index {0} outside 1..={1}")]
    InvalidIndex(usize, usize),
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
    #[error("Invalid number of inputs")]
    InvalidNumberOfInputs,
    #[error("Invalid scalar value")]
    InvalidScalar,
}
