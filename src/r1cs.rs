//! R1CS constraint system
//!
//! Each constraint i reads (A_i · z) * (B_i · z) = (C_i · z) + K_i where
//! z = (1, inputs, vars).

use crate::errors::QapError;
use crate::scalar::Scalar;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

/// R1CS constraint system shape (A, B, C matrices and constant vector K).
///
/// Only constructible through `new`, so every row has `num_vars` entries and
/// every matrix has `num_cons` rows. Deserialization goes through the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "R1CSShapeData")]
pub struct R1CSShape {
    num_cons: usize,
    num_vars: usize,
    num_inputs: usize,
    A: Vec<Vec<Scalar>>,
    B: Vec<Vec<Scalar>>,
    C: Vec<Vec<Scalar>>,
    K: Vec<Scalar>,
}

/// Unchecked wire form of `R1CSShape`
#[derive(Deserialize)]
struct R1CSShapeData {
    num_cons: usize,
    num_vars: usize,
    num_inputs: usize,
    A: Vec<Vec<Scalar>>,
    B: Vec<Vec<Scalar>>,
    C: Vec<Vec<Scalar>>,
    K: Vec<Scalar>,
}

impl TryFrom<R1CSShapeData> for R1CSShape {
    type Error = QapError;

    fn try_from(data: R1CSShapeData) -> Result<Self, Self::Error> {
        R1CSShape::new(
            data.num_cons,
            data.num_vars,
            data.num_inputs,
            data.A,
            data.B,
            data.C,
            data.K,
        )
    }
}

impl R1CSShape {
    /// Create a new shape from dense rows.
    ///
    /// `num_vars` counts every wire including the constant wire at index 0,
    /// and the `num_inputs` public wires immediately follow it.
    pub fn new(
        num_cons: usize,
        num_vars: usize,
        num_inputs: usize,
        A: Vec<Vec<Scalar>>,
        B: Vec<Vec<Scalar>>,
        C: Vec<Vec<Scalar>>,
        K: Vec<Scalar>,
    ) -> Result<Self, QapError> {
        if num_cons == 0 || num_vars == 0 {
            return Err(QapError::InvalidDimensions(
                "need at least one constraint and the constant wire".to_string(),
            ));
        }
        if num_inputs >= num_vars {
            return Err(QapError::InvalidNumberOfInputs);
        }
        for (name, M) in [("A", &A), ("B", &B), ("C", &C)] {
            if M.len() != num_cons {
                return Err(QapError::InvalidDimensions(format!(
                    "{name} has {} rows, expected {num_cons}",
                    M.len()
                )));
            }
            if let Some(i) = M.iter().position(|row| row.len() != num_vars) {
                return Err(QapError::InvalidDimensions(format!(
                    "{name} row {i} has {} entries, expected {num_vars}",
                    M[i].len()
                )));
            }
        }
        if K.len() != num_cons {
            return Err(QapError::InvalidDimensions(format!(
                "K has {} entries, expected {num_cons}",
                K.len()
            )));
        }

        tracing::debug!(num_cons, num_vars, num_inputs, "built R1CS shape");

        Ok(Self {
            num_cons,
            num_vars,
            num_inputs,
            A,
            B,
            C,
            K,
        })
    }

    /// Create from small integer rows
    pub fn from_u64(
        num_inputs: usize,
        A: &[Vec<u64>],
        B: &[Vec<u64>],
        C: &[Vec<u64>],
        K: &[u64],
    ) -> Result<Self, QapError> {
        let convert = |M: &[Vec<u64>]| -> Vec<Vec<Scalar>> {
            M.iter()
                .map(|row| row.iter().map(|&v| Scalar::from_u64(v)).collect())
                .collect()
        };
        let num_vars = A.first().map(|row| row.len()).unwrap_or(0);
        Self::new(
            A.len(),
            num_vars,
            num_inputs,
            convert(A),
            convert(B),
            convert(C),
            K.iter().map(|&v| Scalar::from_u64(v)).collect(),
        )
    }

    pub fn get_num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn get_num_cons(&self) -> usize {
        self.num_cons
    }

    pub fn get_num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn get_A(&self) -> &[Vec<Scalar>] {
        &self.A
    }

    pub fn get_B(&self) -> &[Vec<Scalar>] {
        &self.B
    }

    pub fn get_C(&self) -> &[Vec<Scalar>] {
        &self.C
    }

    pub fn get_K(&self) -> &[Scalar] {
        &self.K
    }

    /// Number of wires the verifier knows: the constant wire plus the inputs
    pub fn num_public_wires(&self) -> usize {
        1 + self.num_inputs
    }

    /// Extract column `j` of a matrix, ordered by constraint index
    pub fn column(M: &[Vec<Scalar>], j: usize) -> Vec<Scalar> {
        M.iter().map(|row| row[j]).collect()
    }

    /// SHA3-256 digest binding the shape
    pub fn get_digest(&self) -> [u8; 32] {
        let mut hasher = Sha3_256::new();
        hasher.update(b"r1cs-qap-shape");
        for dim in [self.num_cons, self.num_vars, self.num_inputs] {
            hasher.update((dim as u64).to_le_bytes());
        }
        for M in [&self.A, &self.B, &self.C] {
            for row in M.iter() {
                for entry in row {
                    hasher.update(entry.to_bytes());
                }
            }
        }
        for k in &self.K {
            hasher.update(k.to_bytes());
        }
        hasher.finalize().into()
    }

    /// Check if the R1CS is satisfied by the given assignment.
    /// Stops at the first violated constraint.
    pub fn is_sat(&self, witness: &Witness) -> bool {
        if witness.inputs.len() != self.num_inputs {
            tracing::debug!(
                expected = self.num_inputs,
                got = witness.inputs.len(),
                "input count mismatch"
            );
            return false;
        }
        let z = witness.z();
        if z.len() != self.num_vars {
            tracing::debug!(expected = self.num_vars, got = z.len(), "witness length mismatch");
            return false;
        }

        for i in 0..self.num_cons {
            let a = dot(&self.A[i], &z);
            let b = dot(&self.B[i], &z);
            let c = dot(&self.C[i], &z) + self.K[i];
            if a * b != c {
                tracing::debug!(constraint = i + 1, "constraint violated");
                return false;
            }
        }
        true
    }
}

fn dot(row: &[Scalar], z: &[Scalar]) -> Scalar {
    row.iter().zip(z.iter()).map(|(m, w)| *m * *w).sum()
}

/// Assignment of values to the non-constant wires.
///
/// Never serialized: the private part stays with the prover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Witness {
    pub inputs: Vec<Scalar>,
    pub vars: Vec<Scalar>,
}

impl Witness {
    pub fn new(inputs: Vec<Scalar>, vars: Vec<Scalar>) -> Self {
        Witness { inputs, vars }
    }

    /// Full wire vector z = (1, inputs, vars)
    pub fn z(&self) -> Vec<Scalar> {
        let mut z = Vec::with_capacity(1 + self.inputs.len() + self.vars.len());
        z.push(Scalar::one());
        z.extend_from_slice(&self.inputs);
        z.extend_from_slice(&self.vars);
        z
    }
}

/// The statement "I know x with x^2 = target".
///
/// Wires are (1, x, x^2). Constraint 1 is x * x = x^2, constraint 2 is
/// x^2 * 1 = target.
#[derive(Clone, Copy, Debug)]
pub struct SquareCircuit {
    target: u64,
    public_root: bool,
}

impl SquareCircuit {
    pub fn new(target: u64) -> Self {
        SquareCircuit {
            target,
            public_root: false,
        }
    }

    /// Expose x as a public input instead of keeping it private
    pub fn with_public_root(mut self) -> Self {
        self.public_root = true;
        self
    }

    pub fn shape(&self) -> Result<R1CSShape, QapError> {
        R1CSShape::from_u64(
            usize::from(self.public_root),
            &[vec![0, 1, 0], vec![0, 0, 1]],
            &[vec![0, 1, 0], vec![1, 0, 0]],
            &[vec![0, 0, 1], vec![0, 0, 0]],
            &[0, self.target],
        )
    }

    /// Witness for a candidate root; x^2 is computed in the field
    pub fn witness(&self, x: &Scalar) -> Witness {
        let x2 = x.square();
        if self.public_root {
            Witness::new(vec![*x], vec![x2])
        } else {
            Witness::new(vec![], vec![*x, x2])
        }
    }

    /// Public inputs the verifier needs for a given root
    pub fn public_inputs(&self, x: &Scalar) -> Vec<Scalar> {
        if self.public_root {
            vec![*x]
        } else {
            vec![]
        }
    }
}
