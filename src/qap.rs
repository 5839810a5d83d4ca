//! R1CS to QAP transformation
//!
//! Every column of A, B, C (and the constant vector K) becomes the unique
//! polynomial of degree < n through the points (i, column[i - 1]) for
//! constraint indices i = 1..=n. The vanishing polynomial Z has exactly those
//! indices as roots, so A(X)B(X) - C(X) - K(X) is divisible by Z(X) iff every
//! constraint holds.

use crate::errors::QapError;
use crate::r1cs::{R1CSShape, Witness};
use crate::scalar::Scalar;
use crate::timer::Timer;
use crate::unipoly::UniPoly;
use std::ops::Range;

/// Lagrange basis polynomial L_i over the constraint indices 1..=n:
/// L_i(t) = prod_{j != i} (t - j) / (i - j)
#[derive(Debug, Clone)]
pub struct LagrangeBasis {
    index: usize,
    n: usize,
    den_inv: Scalar,
    poly: UniPoly,
}

impl LagrangeBasis {
    pub fn new(index: usize, n: usize) -> Result<Self, QapError> {
        if index == 0 || index > n {
            return Err(QapError::InvalidIndex(index, n));
        }
        let i = Scalar::from_u64(index as u64);
        let others = move || {
            (1..=n as u64)
                .filter(move |&j| j != index as u64)
                .map(Scalar::from_u64)
        };

        let den: Scalar = others().map(|j| i - j).product();
        let den_inv = den.invert()?;
        let numerator = others().fold(UniPoly::constant(Scalar::one()), |acc, j| {
            &acc * &UniPoly::linear(j)
        });

        Ok(LagrangeBasis {
            index,
            n,
            den_inv,
            poly: numerator.scale(&den_inv),
        })
    }

    /// Evaluate directly from the product formula
    pub fn evaluate(&self, t: &Scalar) -> Scalar {
        let num: Scalar = (1..=self.n as u64)
            .filter(|&j| j != self.index as u64)
            .map(|j| *t - Scalar::from_u64(j))
            .product();
        num * self.den_inv
    }

    /// Coefficient form
    pub fn poly(&self) -> &UniPoly {
        &self.poly
    }
}

/// The full basis L_1..L_n for a fixed constraint count
#[derive(Debug, Clone)]
pub struct LagrangeSet {
    basis: Vec<LagrangeBasis>,
}

impl LagrangeSet {
    pub fn new(n: usize) -> Result<Self, QapError> {
        let basis = (1..=n)
            .map(|i| LagrangeBasis::new(i, n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LagrangeSet { basis })
    }

    pub fn len(&self) -> usize {
        self.basis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.basis.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&LagrangeBasis> {
        self.basis.get(i)
    }

    /// [L_1(t), ..., L_n(t)]
    pub fn evaluate_all(&self, t: &Scalar) -> Vec<Scalar> {
        self.basis.iter().map(|l| l.evaluate(t)).collect()
    }

    /// sum_i values[i] * L_{i+1}(t)
    pub fn combine(&self, values: &[Scalar], t: &Scalar) -> Scalar {
        values
            .iter()
            .zip(self.basis.iter())
            .map(|(v, l)| *v * l.evaluate(t))
            .sum()
    }

    /// Build the column polynomial t -> sum_i column[i] * L_{i+1}(t)
    pub fn column_to_poly(&self, column: Vec<Scalar>) -> Result<ColumnPoly, QapError> {
        if column.len() != self.basis.len() {
            return Err(QapError::InvalidDimensions(format!(
                "column has {} entries, expected {}",
                column.len(),
                self.basis.len()
            )));
        }
        let poly = column
            .iter()
            .zip(self.basis.iter())
            .fold(UniPoly::zero(), |acc, (v, l)| &acc + &l.poly.scale(v));
        Ok(ColumnPoly {
            values: column,
            poly,
        })
    }
}

/// Interpolating polynomial of one matrix column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPoly {
    values: Vec<Scalar>,
    poly: UniPoly,
}

impl ColumnPoly {
    pub fn evaluate(&self, t: &Scalar) -> Scalar {
        self.poly.evaluate(t)
    }

    pub fn poly(&self) -> &UniPoly {
        &self.poly
    }

    /// Evaluate from precomputed Lagrange values [L_1(t), ..., L_n(t)]
    fn evaluate_from_basis(&self, basis_evals: &[Scalar]) -> Scalar {
        self.values
            .iter()
            .zip(basis_evals.iter())
            .map(|(v, l)| *v * *l)
            .sum()
    }
}

/// Column polynomials of every matrix evaluated at one point
#[derive(Debug, Clone)]
pub struct QapEvaluation {
    pub A: Vec<Scalar>,
    pub B: Vec<Scalar>,
    pub C: Vec<Scalar>,
    pub K: Scalar,
    pub Z: Scalar,
}

impl QapEvaluation {
    /// (sum_j A_j(t) z_j, sum_j B_j(t) z_j, sum_j C_j(t) z_j) over the wires in `range`
    pub fn combine(&self, z: &[Scalar], range: Range<usize>) -> (Scalar, Scalar, Scalar) {
        let weigh = |evals: &[Scalar]| -> Scalar {
            range.clone().map(|j| evals[j] * z[j]).sum()
        };
        (weigh(&self.A), weigh(&self.B), weigh(&self.C))
    }
}

/// Quadratic arithmetic program for a fixed R1CS
#[derive(Debug, Clone)]
pub struct Qap {
    shape: R1CSShape,
    basis: LagrangeSet,
    pub A: Vec<ColumnPoly>,
    pub B: Vec<ColumnPoly>,
    pub C: Vec<ColumnPoly>,
    pub K: ColumnPoly,
    Z: UniPoly,
}

impl Qap {
    #[tracing::instrument(
        skip_all,
        name = "Qap::from_r1cs",
        fields(num_cons = shape.get_num_cons(), num_vars = shape.get_num_vars())
    )]
    pub fn from_r1cs(shape: &R1CSShape) -> Result<Self, QapError> {
        let timer = Timer::new("Qap::from_r1cs");
        let basis = LagrangeSet::new(shape.get_num_cons())?;

        let A = columns_to_polys(&basis, shape.get_A(), shape.get_num_vars())?;
        let B = columns_to_polys(&basis, shape.get_B(), shape.get_num_vars())?;
        let C = columns_to_polys(&basis, shape.get_C(), shape.get_num_vars())?;
        let K = basis.column_to_poly(shape.get_K().to_vec())?;
        let Z = UniPoly::vanishing(shape.get_num_cons());

        timer.stop();
        Ok(Qap {
            shape: shape.clone(),
            basis,
            A,
            B,
            C,
            K,
            Z,
        })
    }

    pub fn shape(&self) -> &R1CSShape {
        &self.shape
    }

    pub fn basis(&self) -> &LagrangeSet {
        &self.basis
    }

    pub fn vanishing(&self) -> &UniPoly {
        &self.Z
    }

    pub fn column_to_poly(&self, column: Vec<Scalar>) -> Result<ColumnPoly, QapError> {
        self.basis.column_to_poly(column)
    }

    /// Evaluate every column polynomial, K and Z at `t`
    pub fn evaluate_at(&self, t: &Scalar) -> QapEvaluation {
        let basis_evals = self.basis.evaluate_all(t);
        let eval_all = |cols: &[ColumnPoly]| -> Vec<Scalar> {
            cols.iter().map(|c| c.evaluate_from_basis(&basis_evals)).collect()
        };
        QapEvaluation {
            A: eval_all(&self.A),
            B: eval_all(&self.B),
            C: eval_all(&self.C),
            K: self.K.evaluate_from_basis(&basis_evals),
            Z: self.Z.evaluate(t),
        }
    }

    /// Witness-weighted polynomials sum_j z_j A_j(X) (and B, C) over `range`
    pub fn witness_polys(&self, z: &[Scalar], range: Range<usize>) -> (UniPoly, UniPoly, UniPoly) {
        let weigh = |cols: &[ColumnPoly]| -> UniPoly {
            range
                .clone()
                .fold(UniPoly::zero(), |acc, j| &acc + &cols[j].poly.scale(&z[j]))
        };
        (weigh(&self.A), weigh(&self.B), weigh(&self.C))
    }

    /// (A(X)B(X) - C(X) - K(X)) divided by Z(X), as (quotient, remainder)
    pub fn quotient_and_remainder(&self, witness: &Witness) -> Result<(UniPoly, UniPoly), QapError> {
        let z = witness.z();
        if z.len() != self.shape.get_num_vars() {
            return Err(QapError::InvalidWitness);
        }
        let (a, b, c) = self.witness_polys(&z, 0..z.len());
        let q = &(&(&a * &b) - &c) - self.K.poly();
        q.div_rem(&self.Z)
    }

    /// Exact quotient H(X); a nonzero remainder means some constraint fails
    pub fn quotient_poly(&self, witness: &Witness) -> Result<UniPoly, QapError> {
        let (h, rem) = self.quotient_and_remainder(witness)?;
        if !rem.is_zero() {
            return Err(QapError::InvalidWitness);
        }
        Ok(h)
    }
}

#[cfg(feature = "parallel")]
fn columns_to_polys(
    basis: &LagrangeSet,
    M: &[Vec<Scalar>],
    num_vars: usize,
) -> Result<Vec<ColumnPoly>, QapError> {
    use rayon::prelude::*;
    (0..num_vars)
        .into_par_iter()
        .map(|j| basis.column_to_poly(R1CSShape::column(M, j)))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn columns_to_polys(
    basis: &LagrangeSet,
    M: &[Vec<Scalar>],
    num_vars: usize,
) -> Result<Vec<ColumnPoly>, QapError> {
    (0..num_vars)
        .map(|j| basis.column_to_poly(R1CSShape::column(M, j)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r1cs::SquareCircuit;

    #[test]
    fn test_lagrange_kronecker_delta() {
        for n in 1..=5 {
            let set = LagrangeSet::new(n).unwrap();
            for i in 0..n {
                for j in 1..=n as u64 {
                    let expected = if j == (i + 1) as u64 {
                        Scalar::one()
                    } else {
                        Scalar::zero()
                    };
                    let t = Scalar::from_u64(j);
                    assert_eq!(set.get(i).unwrap().evaluate(&t), expected);
                    assert_eq!(set.get(i).unwrap().poly().evaluate(&t), expected);
                }
            }
        }
    }

    #[test]
    fn test_lagrange_two_constraints() {
        // L_1(t) = (t - 2) / (1 - 2) = 2 - t, L_2(t) = t - 1
        let set = LagrangeSet::new(2).unwrap();
        let two = Scalar::from_u64(2);
        assert_eq!(set.get(0).unwrap().poly().as_vec(), vec![two, -Scalar::one()]);
        assert_eq!(set.get(1).unwrap().poly().as_vec(), vec![-Scalar::one(), Scalar::one()]);
    }

    #[test]
    fn test_invalid_lagrange_index() {
        assert_eq!(LagrangeBasis::new(0, 2).unwrap_err(), QapError::InvalidIndex(0, 2));
        assert_eq!(LagrangeBasis::new(3, 2).unwrap_err(), QapError::InvalidIndex(3, 2));
    }

    #[test]
    fn test_interpolation_roundtrip() {
        let mut rng = ark_std::test_rng();
        for n in 1..=6 {
            let set = LagrangeSet::new(n).unwrap();
            let column: Vec<Scalar> = (0..n).map(|_| Scalar::random(&mut rng)).collect();
            let poly = set.column_to_poly(column.clone()).unwrap();
            assert!(poly.poly().degree() < n);
            for (i, v) in column.iter().enumerate() {
                let t = Scalar::from_u64((i + 1) as u64);
                assert_eq!(poly.evaluate(&t), *v);
                assert_eq!(set.combine(&column, &t), *v);
            }
        }
    }

    #[test]
    fn test_coefficient_and_product_forms_agree() {
        let mut rng = ark_std::test_rng();
        let set = LagrangeSet::new(4).unwrap();
        let again = LagrangeSet::new(4).unwrap();
        let column: Vec<Scalar> = (0..4).map(|_| Scalar::random(&mut rng)).collect();
        let poly = set.column_to_poly(column.clone()).unwrap();
        assert_eq!(poly, again.column_to_poly(column.clone()).unwrap());
        for _ in 0..16 {
            let t = Scalar::random(&mut rng);
            assert_eq!(poly.evaluate(&t), set.combine(&column, &t));
            assert_eq!(set.evaluate_all(&t), again.evaluate_all(&t));
        }
    }

    #[test]
    fn test_column_length_checked() {
        let set = LagrangeSet::new(3).unwrap();
        assert!(matches!(
            set.column_to_poly(vec![Scalar::one()]),
            Err(QapError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_evaluate_at_matches_columns() {
        let shape = SquareCircuit::new(25).shape().unwrap();
        let qap = Qap::from_r1cs(&shape).unwrap();
        let t = Scalar::from_u64(1_000_003);
        let evals = qap.evaluate_at(&t);
        for j in 0..3 {
            assert_eq!(evals.A[j], qap.A[j].evaluate(&t));
            assert_eq!(evals.B[j], qap.B[j].evaluate(&t));
            assert_eq!(evals.C[j], qap.C[j].evaluate(&t));
        }
        assert_eq!(evals.K, qap.K.evaluate(&t));
        assert_eq!(evals.Z, (t - Scalar::one()) * (t - Scalar::from_u64(2)));
    }

    #[test]
    fn test_columns_reproduce_matrices() {
        let shape = SquareCircuit::new(25).shape().unwrap();
        let qap = Qap::from_r1cs(&shape).unwrap();
        for i in 0..2 {
            let t = Scalar::from_u64((i + 1) as u64);
            for j in 0..3 {
                assert_eq!(qap.A[j].evaluate(&t), shape.get_A()[i][j]);
                assert_eq!(qap.B[j].evaluate(&t), shape.get_B()[i][j]);
                assert_eq!(qap.C[j].evaluate(&t), shape.get_C()[i][j]);
            }
            assert_eq!(qap.K.evaluate(&t), shape.get_K()[i]);
        }
    }

    #[test]
    fn test_quotient_poly_divides_exactly() {
        let circuit = SquareCircuit::new(25);
        let qap = Qap::from_r1cs(&circuit.shape().unwrap()).unwrap();

        let witness = circuit.witness(&Scalar::from_u64(5));
        let h = qap.quotient_poly(&witness).unwrap();
        assert_eq!(h.degree(), 0);

        let z = witness.z();
        let (a, b, c) = qap.witness_polys(&z, 0..3);
        let lhs = &(&(&a * &b) - &c) - qap.K.poly();
        assert_eq!(lhs, &h * qap.vanishing());

        for x in [4u64, 7, 9] {
            let bad = circuit.witness(&Scalar::from_u64(x));
            assert_eq!(qap.quotient_poly(&bad), Err(QapError::InvalidWitness));
        }
    }
}
