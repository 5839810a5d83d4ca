use ark_std::test_rng;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use r1cs_qap::{Prover, Qap, R1CSShape, Scalar, Setup, Verifier, Witness};

/// Chain of squarings: z[i+1] = z[i]^2 for i = 1..=n
#[allow(non_snake_case)]
fn squaring_chain(n: usize) -> (R1CSShape, Witness) {
    let num_vars = n + 2;
    let row = |j: usize| -> Vec<Scalar> {
        (0..num_vars)
            .map(|k| if k == j { Scalar::one() } else { Scalar::zero() })
            .collect()
    };
    let A: Vec<Vec<Scalar>> = (1..=n).map(row).collect();
    let B = A.clone();
    let C: Vec<Vec<Scalar>> = (2..=n + 1).map(row).collect();
    let K = vec![Scalar::zero(); n];
    let shape = R1CSShape::new(n, num_vars, 0, A, B, C, K).unwrap();

    let mut vars = vec![Scalar::from_u64(3)];
    for i in 0..n {
        vars.push(vars[i].square());
    }
    (shape, Witness::new(vec![], vars))
}

fn bench_qap_from_r1cs(c: &mut Criterion) {
    let mut group = c.benchmark_group("qap_from_r1cs");
    for n in [2usize, 8, 32] {
        let (shape, _) = squaring_chain(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &shape, |b, shape| {
            b.iter(|| Qap::from_r1cs(black_box(shape)).unwrap())
        });
    }
    group.finish();
}

fn bench_prove_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("prove_verify");
    let mut rng = test_rng();
    for n in [2usize, 8, 32] {
        let (shape, witness) = squaring_chain(n);
        let qap = Qap::from_r1cs(&shape).unwrap();
        let toxic = Setup::sample_with_rng(&qap, &mut rng);
        let params = Setup::derive_public(&qap, &toxic).unwrap();
        let prover = Prover::new(&qap);
        let proof = prover.prove(&witness, &params, &toxic).unwrap();
        let verifier = Verifier::new(&qap);

        group.bench_with_input(BenchmarkId::new("prove", n), &witness, |b, w| {
            b.iter(|| prover.prove(black_box(w), &params, &toxic).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("verify", n), &proof, |b, p| {
            b.iter(|| verifier.verify(black_box(p), &[], &params))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_qap_from_r1cs, bench_prove_verify);
criterion_main!(benches);
