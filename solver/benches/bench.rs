use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    BatchSize,
    Criterion,
};
use dpll_sat::Solver;

criterion_group!(bench_solve, bench_chain_of_implications, bench_pigeonhole_unsat);
criterion_main!(bench_solve);

/// A satisfiable chain `x1 -> x2 -> ... -> xn` forcing a long run of unit
/// propagation from a single initial unit clause.
fn chain_of_implications(n: usize) -> String {
    let mut out = format!("p cnf {} {}\n", n, n);
    out.push_str("1 0\n");
    for i in 1..n {
        out.push_str(&format!("-{} {} 0\n", i, i + 1));
    }
    out
}

/// The classic unsatisfiable pigeonhole formula: `n` pigeons, `n - 1` holes.
fn pigeonhole_unsat(pigeons: usize) -> String {
    let holes = pigeons - 1;
    let var = |p: usize, h: usize| (p * holes + h + 1) as i32;
    let mut clauses = Vec::new();
    for p in 0..pigeons {
        clauses.push((0..holes).map(|h| var(p, h)).collect::<Vec<_>>());
    }
    for h in 0..holes {
        for p1 in 0..pigeons {
            for p2 in (p1 + 1)..pigeons {
                clauses.push(vec![-var(p1, h), -var(p2, h)]);
            }
        }
    }
    let mut out = format!("p cnf {} {}\n", pigeons * holes, clauses.len());
    for clause in &clauses {
        for literal in clause {
            out.push_str(&literal.to_string());
            out.push(' ');
        }
        out.push_str("0\n");
    }
    out
}

fn bench_chain_of_implications(c: &mut Criterion) {
    let dimacs = chain_of_implications(200);
    let solver = Solver::from_cnf(&mut dimacs.as_bytes()).unwrap();
    c.bench_function("chain_of_implications(200)", |bencher| {
        bencher.iter_batched_ref(
            || solver.clone(),
            |solver| {
                let result = black_box(solver.solve());
                assert!(result.unwrap().is_sat());
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_pigeonhole_unsat(c: &mut Criterion) {
    let dimacs = pigeonhole_unsat(6);
    let solver = Solver::from_cnf(&mut dimacs.as_bytes()).unwrap();
    let mut g = c.benchmark_group("pigeonhole_unsat");
    g.sample_size(10);
    g.bench_function("6_pigeons", |bencher| {
        bencher.iter_batched_ref(
            || solver.clone(),
            |solver| {
                let result = black_box(solver.solve());
                assert!(result.unwrap().is_unsat());
            },
            BatchSize::SmallInput,
        )
    });
}
