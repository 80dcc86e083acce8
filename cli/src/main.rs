use solver::{
    Error,
    Solver,
};
use std::{
    fs,
    path::PathBuf,
    process,
};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "dpll-sat", about = "A DPLL based SAT solver for DIMACS CNF input.")]
struct Opt {
    /// Path to a DIMACS CNF input file.
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Number of conflicts between activity decays.
    #[structopt(long, default_value = "1000")]
    decay_period: u64,

    /// Suppress the decisions/propagations counters on the outcome line.
    #[structopt(long)]
    silent: bool,
}

fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    let cnf_contents = fs::read(&opt.input).unwrap_or_else(|err| {
        eprintln!("couldn't read '{}': {}", opt.input.display(), err);
        process::exit(2);
    });

    let mut solver =
        Solver::from_cnf_with_decay_period(&mut &cnf_contents[..], opt.decay_period)
            .unwrap_or_else(|err| {
                eprintln!("malformed DIMACS input: {}", err);
                process::exit(2);
            });

    match solver.solve() {
        Ok(result) => {
            let counters = if opt.silent {
                String::new()
            } else {
                format!(",{},{}", solver.decisions(), solver.propagations())
            };
            if result.is_sat() {
                println!("SATISFIABLE{}", counters);
                process::exit(20);
            } else {
                println!("UNSATISFIABLE{}", counters);
                process::exit(10);
            }
        }
        Err(Error::ModelCheckFailed(clause_id)) => {
            let clause = solver.clause(clause_id);
            eprintln!(
                "Error in model, clause {} is not satisfied: {:?}",
                clause_id, clause
            );
            process::exit(1);
        }
        Err(err) => {
            eprintln!("internal solver error: {}", err);
            process::exit(1);
        }
    }
}
