use crate::{
    clause_db::Clause,
    literal::Variable,
    Error,
    Literal,
    Solver,
};
use cnf_parser::Output;

/// Consumes a streamed DIMACS CNF formula and assembles a [`Solver`] for it.
///
/// Implements [`cnf_parser::Output`] so it can be driven directly by
/// [`cnf_parser::parse_cnf`]; clauses are forwarded to the solver as soon as
/// their terminating `0` is seen.
#[derive(Debug, Default)]
pub struct SolverBuilder {
    solver: Solver,
    current_clause: Vec<Literal>,
}

impl SolverBuilder {
    fn finalize_current_clause(&mut self) {
        let literals = core::mem::take(&mut self.current_clause);
        self.solver.consume_clause(Clause::new(literals));
    }

    pub fn finalize(self) -> Solver {
        self.solver
    }
}

impl Output for SolverBuilder {
    type Error = Error;

    fn problem(&mut self, num_variables: u32, _num_clauses: u32) -> Result<(), Self::Error> {
        if !Variable::is_valid_index(num_variables as usize) {
            return Err(Error::TooManyVariables)
        }
        self.solver.register_variables(num_variables as usize);
        Ok(())
    }

    fn literal(&mut self, literal: cnf_parser::Literal) -> Result<(), Self::Error> {
        self.current_clause.push(literal.into());
        Ok(())
    }

    fn finalize_clause(&mut self) -> Result<(), Self::Error> {
        self.finalize_current_clause();
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        if !self.current_clause.is_empty() {
            self.finalize_current_clause();
        }
        Ok(())
    }
}
