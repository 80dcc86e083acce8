#![forbid(unsafe_code)]

mod assignment;
mod builder;
pub mod clause_db;
mod decider;
mod literal;
mod occurrence_map;
mod propagator;


use crate::{
    assignment::{
        Assignment,
        Value,
    },
    builder::SolverBuilder,
    clause_db::{
        Clause,
        ClauseDb,
        ClauseId,
    },
    decider::Decider,
    occurrence_map::OccurrenceMap,
    propagator::Stats,
};
pub use crate::{
    decider::DEFAULT_DECAY_PERIOD,
    literal::{
        Literal,
        Sign,
        Variable,
    },
};
use cnf_parser::{
    Error as CnfError,
    Input,
};
use core::fmt;
use log::{
    debug,
    trace,
};
use thiserror::Error;

/// Errors the core can raise. DIMACS-format problems are a parser-level
/// concern and are reported as `cnf_parser::Error<Error>` from
/// [`Solver::from_cnf`], not through this type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The formula declares more variables than this solver supports.
    #[error("problem declares too many variables to index")]
    TooManyVariables,
    /// `checkmodel` found a clause with no true literal right before
    /// reporting SAT — an internal solver bug, not a user-facing outcome.
    #[error("model check failed: clause {0} is not satisfied by the final model")]
    ModelCheckFailed(ClauseId),
}

/// The satisfiable or unsatisfiable outcome of a completed search.
#[derive(Debug, PartialEq, Eq)]
pub enum SolveResult {
    Satisfiable,
    Unsatisfiable,
}

impl SolveResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, Self::Satisfiable)
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, Self::Unsatisfiable)
    }
}

/// A complete variable assignment, available after [`Solver::solve`]
/// returns [`SolveResult::Satisfiable`].
#[derive(Debug)]
pub struct Model<'a> {
    assignment: &'a Assignment,
}

impl<'a> fmt::Display for Model<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (variable, sign) in self.assignment.iter() {
            let value = match sign {
                Some(Sign::True) => "true",
                Some(Sign::False) => "false",
                None => "undefined",
            };
            writeln!(f, "{} = {}", variable.into_index() + 1, value)?;
        }
        Ok(())
    }
}

impl<'a> Model<'a> {
    /// Returns `true` if `literal` is true under this model.
    pub fn value_of(&self, literal: Literal) -> bool {
        self.assignment.value_of_literal(literal) == Value::True
    }
}

/// The solver instance: the clause store, the occurrence lists indexing it,
/// the trail/model, the branching heuristic, and running diagnostics.
///
/// All mutable state lives here; the clause store and occurrence lists are
/// immutable once loaded and may be freely shared by reference during
/// search.
#[derive(Debug, Default, Clone)]
pub struct Solver {
    len_variables: usize,
    clauses: ClauseDb,
    occurrences: OccurrenceMap,
    assignment: Assignment,
    decider: Decider,
    stats: Stats,
    /// Set once at load time if any clause was empty; an empty clause can
    /// never be discovered by BCP (no occurrence list ever references it,
    /// since it mentions no variable), so it is special-cased here rather
    /// than left for the propagator, per the open question in the design
    /// notes.
    has_empty_clause: bool,
}

impl Solver {
    fn len_variables(&self) -> usize {
        self.len_variables
    }

    fn register_variables(&mut self, additional: usize) {
        self.assignment.register_variables(additional);
        self.occurrences.register_variables(additional);
        self.decider.register_variables(additional);
        self.len_variables += additional;
    }

    /// Parses the DIMACS CNF formula and builds a solver for it, using the
    /// default activity decay period.
    pub fn from_cnf<I>(input: &mut I) -> Result<Self, CnfError<Error>>
    where
        I: Input,
    {
        Self::from_cnf_with_decay_period(input, DEFAULT_DECAY_PERIOD)
    }

    /// Like [`Solver::from_cnf`], but with an explicit activity decay period
    /// (the `K` of §4.5/§9(c)).
    pub fn from_cnf_with_decay_period<I>(
        input: &mut I,
        decay_period: u64,
    ) -> Result<Self, CnfError<Error>>
    where
        I: Input,
    {
        let mut builder = SolverBuilder::default();
        cnf_parser::parse_cnf(input, &mut builder)?;
        let mut solver = builder.finalize();
        solver.decider.set_decay_period(decay_period);
        Ok(solver)
    }

    /// Adds a clause to the store, indexing its literals in the occurrence
    /// map. Duplicate and complementary literals are kept as-is: BCP handles
    /// both without special-casing.
    fn consume_clause(&mut self, clause: Clause) {
        if clause.is_empty() {
            self.has_empty_clause = true;
        }
        let literals: Vec<_> = clause.literals().to_vec();
        let id = self.clauses.push(clause);
        for literal in literals {
            self.occurrences.register_for_literal(literal, id);
        }
    }

    /// Processes every unit clause present at load time, in load order,
    /// before the first BCP invocation (§4.6 `InitialUnits`). Detects
    /// trivial unsatisfiability from two complementary unit clauses.
    fn propagate_initial_units(&mut self) -> Result<bool, Error> {
        for (_, clause) in &self.clauses {
            let Some(literal) = clause.unit_literal() else {
                continue
            };
            match self.assignment.value_of_literal(literal) {
                Value::False => return Ok(true),
                Value::Undefined => self.assignment.assign_literal_true(literal),
                Value::True => {}
            }
        }
        Ok(false)
    }

    /// Runs the DPLL search to completion: initial unit propagation, then
    /// repeated BCP-to-fixpoint with chronological backtracking on
    /// conflict, alternating with heuristic decisions, until either the
    /// trail is unsatisfiable at decision level 0 or every variable is
    /// assigned.
    pub fn solve(&mut self) -> Result<SolveResult, Error> {
        if self.has_empty_clause {
            return Ok(SolveResult::Unsatisfiable)
        }
        if self.len_variables() == 0 {
            return Ok(SolveResult::Satisfiable)
        }
        if self.propagate_initial_units()? {
            return Ok(SolveResult::Unsatisfiable)
        }

        loop {
            let conflict = propagator::propagate_to_fixpoint(
                &mut self.assignment,
                &self.clauses,
                &self.occurrences,
                &mut self.decider,
                &mut self.stats,
            );
            if conflict {
                if self.assignment.decision_level() == 0 {
                    debug!(
                        "unsatisfiable after {} decisions, {} propagations",
                        self.stats.decisions, self.stats.propagations
                    );
                    return Ok(SolveResult::Unsatisfiable)
                }
                trace!("backtracking from level {}", self.assignment.decision_level());
                self.assignment.backtrack();
                continue
            }

            match self.decider.select_next_decision_literal(&self.assignment) {
                None => {
                    self.check_model()?;
                    debug!(
                        "satisfiable after {} decisions, {} propagations",
                        self.stats.decisions, self.stats.propagations
                    );
                    return Ok(SolveResult::Satisfiable)
                }
                Some(decision) => {
                    self.stats.decisions += 1;
                    trace!("deciding {:?}", decision);
                    self.assignment.push_decision_mark();
                    self.assignment.assign_literal_true(decision);
                }
            }
        }
    }

    /// Re-checks every clause against the final model before reporting SAT.
    /// A failure here indicates a solver bug, not a property of the input.
    fn check_model(&self) -> Result<(), Error> {
        for (id, clause) in &self.clauses {
            let satisfied = clause.into_iter().any(|literal| {
                self.assignment.value_of_literal(literal) == Value::True
            });
            if !satisfied {
                return Err(Error::ModelCheckFailed(id))
            }
        }
        Ok(())
    }

    /// Returns the model found by the most recent successful [`Solver::solve`].
    ///
    /// # Note
    ///
    /// The value returned reflects whatever the trail currently holds; call
    /// this only after `solve` has returned [`SolveResult::Satisfiable`].
    pub fn model(&self) -> Model {
        Model {
            assignment: &self.assignment,
        }
    }

    /// The clause this solver reports as unsatisfied, for diagnostics
    /// reporting by a caller that wants to print it (the CLI does this on
    /// [`Error::ModelCheckFailed`]).
    pub fn clause(&self, id: ClauseId) -> Option<&Clause> {
        self.clauses.resolve(id)
    }

    pub fn decisions(&self) -> u64 {
        self.stats.decisions
    }

    pub fn propagations(&self) -> u64 {
        self.stats.propagations
    }
}
