use crate::{
    assignment::{
        Assignment,
        Value,
    },
    clause_db::{
        Clause,
        ClauseDb,
        ClauseId,
    },
    decider::Decider,
    occurrence_map::OccurrenceMap,
};
use log::trace;

/// The three states a clause can be in under a partial assignment, as far as
/// BCP is concerned.
#[derive(Debug, PartialEq, Eq)]
enum ClauseStatus {
    /// At least one literal is true.
    Satisfied,
    /// All literals are false.
    Conflicting,
    /// All literals but one are false; the remaining one must be made true.
    Unit(crate::Literal),
    /// At least two literals are undefined; nothing forced yet.
    Undetermined,
}

/// Running counters for observability, mirroring the original's
/// `propagations`/`decisions` globals.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stats {
    pub propagations: u64,
    pub decisions: u64,
}

fn clause_status(clause: &Clause, assignment: &Assignment) -> ClauseStatus {
    let mut undefined_count = 0;
    let mut last_undefined = None;
    for literal in clause {
        match assignment.value_of_literal(literal) {
            Value::True => return ClauseStatus::Satisfied,
            Value::False => {}
            Value::Undefined => {
                undefined_count += 1;
                last_undefined = Some(literal);
            }
        }
    }
    match undefined_count {
        0 => ClauseStatus::Conflicting,
        1 => ClauseStatus::Unit(last_undefined.expect("counted exactly one undefined literal")),
        _ => ClauseStatus::Undetermined,
    }
}

/// Runs Boolean Constraint Propagation to a fixpoint, consuming trail
/// entries from [`Assignment::next_unpropagated`] forward.
///
/// Returns `true` as soon as some clause becomes conflicting under the
/// current model (the triggering clause's literals have already had their
/// activities bumped); returns `false` once every trail entry has been
/// processed with no conflict found. On `false`, every clause has either a
/// true literal or at least two undefined literals (the BCP fixpoint
/// invariant).
pub fn propagate_to_fixpoint(
    assignment: &mut Assignment,
    clauses: &ClauseDb,
    occurrences: &OccurrenceMap,
    decider: &mut Decider,
    stats: &mut Stats,
) -> bool {
    while let Some(literal) = assignment.next_unpropagated() {
        stats.propagations += 1;
        trace!("propagating {:?}", literal);

        let candidates: Vec<ClauseId> =
            occurrences.clauses_possibly_falsified_by(literal).collect();
        for clause_id in candidates {
            let clause = clauses
                .resolve(clause_id)
                .expect("occurrence map only ever references clauses in the store");
            match clause_status(clause, assignment) {
                ClauseStatus::Satisfied | ClauseStatus::Undetermined => {}
                ClauseStatus::Conflicting => {
                    trace!("conflict in clause {}", clause_id);
                    decider.bump_for_conflict(clause);
                    return true;
                }
                ClauseStatus::Unit(forced) => {
                    assignment.assign_literal_true(forced);
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clause_db::Clause,
        literal::{
            Sign,
            Variable,
        },
    };

    fn var(index: usize) -> Variable {
        Variable::from_index(index).unwrap()
    }

    fn setup(num_vars: usize, clauses: Vec<Clause>) -> (Assignment, ClauseDb, OccurrenceMap, Decider) {
        let mut assignment = Assignment::default();
        assignment.register_variables(num_vars);
        let mut occurrences = OccurrenceMap::default();
        occurrences.register_variables(num_vars);
        let mut decider = Decider::default();
        decider.register_variables(num_vars);
        let mut db = ClauseDb::default();
        for clause in clauses {
            let literals: Vec<_> = clause.literals().to_vec();
            let id = db.push(clause);
            for literal in literals {
                occurrences.register_for_literal(literal, id);
            }
        }
        (assignment, db, occurrences, decider)
    }

    #[test]
    fn unit_propagation_chains_to_fixpoint() {
        // (a) & (-a v b) & (-b v c)  =>  a=T forces b=T forces c=T, no conflict.
        let a = var(0).into_literal(Sign::True);
        let b = var(1).into_literal(Sign::True);
        let c = var(2).into_literal(Sign::True);
        let (mut assignment, db, occurrences, mut decider) = setup(
            3,
            vec![
                Clause::new(vec![a]),
                Clause::new(vec![!a, b]),
                Clause::new(vec![!b, c]),
            ],
        );
        let mut stats = Stats::default();
        assignment.assign_literal_true(a);
        let conflict = propagate_to_fixpoint(&mut assignment, &db, &occurrences, &mut decider, &mut stats);
        assert!(!conflict);
        assert_eq!(assignment.value_of_literal(b), Value::True);
        assert_eq!(assignment.value_of_literal(c), Value::True);
    }

    #[test]
    fn conflicting_clause_is_detected() {
        // (a) & (-a) conflicts as soon as a is assigned.
        let a = var(0).into_literal(Sign::True);
        let (mut assignment, db, occurrences, mut decider) =
            setup(1, vec![Clause::new(vec![a]), Clause::new(vec![!a])]);
        let mut stats = Stats::default();
        assignment.assign_literal_true(a);
        let conflict = propagate_to_fixpoint(&mut assignment, &db, &occurrences, &mut decider, &mut stats);
        assert!(conflict);
        assert_eq!(decider.conflicts(), 1);
    }

    #[test]
    fn tautological_clause_never_conflicts() {
        let a = var(0).into_literal(Sign::True);
        let (mut assignment, db, occurrences, mut decider) =
            setup(1, vec![Clause::new(vec![a, !a])]);
        let mut stats = Stats::default();
        assignment.assign_literal_true(a);
        let conflict = propagate_to_fixpoint(&mut assignment, &db, &occurrences, &mut decider, &mut stats);
        assert!(!conflict);
    }
}
