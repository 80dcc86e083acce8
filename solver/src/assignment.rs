use crate::literal::{
    Literal,
    Sign,
    Variable,
};

/// The current value of a literal or variable under a partial assignment.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Value {
    True,
    False,
    Undefined,
}

/// One entry of the trail: either a literal that has been made true, or the
/// marker that separates decision levels.
///
/// This is the tagged-variant realization of the trail: the original's
/// sentinel `0` literal is replaced with an explicit `DecisionMark` case, so
/// there is no overlap with real literal values to reason about.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum TrailEntry {
    Assigned(Literal),
    DecisionMark,
}

/// The trail (`modelStack`) together with the partial model it induces.
///
/// Invariant: for every nonzero trail entry `l`, `value_of_literal(l) ==
/// Value::True`; for every variable `v`, `v` has a defined value if and only
/// if some trail entry has `v` as its magnitude.
#[derive(Debug, Default, Clone)]
pub struct Assignment {
    model: Vec<Option<Sign>>,
    trail: Vec<TrailEntry>,
    next_to_propagate: usize,
    decision_level: usize,
}

impl Assignment {
    pub fn len_variables(&self) -> usize {
        self.model.len()
    }

    /// Grows the model to accommodate `amount` additional variables.
    pub fn register_variables(&mut self, amount: usize) {
        let new_len = self.len_variables() + amount;
        self.model.resize(new_len, None);
    }

    pub fn decision_level(&self) -> usize {
        self.decision_level
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Returns the current value of `literal` under the model.
    pub fn value_of_literal(&self, literal: Literal) -> Value {
        match self.model[literal.variable().into_index()] {
            None => Value::Undefined,
            Some(sign) => {
                let (_, wanted) = literal.into_var_and_sign();
                if sign == wanted {
                    Value::True
                } else {
                    Value::False
                }
            }
        }
    }

    pub fn is_undefined(&self, variable: Variable) -> bool {
        self.model[variable.into_index()].is_none()
    }

    fn set_undefined(&mut self, variable: Variable) {
        self.model[variable.into_index()] = None;
    }

    /// Appends `literal` to the trail and records it as true in the model.
    ///
    /// # Panics
    ///
    /// If `literal` is already false under the current model — the caller
    /// is responsible for only assigning literals that are not already
    /// falsified (see [`Assignment::value_of_literal`]).
    pub fn assign_literal_true(&mut self, literal: Literal) {
        debug_assert_ne!(
            self.value_of_literal(literal),
            Value::False,
            "assigning an already-falsified literal violates the trail invariant"
        );
        let (variable, sign) = literal.into_var_and_sign();
        self.model[variable.into_index()] = Some(sign);
        self.trail.push(TrailEntry::Assigned(literal));
    }

    /// Opens a new decision level by pushing the decision marker. The marker
    /// itself is immediately skipped by the propagation index, so BCP only
    /// ever sees literals.
    pub fn push_decision_mark(&mut self) {
        self.trail.push(TrailEntry::DecisionMark);
        self.decision_level += 1;
        self.next_to_propagate += 1;
    }

    /// Returns and consumes the next trail literal not yet processed by BCP,
    /// or `None` on fixpoint.
    pub fn next_unpropagated(&mut self) -> Option<Literal> {
        let entry = *self.trail.get(self.next_to_propagate)?;
        self.next_to_propagate += 1;
        match entry {
            TrailEntry::Assigned(literal) => Some(literal),
            TrailEntry::DecisionMark => {
                unreachable!("decision marks are skipped when pushed, never left for BCP")
            }
        }
    }

    /// Chronological backtrack: pops the trail back to and including the
    /// nearest decision mark, undefining every popped variable, then forces
    /// the negation of that level's decision literal as an ordinary
    /// propagated literal at the new, lower decision level.
    ///
    /// # Panics
    ///
    /// If `decision_level() == 0`.
    pub fn backtrack(&mut self) {
        assert!(self.decision_level >= 1, "cannot backtrack past level 0");
        let mut last_popped = None;
        loop {
            match self.trail.pop().expect("decision mark must exist above level 0") {
                TrailEntry::Assigned(literal) => {
                    self.set_undefined(literal.variable());
                    last_popped = Some(literal);
                }
                TrailEntry::DecisionMark => break,
            }
        }
        let decision = last_popped.expect("decision level always assigns its decision literal");
        self.decision_level -= 1;
        self.next_to_propagate = self.trail.len();
        self.assign_literal_true(!decision);
    }

    /// Iterates over all variables together with their current value.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, Option<Sign>)> + '_ {
        self.model.iter().enumerate().map(|(index, sign)| {
            (
                Variable::from_index(index).expect("index is within the registered range"),
                *sign,
            )
        })
    }
}
