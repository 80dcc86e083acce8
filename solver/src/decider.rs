use crate::{
    assignment::Assignment,
    clause_db::Clause,
    literal::{
        Literal,
        Sign,
        Variable,
    },
};
use log::trace;

/// The amount added to a literal's activity each time it occurs in a
/// conflicting clause.
const ACTIVITY_INCREMENT: f64 = 1.0;

/// Default number of conflicts between activity decays. Overridable via
/// [`Decider::with_decay_period`], matching the original's compile-time
/// constant plus command-line override.
pub const DEFAULT_DECAY_PERIOD: u64 = 1000;

/// Activity-based branching heuristic: tracks a per-polarity activity for
/// every variable, bumped on conflicts and periodically halved so that
/// recent conflicts dominate the choice of decision literal.
#[derive(Debug, Clone)]
pub struct Decider {
    pos_activity: Vec<f64>,
    neg_activity: Vec<f64>,
    conflicts: u64,
    decay_period: u64,
}

impl Default for Decider {
    fn default() -> Self {
        Self {
            pos_activity: Vec::new(),
            neg_activity: Vec::new(),
            conflicts: 0,
            decay_period: DEFAULT_DECAY_PERIOD,
        }
    }
}

impl Decider {
    pub fn with_decay_period(decay_period: u64) -> Self {
        Self {
            decay_period,
            ..Self::default()
        }
    }

    /// Overrides the decay period without disturbing any already-registered
    /// variables or accumulated activity.
    pub fn set_decay_period(&mut self, decay_period: u64) {
        self.decay_period = decay_period;
    }

    fn len_variables(&self) -> usize {
        self.pos_activity.len()
    }

    pub fn register_variables(&mut self, amount: usize) {
        let new_len = self.len_variables() + amount;
        self.pos_activity.resize(new_len, 0.0);
        self.neg_activity.resize(new_len, 0.0);
    }

    /// Picks the next decision literal: among currently undefined variables,
    /// the one (and polarity) with the highest activity, `>=` ties broken by
    /// scan order so the last, highest-indexed equally-active candidate
    /// wins. Returns `None` once every variable is assigned.
    pub fn select_next_decision_literal(&self, assignment: &Assignment) -> Option<Literal> {
        let mut max_activity = 0.0_f64;
        let mut candidate: Option<Literal> = None;
        for index in 0..self.len_variables() {
            let variable = Variable::from_index(index).expect("index is within registered range");
            if !assignment.is_undefined(variable) {
                continue;
            }
            if self.pos_activity[index] >= max_activity {
                max_activity = self.pos_activity[index];
                candidate = Some(variable.into_literal(Sign::True));
            }
            if self.neg_activity[index] >= max_activity {
                max_activity = self.neg_activity[index];
                candidate = Some(variable.into_literal(Sign::False));
            }
        }
        candidate
    }

    /// Bumps the activity of every literal in the given conflicting clause,
    /// decaying all activities first if this conflict is a multiple of the
    /// decay period.
    pub fn bump_for_conflict(&mut self, clause: &Clause) {
        self.conflicts += 1;
        if self.conflicts % self.decay_period == 0 {
            trace!("decaying activities after {} conflicts", self.conflicts);
            for activity in self.pos_activity.iter_mut().chain(self.neg_activity.iter_mut()) {
                *activity /= 2.0;
            }
        }
        for literal in clause {
            let index = literal.variable().into_index();
            if literal.is_positive() {
                self.pos_activity[index] += ACTIVITY_INCREMENT;
            } else {
                self.neg_activity[index] += ACTIVITY_INCREMENT;
            }
        }
    }

    pub fn conflicts(&self) -> u64 {
        self.conflicts
    }
}
