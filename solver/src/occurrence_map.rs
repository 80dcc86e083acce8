use crate::{
    clause_db::ClauseId,
    Literal,
    Variable,
};
use core::slice;

/// For each variable, the clauses it occurs in, split by polarity. Built
/// once while clauses are loaded and never mutated again while solving.
#[derive(Debug, Default, Clone)]
pub struct OccurrenceMap {
    occurrences: Vec<Occurrences>,
}

#[derive(Debug, Default, Clone)]
struct Occurrences {
    /// Clauses containing this variable with positive polarity.
    pos: Vec<ClauseId>,
    /// Clauses containing this variable with negative polarity.
    neg: Vec<ClauseId>,
}

impl Occurrences {
    fn register(&mut self, literal: Literal, id: ClauseId) {
        match literal.is_positive() {
            true => self.pos.push(id),
            false => self.neg.push(id),
        }
    }

    fn of_polarity(&self, positive: bool) -> ClauseIdIter {
        ClauseIdIter::new(if positive { &self.pos } else { &self.neg })
    }
}

impl OccurrenceMap {
    fn len_variables(&self) -> usize {
        self.occurrences.len()
    }

    /// Grows the occurrence table to accommodate `amount` additional variables.
    pub fn register_variables(&mut self, amount: usize) {
        let new_len = self.len_variables() + amount;
        self.occurrences.resize_with(new_len, Default::default);
    }

    /// Records that clause `id` contains `literal`.
    pub fn register_for_literal(&mut self, literal: Literal, id: ClauseId) {
        self.occurrences[literal.variable().into_index()].register(literal, id);
    }

    /// Clauses in which `variable` occurs with positive polarity.
    pub fn positive_occurrences(&self, variable: Variable) -> ClauseIdIter {
        self.occurrences[variable.into_index()].of_polarity(true)
    }

    /// Clauses in which `variable` occurs with negative polarity.
    pub fn negative_occurrences(&self, variable: Variable) -> ClauseIdIter {
        self.occurrences[variable.into_index()].of_polarity(false)
    }

    /// Clauses that could become unit or conflicting as a consequence of
    /// `literal` becoming true: those containing its *negation*.
    ///
    /// A literal `p` becoming true can only newly satisfy clauses containing
    /// `p`; it can only shrink (toward unit or conflict) clauses containing
    /// `-p`. Using anything but the opposite-polarity list here would miss
    /// the new units/conflicts this assignment causes.
    pub fn clauses_possibly_falsified_by(&self, literal: Literal) -> ClauseIdIter {
        self.occurrences[literal.variable().into_index()].of_polarity(!literal.is_positive())
    }
}

#[derive(Debug)]
pub struct ClauseIdIter<'a> {
    iter: slice::Iter<'a, ClauseId>,
}

impl<'a> ClauseIdIter<'a> {
    fn new(clause_ids: &'a [ClauseId]) -> Self {
        Self {
            iter: clause_ids.iter(),
        }
    }
}

impl<'a> Iterator for ClauseIdIter<'a> {
    type Item = ClauseId;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().copied()
    }
}
