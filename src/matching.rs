use std::collections::HashSet;

use crate::fsm::{Nfa, State};

/// Whole-string membership test.
pub trait Matcher {
    fn is_match(&self, text: &str) -> bool;
}

impl Nfa {
    /// States reachable from `states` through one edge labelled `char_literal`.
    pub fn step(&self, states: &HashSet<State>, char_literal: char) -> HashSet<State> {
        states
            .iter()
            .flat_map(|state| self.targets(*state, Some(char_literal)))
            .collect()
    }
}

impl Matcher for Nfa {
    fn is_match(&self, text: &str) -> bool {
        let mut current: HashSet<State> = HashSet::from([self.start]);
        for (position, char_literal) in text.chars().enumerate() {
            current = self.step(&self.epsilon_closure(current), char_literal);
            log::trace!(
                "{} active states after {:?} at {}",
                current.len(),
                char_literal,
                position
            );
            if current.is_empty() {
                return false;
            }
        }
        self.epsilon_closure(current).contains(&self.accept)
    }
}
