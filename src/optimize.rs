use itertools::Itertools;

use crate::fsm::{Nfa, State, Transition};

/// Removes epsilon transitions in place without changing the accepted language.
///
/// Every state with epsilon edges receives a copy of the consuming edges of
/// all states in the closure of its epsilon targets, and a direct epsilon edge
/// to the accept state when that closure reaches it. Afterwards only epsilon
/// edges touching `start` or `accept` remain; `start` and `accept` keep their
/// identities.
pub fn eliminate_epsilons(nfa: &mut Nfa) {
    let (start, accept) = (nfa.start, nfa.accept);
    let mut copied = 0;

    for state in nfa.states() {
        let targets: Vec<State> = nfa.targets(state, None).collect();
        if targets.is_empty() {
            continue;
        }
        let closure = nfa.epsilon_closure(targets);
        let consuming: Vec<Transition> = closure
            .iter()
            .filter(|other| **other != state)
            .sorted()
            .flat_map(|other| nfa.transitions(*other).iter())
            .filter(|transition| !transition.is_epsilon())
            .copied()
            .collect();
        for transition in consuming {
            if nfa.add_transition(state, transition.end, transition.label) {
                copied += 1;
            }
        }
        if state != accept && closure.contains(&accept) {
            nfa.epsilon(state, accept);
        }
    }

    let before = nfa.epsilon_count();
    for state in nfa.states() {
        let boundary = state == start || state == accept;
        nfa.retain_transitions(state, |transition| {
            boundary
                || !transition.is_epsilon()
                || transition.end == start
                || transition.end == accept
        });
    }
    log::debug!(
        "epsilon elimination copied {} edges and removed {} of {} epsilon edges",
        copied,
        before - nfa.epsilon_count(),
        before
    );
}

impl Nfa {
    pub fn eliminate_epsilons(&mut self) {
        eliminate_epsilons(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{matching::Matcher, parser::run_parse};

    fn compile(pattern: &str) -> Nfa {
        Nfa::from_ast(&run_parse(pattern).unwrap().unwrap())
    }

    fn cases() -> Vec<(&'static str, Vec<&'static str>)> {
        vec![
            (
                "a(b|c)*d",
                vec!["ad", "abd", "acd", "abcd", "abccd", "abccccccde", "aabcd", ""],
            ),
            (
                "(ab|c)d*",
                vec!["ad", "abd", "acd", "abcd", "cddddd", "abccccccde", "c", ""],
            ),
            ("a*", vec!["", "a", "aaaa", "b"]),
            ("(a|b)*abb", vec!["abb", "aabb", "babb", "ab", "abba"]),
            ("((a|b)(c|d))*", vec!["", "ac", "bdac", "abc", "a"]),
            ("(a*b*)*c", vec!["c", "abc", "bac", "aabbc", "ab", "cc"]),
        ]
    }

    #[test]
    fn preserves_verdicts() {
        for (pattern, texts) in cases() {
            let original = compile(pattern);
            let mut eliminated = original.clone();
            eliminated.eliminate_epsilons();
            for text in texts {
                assert_eq!(
                    original.is_match(text),
                    eliminated.is_match(text),
                    "pattern {:?} text {:?}",
                    pattern,
                    text
                );
            }
        }
    }

    #[test]
    fn keeps_start_and_accept() {
        let original = compile("a(b|c)*d");
        let mut eliminated = original.clone();
        eliminate_epsilons(&mut eliminated);
        assert_eq!(eliminated.start, original.start);
        assert_eq!(eliminated.accept, original.accept);
        assert_eq!(eliminated.state_count(), original.state_count());
    }

    #[test]
    fn only_boundary_epsilons_remain() {
        for (pattern, _) in cases() {
            let mut nfa = compile(pattern);
            eliminate_epsilons(&mut nfa);
            for state in nfa.states() {
                if state == nfa.start || state == nfa.accept {
                    continue;
                }
                for transition in nfa.transitions(state) {
                    assert!(
                        !transition.is_epsilon()
                            || transition.end == nfa.start
                            || transition.end == nfa.accept,
                        "pattern {:?} state {} keeps {:?}",
                        pattern,
                        state,
                        transition
                    );
                }
            }
        }
    }

    #[test]
    fn start_gains_consuming_edges() {
        let mut nfa = compile("(ab|c)d*");
        assert_eq!(nfa.targets(nfa.start, Some('a')).count(), 0);
        eliminate_epsilons(&mut nfa);
        assert_eq!(nfa.targets(nfa.start, Some('a')).count(), 1);
        assert_eq!(nfa.targets(nfa.start, Some('c')).count(), 1);
    }

    #[test]
    fn character_is_untouched() {
        let mut nfa = compile("a");
        let before = nfa.transitions(nfa.start).to_vec();
        eliminate_epsilons(&mut nfa);
        assert_eq!(nfa.transitions(nfa.start), before.as_slice());
        assert_eq!(nfa.epsilon_count(), 0);
    }

    #[test]
    fn idempotent() {
        let mut once = compile("a(b|c)*d");
        eliminate_epsilons(&mut once);
        let mut twice = once.clone();
        eliminate_epsilons(&mut twice);
        assert_eq!(once.edge_count(), twice.edge_count());
        assert_eq!(once.epsilon_count(), twice.epsilon_count());
    }
}
