use std::{collections::HashSet, ops::Range};

use itertools::Itertools;

use crate::parser::{visitor::Visitor, Data, Node};

pub type State = usize;

/// An outgoing edge. `label` is `None` for an epsilon transition.
#[derive(Hash, Debug, PartialEq, Eq, Clone, Copy)]
pub struct Transition {
    pub label: Option<char>,
    pub end: State,
}

impl Transition {
    pub fn new(label: Option<char>, end: State) -> Self {
        Self { label, end }
    }

    pub fn is_epsilon(&self) -> bool {
        self.label.is_none()
    }
}

/// `(start, end)` of a partially built automaton.
pub type Fragment = (State, State);

/// A Thompson NFA.
///
/// States live in an arena and are numbered densely `0..state_count()`;
/// `transitions[s]` holds the outgoing edges of state `s`.
#[derive(Debug, Clone, Default)]
pub struct Nfa {
    pub start: State,
    pub accept: State,
    transitions: Vec<Vec<Transition>>,
}

impl Nfa {
    pub fn new() -> Nfa {
        Default::default()
    }

    /// The automaton of the empty pattern: one state that is both start and
    /// accept, matching only the empty string.
    pub fn empty() -> Nfa {
        let mut nfa = Nfa::new();
        let state = nfa.gen_state();
        nfa.start = state;
        nfa.accept = state;
        nfa
    }

    pub fn from_ast(ast: &Node) -> Nfa {
        let mut nfa = Nfa::new();
        let (start, accept) = ast.accept(&mut nfa);
        nfa.start = start;
        nfa.accept = accept;
        log::debug!(
            "built NFA for {} with {} states and {} edges",
            ast,
            nfa.state_count(),
            nfa.edge_count()
        );
        nfa
    }

    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn states(&self) -> Range<State> {
        0..self.transitions.len()
    }

    pub fn edge_count(&self) -> usize {
        self.transitions.iter().map(Vec::len).sum()
    }

    pub fn epsilon_count(&self) -> usize {
        self.transitions
            .iter()
            .flatten()
            .filter(|transition| transition.is_epsilon())
            .count()
    }

    pub fn transitions(&self, state: State) -> &[Transition] {
        self.transitions
            .get(state)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Targets of the edges leaving `state` under `label`.
    pub fn targets(&self, state: State, label: Option<char>) -> impl Iterator<Item = State> + '_ {
        self.transitions(state)
            .iter()
            .filter(move |transition| transition.label == label)
            .map(|transition| transition.end)
    }

    pub fn gen_state(&mut self) -> State {
        self.transitions.push(Vec::new());
        self.transitions.len() - 1
    }

    pub fn fragment(&mut self) -> Fragment {
        (self.gen_state(), self.gen_state())
    }

    /// Adds an edge unless an identical one already exists.
    pub fn add_transition(&mut self, start: State, end: State, label: Option<char>) -> bool {
        let transition = Transition::new(label, end);
        let transitions = &mut self.transitions[start];
        if transitions.contains(&transition) {
            false
        } else {
            transitions.push(transition);
            true
        }
    }

    pub fn epsilon(&mut self, start: State, end: State) {
        self.add_transition(start, end, None);
    }

    pub(crate) fn retain_transitions<F>(&mut self, state: State, f: F)
    where
        F: FnMut(&Transition) -> bool,
    {
        self.transitions[state].retain(f);
    }

    fn symbol_transition(&mut self, char_literal: char) -> Fragment {
        let (start, end) = self.fragment();
        self.add_transition(start, end, Some(char_literal));
        (start, end)
    }

    fn alternation(&mut self, lower: &Fragment, upper: &Fragment) -> Fragment {
        let fragment = self.fragment();
        self.epsilon(fragment.0, lower.0);
        self.epsilon(fragment.0, upper.0);
        self.epsilon(lower.1, fragment.1);
        self.epsilon(upper.1, fragment.1);

        fragment
    }

    fn concatenation(&mut self, first: &Fragment, second: &Fragment) -> Fragment {
        self.epsilon(first.1, second.0);
        (first.0, second.1)
    }

    fn zero_or_more(&mut self, fragment: &Fragment) -> Fragment {
        let outer = self.fragment();
        self.epsilon(outer.0, fragment.0);
        self.epsilon(outer.0, outer.1);
        self.epsilon(fragment.1, fragment.0);
        self.epsilon(fragment.1, outer.1);

        outer
    }

    /// Every state reachable from `states` through epsilon edges alone,
    /// `states` included.
    pub fn epsilon_closure<I>(&self, states: I) -> HashSet<State>
    where
        I: IntoIterator<Item = State>,
    {
        let mut closure: HashSet<State> = HashSet::new();
        let mut stack: Vec<State> = Vec::new();
        for state in states {
            if closure.insert(state) {
                stack.push(state);
            }
        }
        while let Some(state) = stack.pop() {
            for end in self.targets(state, None) {
                if closure.insert(end) {
                    stack.push(end);
                }
            }
        }
        closure
    }

    /// Convert the automaton to GraphViz Dot code for debugging purposes.
    pub fn as_graphviz_code(&self) -> String {
        let opts = "[fillcolor=\"#EEEEEE\" fontcolor=\"#888888\"]";
        let nodes = self
            .states()
            .map(|state| {
                if state == self.accept {
                    format!("node_{}[label=\"{}\" shape=doublecircle]", state, state)
                } else if state == self.start {
                    format!("node_{}[label=\"{}\"][fillcolor=green]", state, state)
                } else {
                    format!("node_{}[label=\"{}\"]{}", state, state, opts)
                }
            })
            .join("\n");
        let edges = self
            .states()
            .flat_map(|state| {
                self.transitions(state)
                    .iter()
                    .sorted_by_key(|transition| (transition.label, transition.end))
                    .map(move |transition| match transition.label {
                        Some(c) => format!("node_{} -> node_{}[label=\"{}\"]", state, transition.end, c),
                        None => format!("node_{} -> node_{}[style=dashed]", state, transition.end),
                    })
            })
            .join("\n");
        let opts = "node [shape=circle style=filled fillcolor=\"#4385f5\" fontcolor=\"#FFFFFF\" \
        color=white penwidth=5.0 margin=0.1 width=0.5 height=0.5 fixedsize=true]";
        format!(
            "digraph G {{  rankdir=\"LR\" graph [fontname = \"Courier New\"];
                node [fontname = \"verdana\", style = rounded];
                edge [fontname = \"verdana\"];
                {{\n{}\n{}\n{}\n}}}}",
            opts, nodes, edges
        )
    }
}

impl Visitor for Nfa {
    type Result = Fragment;

    fn visit_character(&mut self, char_literal: char) -> Self::Result {
        self.symbol_transition(char_literal)
    }

    fn visit_union(&mut self, left: &Node, right: &Node) -> Self::Result {
        let lower = left.accept(self);
        let upper = right.accept(self);
        self.alternation(&lower, &upper)
    }

    fn visit_concat(&mut self, left: &Node, right: &Node) -> Self::Result {
        let first = left.accept(self);
        let second = right.accept(self);
        self.concatenation(&first, &second)
    }

    fn visit_star(&mut self, inner: &Node) -> Self::Result {
        let fragment = inner.accept(self);
        self.zero_or_more(&fragment)
    }

    fn visit_group(&mut self, inner: &Node) -> Self::Result {
        inner.accept(self)
    }
}
