//! Regular expressions compiled to Thompson NFAs.
//!
//! A pattern over literal characters, `|`, `*` and parentheses is parsed into
//! a [`parser::Node`] tree, built into an [`fsm::Nfa`], optionally stripped of
//! epsilon edges by [`optimize::eliminate_epsilons`], and matched against whole
//! strings through [`matching::Matcher`].
//!
//! ```
//! use regex_nfa::{matching::Matcher, regex::Regex};
//!
//! let regex = Regex::new("a(b|c)*d").unwrap();
//! assert!(regex.is_match("abccd"));
//! assert!(!regex.is_match("aabcd"));
//! ```

pub mod fsm;
pub mod matching;
pub mod optimize;
pub mod parser;
pub mod regex;
pub mod utils;

#[cfg(test)]
#[ctor::ctor]
fn init() {
    env_logger::init();
}
