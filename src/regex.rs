use std::{error::Error, fmt::Display};

use crate::{
    fsm::Nfa,
    matching::Matcher,
    parser::{run_parse, ParserError},
    utils::RegexFlags,
};

#[derive(Debug, PartialEq)]
pub enum ReError {
    ParsingFailed(ParserError),
}

impl Display for ReError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParsingFailed(parser_error) => write!(f, "{}", parser_error),
        }
    }
}

impl Error for ReError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ParsingFailed(parser_error) => Some(parser_error),
        }
    }
}

impl From<ParserError> for ReError {
    fn from(parser_error: ParserError) -> Self {
        ReError::ParsingFailed(parser_error)
    }
}

/// A compiled pattern: parsed, built into an [`Nfa`] and, with
/// [`RegexFlags::OPTIMIZE`], stripped of interior epsilon edges.
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    flags: RegexFlags,
    nfa: Nfa,
}

impl Regex {
    pub fn new(pattern: &str) -> Result<Regex, ReError> {
        Regex::new_with_flags(pattern, RegexFlags::default())
    }

    pub fn new_with_flags(pattern: &str, flags: RegexFlags) -> Result<Regex, ReError> {
        let mut nfa = match run_parse(pattern)? {
            Some(root) => Nfa::from_ast(&root),
            None => Nfa::empty(),
        };
        if flags.intersects(RegexFlags::OPTIMIZE) {
            nfa.eliminate_epsilons();
        }
        if flags.intersects(RegexFlags::DEBUG) {
            log::debug!("compiled {:?}:\n{}", pattern, nfa.as_graphviz_code());
        }
        Ok(Regex {
            pattern: String::from(pattern),
            flags,
            nfa,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn get_flags(&self) -> RegexFlags {
        self.flags
    }

    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }
}

impl Matcher for Regex {
    fn is_match(&self, text: &str) -> bool {
        self.nfa.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_with_default_flags() {
        let regex = Regex::new("a(b|c)*d").unwrap();
        assert_eq!(regex.pattern(), "a(b|c)*d");
        assert_eq!(regex.get_flags(), RegexFlags::OPTIMIZE);
        assert!(regex.is_match("abccccccd"));
        assert!(!regex.is_match("abccccccde"));
    }

    #[test]
    fn flags_agree() {
        let plain = Regex::new_with_flags("(ab|c)d*", RegexFlags::NO_FLAG).unwrap();
        let optimized = Regex::new_with_flags("(ab|c)d*", RegexFlags::OPTIMIZE).unwrap();
        let debug = Regex::new_with_flags("(ab|c)d*", RegexFlags::OPTIMIZE | RegexFlags::DEBUG)
            .unwrap();
        assert!(optimized.nfa().epsilon_count() < plain.nfa().epsilon_count());
        for text in ["ad", "abd", "acd", "abcd", "cddddd", "abccccccde"] {
            assert_eq!(plain.is_match(text), optimized.is_match(text), "{}", text);
            assert_eq!(debug.is_match(text), optimized.is_match(text), "{}", text);
        }
    }

    #[test]
    fn empty_pattern() {
        let regex = Regex::new("").unwrap();
        assert!(regex.is_match(""));
        assert!(!regex.is_match("a"));
    }

    #[test]
    fn parse_errors_propagate() {
        assert!(matches!(
            Regex::new("(a"),
            Err(ReError::ParsingFailed(ParserError::UnmatchedParenthesis(_, 0)))
        ));
        let err = Regex::new("*a").unwrap_err();
        assert!(err.source().is_some());
        assert!(matches!(
            err,
            ReError::ParsingFailed(ParserError::NothingToRepeat(_, 0))
        ));
    }
}
