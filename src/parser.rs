use colored::Colorize;
use std::{error::Error, fmt::Display};

use self::{parser::Parser, visitor::Visitor};

mod parser {
    // a cursor over the pattern; nested scopes are bounded by an `end` index
    // instead of slicing the pattern into substrings

    use super::ParserError;

    #[derive(Debug)]
    pub struct Parser<'a> {
        regex: &'a str,
        chars: Vec<char>,
        position: usize,
    }

    impl<'a> Parser<'a> {
        pub fn new(input: &'a str) -> Parser<'a> {
            Parser {
                regex: input,
                chars: input.chars().collect(),
                position: 0,
            }
        }

        pub fn len(&self) -> usize {
            self.chars.len()
        }

        pub fn seek(&mut self, position: usize) {
            self.position = position;
        }

        /// Consumes the next character if it lies before `end`.
        pub fn next_within(&mut self, end: usize) -> Option<(usize, char)> {
            if self.position < end {
                let position = self.position;
                self.position += 1;
                Some((position, self.chars[position]))
            } else {
                None
            }
        }

        /// Index of the `)` closing the `(` at `open`, looking no further than `end`.
        pub fn find_closing(&self, open: usize, end: usize) -> Result<usize, ParserError> {
            let mut depth = 1;
            let mut index = open;
            while depth > 0 {
                index += 1;
                if index >= end {
                    return Err(ParserError::UnmatchedParenthesis(self.pattern(), open));
                }
                match self.chars[index] {
                    '(' => depth += 1,
                    ')' => depth -= 1,
                    _ => {}
                }
            }
            Ok(index)
        }

        pub fn pattern(&self) -> Box<String> {
            Box::new(self.regex.to_string())
        }

        pub fn get_remainder(&self) -> Box<String> {
            Box::new(self.chars[self.position..].iter().collect())
        }
    }
}

/// Parsed regular expression syntax.
///
/// Every composite variant owns fully parsed children; the empty pattern is
/// represented by the absence of a root (see [`run_parse`]).
#[derive(Debug, Clone)]
pub enum Node {
    Char(char),
    Union(Box<Node>, Box<Node>),
    Concat(Box<Node>, Box<Node>),
    Star(Box<Node>),
    /// Explicit parenthesization. Transparent for equality and construction.
    Group(Box<Node>),
}

impl Node {
    pub fn union(left: Node, right: Node) -> Node {
        Node::Union(Box::new(left), Box::new(right))
    }

    pub fn concat(left: Node, right: Node) -> Node {
        Node::Concat(Box::new(left), Box::new(right))
    }

    pub fn star(inner: Node) -> Node {
        Node::Star(Box::new(inner))
    }

    pub fn group(inner: Node) -> Node {
        Node::Group(Box::new(inner))
    }
}

// Group(t) == t in both directions
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Group(a), Node::Group(b)) => a == b,
            (Node::Group(inner), _) => inner.as_ref() == other,
            (_, Node::Group(inner)) => self == inner.as_ref(),
            (Node::Char(a), Node::Char(b)) => a == b,
            (Node::Union(l1, r1), Node::Union(l2, r2))
            | (Node::Concat(l1, r1), Node::Concat(l2, r2)) => l1 == l2 && r1 == r2,
            (Node::Star(a), Node::Star(b)) => a == b,
            _ => false,
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Char(char_literal) => write!(f, "{}", char_literal),
            Self::Union(left, right) => write!(f, "{}|{}", left, right),
            Self::Concat(left, right) => write!(f, "{}{}", left, right),
            Self::Star(inner) => write!(f, "{}*", inner),
            Self::Group(inner) => write!(f, "({})", inner),
        }
    }
}

pub trait Data {
    fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Result;
}

impl Data for Node {
    fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Result {
        match self {
            Self::Char(c) => visitor.visit_character(*c),
            Self::Union(left, right) => visitor.visit_union(left, right),
            Self::Concat(left, right) => visitor.visit_concat(left, right),
            Self::Star(inner) => visitor.visit_star(inner),
            Self::Group(inner) => visitor.visit_group(inner),
        }
    }
}

/// Parse failures. The `usize` is the char index of the offending character.
#[derive(Debug, PartialEq)]
pub enum ParserError {
    UnmatchedParenthesis(Box<String>, usize),
    NothingToRepeat(Box<String>, usize),
    EmptyExpression(Box<String>, usize),
}

impl ParserError {
    /// Char index of the offending character in the pattern, not a display column.
    pub fn position(&self) -> usize {
        match *self {
            Self::UnmatchedParenthesis(_, position)
            | Self::NothingToRepeat(_, position)
            | Self::EmptyExpression(_, position) => position,
        }
    }
}

impl Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (code, message, pattern) = match *self {
            Self::UnmatchedParenthesis(ref pattern, _) => (1, "unmatched parenthesis", pattern),
            Self::NothingToRepeat(ref pattern, _) => (2, "nothing to repeat", pattern),
            Self::EmptyExpression(ref pattern, _) => (3, "empty expression", pattern),
        };
        write!(
            f,
            "{} {}:\n | {}\n | {}{}",
            format!("[{:0>3}]", code).red().bold(),
            message,
            pattern,
            " ".repeat(self.position()),
            "^".green()
        )
    }
}

impl Error for ParserError {}

/// Parses `input` into a [`Node`]. The empty pattern yields `Ok(None)`.
///
/// `*` binds tightest, then implicit concatenation, then `|`. A `)` without a
/// matching `(` ends the parse and the rest of the pattern is ignored.
pub fn run_parse(input: &str) -> Result<Option<Node>, ParserError> {
    let mut parser = Parser::new(input);
    let end = parser.len();
    parse_expression(&mut parser, end)
}

fn concat(ast: Option<Node>, node: Node) -> Node {
    match ast {
        Some(left) => Node::concat(left, node),
        None => node,
    }
}

fn parse_expression(parser: &mut Parser, end: usize) -> Result<Option<Node>, ParserError> {
    let mut ast: Option<Node> = None;
    while let Some((position, char_literal)) = parser.next_within(end) {
        match char_literal {
            '(' => {
                let group = parse_group(parser, position, end)?;
                ast = Some(concat(ast, group));
            }
            ')' => {
                log::warn!(
                    "unmatched ')' at {}, ignoring {:?}",
                    position,
                    parser.get_remainder()
                );
                parser.seek(end);
                return Ok(ast);
            }
            '|' => return parse_alternation(parser, ast, position, end),
            '*' => ast = Some(parse_star(parser, ast, position)?),
            _ => ast = Some(concat(ast, Node::Char(char_literal))),
        }
    }
    Ok(ast)
}

fn parse_group(parser: &mut Parser, open: usize, end: usize) -> Result<Node, ParserError> {
    let close = parser.find_closing(open, end)?;
    let inner = parse_expression(parser, close)?;
    parser.seek(close + 1);
    match inner {
        Some(node) => Ok(Node::group(node)),
        None => Err(ParserError::EmptyExpression(parser.pattern(), open)),
    }
}

fn parse_alternation(
    parser: &mut Parser,
    left: Option<Node>,
    position: usize,
    end: usize,
) -> Result<Option<Node>, ParserError> {
    let right = parse_expression(parser, end)?;
    match (left, right) {
        (Some(left), Some(right)) => Ok(Some(Node::union(left, right))),
        _ => Err(ParserError::EmptyExpression(parser.pattern(), position)),
    }
}

// `*` repeats the last unit: in `ab*` only the `b`
fn parse_star(parser: &mut Parser, ast: Option<Node>, position: usize) -> Result<Node, ParserError> {
    match ast {
        None | Some(Node::Star(_)) => Err(ParserError::NothingToRepeat(parser.pattern(), position)),
        Some(Node::Concat(left, right)) => Ok(Node::Concat(left, Box::new(Node::Star(right)))),
        Some(node) => Ok(Node::star(node)),
    }
}

pub mod visitor {
    use super::Node;

    pub trait Visitor {
        type Result;
        fn visit_character(&mut self, char_literal: char) -> Self::Result;
        fn visit_union(&mut self, left: &Node, right: &Node) -> Self::Result;
        fn visit_concat(&mut self, left: &Node, right: &Node) -> Self::Result;
        fn visit_star(&mut self, inner: &Node) -> Self::Result;
        fn visit_group(&mut self, inner: &Node) -> Self::Result;
    }
}
