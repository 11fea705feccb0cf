//! Lexer for template patterns using logos

use logos::Logos;

use crate::parser::ast::Span;

/// Tokens shared by both template syntaxes.
///
/// The plain syntax only gives meaning to [`Token::Slot`]; every other token is
/// literal text there. The alternation syntax also uses braces, pipes and
/// backslash escapes.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    // Slot reference: #area, #price_range
    #[regex(r"#[A-Za-z0-9_]+", |lex| lex.slice()[1..].to_string())]
    Slot(String),

    // A '#' that does not start a slot name
    #[token("#")]
    Hash,

    // Delimiters
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("|")]
    Pipe,

    // Escapes: \# \{ \} \| \\
    #[regex(r"\\[#{}|\\]", |lex| lex.slice().chars().nth(1))]
    Escaped(char),

    // A backslash that does not form an escape
    #[token("\\")]
    Backslash,

    #[regex(r"[^#{}|\\]+", |lex| lex.slice().to_string())]
    Text(String),
}

impl Token {
    /// The exact source text this token was lexed from
    pub fn source_text(&self) -> String {
        match self {
            Token::Slot(name) => format!("#{}", name),
            Token::Hash => "#".to_string(),
            Token::BraceOpen => "{".to_string(),
            Token::BraceClose => "}".to_string(),
            Token::Pipe => "|".to_string(),
            Token::Escaped(c) => format!("\\{}", c),
            Token::Backslash => "\\".to_string(),
            Token::Text(s) => s.clone(),
        }
    }
}

/// Lex a pattern into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

/// Tokens of an already rendered API-call text.
///
/// Only unresolved `#letters` markers matter here; digits and underscores end
/// a marker.
#[derive(Logos, Debug, Clone, PartialEq)]
pub(crate) enum MarkerToken {
    #[regex(r"#[A-Za-z]+")]
    Marker,

    #[token("#")]
    Hash,

    #[regex(r"[^#]+")]
    Text,
}
