//! Error types for loading templates and generating responses

use std::path::PathBuf;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

pub use crate::parser::ast::Span;

/// A syntax error inside a single pattern. Spans are relative to the pattern.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl ParseError {
    /// Move the span by `offset` bytes, e.g. from pattern to file coordinates
    pub fn offset(self, offset: usize) -> Self {
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => ParseError::Syntax {
                span: span.start + offset..span.end + offset,
                message,
                expected,
            },
        }
    }
}

impl<'a> From<chumsky::error::Rich<'a, crate::parser::lexer::Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, crate::parser::lexer::Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of input".to_string(),
                };
                format!("Unexpected {}", found_str)
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &crate::parser::lexer::Token) -> String {
    use crate::parser::lexer::Token;
    match tok {
        Token::Slot(s) => format!("slot '#{}'", s),
        Token::Text(s) => format!("text \"{}\"", s),
        Token::Escaped(c) => format!("escape '\\{}'", c),
        Token::Hash => "'#'".to_string(),
        Token::BraceOpen => "'{'".to_string(),
        Token::BraceClose => "'}'".to_string(),
        Token::Pipe => "'|'".to_string(),
        Token::Backslash => "'\\'".to_string(),
    }
}

/// Errors raised while reading and compiling a template source
#[derive(Error, Debug)]
pub enum LoadError {
    /// Template source could not be read
    #[error("failed to read template source {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record is missing its pattern, has a bad label, or has too many fields
    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord {
        line: usize,
        span: Span,
        reason: String,
    },

    /// The same action label appears twice
    #[error("line {line}: duplicate action '{action}' (first defined on line {first_line})")]
    DuplicateAction {
        action: String,
        line: usize,
        first_line: usize,
        span: Span,
    },

    /// A pattern does not follow the declared syntax. `span` is absolute in the source.
    #[error("line {line}: invalid pattern for action '{action}': {message}")]
    Syntax {
        action: String,
        line: usize,
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl LoadError {
    pub(crate) fn syntax(action: &str, line: usize, err: ParseError) -> Self {
        match err {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => LoadError::Syntax {
                action: action.to_string(),
                line,
                span,
                message,
                expected,
            },
        }
    }

    /// Location of the error in the template source, when there is one
    pub fn span(&self) -> Option<&Span> {
        match self {
            LoadError::Io { .. } => None,
            LoadError::MalformedRecord { span, .. }
            | LoadError::DuplicateAction { span, .. }
            | LoadError::Syntax { span, .. } => Some(span),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span() else {
            return self.to_string();
        };

        let label_message = match self {
            LoadError::Syntax {
                message, expected, ..
            } if !expected.is_empty() => {
                format!("{}\nExpected: {}", message, expected.join(", "))
            }
            LoadError::Syntax { message, .. } => message.clone(),
            LoadError::MalformedRecord { reason, .. } => reason.clone(),
            LoadError::DuplicateAction { first_line, .. } => {
                format!("already defined on line {}", first_line)
            }
            LoadError::Io { .. } => String::new(),
        };

        // ariadne counts in chars, spans here are byte offsets
        let to_char = |byte: usize| source.char_indices().take_while(|(i, _)| *i < byte).count();
        let char_span = to_char(span.start)..to_char(span.end);

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, char_span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, char_span))
                    .with_message(label_message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// An action label that is not in the loaded templates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown action '{action}'")]
pub struct LookupError {
    pub action: String,
}

/// An action id outside `0..count`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("action id {index} is out of range (0..{count})")]
pub struct IndexError {
    pub index: usize,
    pub count: usize,
}

/// Invalid construction parameters
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configured API-call action is not among the loaded templates
    #[error("api call action '{action}' is not defined in the templates")]
    UnknownApiCallAction {
        action: String,
        #[source]
        lookup: LookupError,
    },

    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Any error produced by this crate
#[derive(Error, Debug)]
pub enum NlgError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Index(#[from] IndexError),
}
