//! The two template syntaxes

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ParseError;
use crate::parser::{parse_alternation, parse_plain, Pattern};

/// Template syntax declared for a whole template source.
///
/// `Plain` drops placeholders whose slot is missing. `Alternation` keeps them
/// as `#slot` markers unless a `{#slot|fallback}` group gives a fallback, and
/// allows a second "dontcare" pattern per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSyntax {
    #[default]
    #[serde(alias = "DefaultTemplate")]
    Plain,
    #[serde(alias = "DualTemplate")]
    Alternation,
}

impl TemplateSyntax {
    pub fn name(self) -> &'static str {
        match self {
            TemplateSyntax::Plain => "plain",
            TemplateSyntax::Alternation => "alternation",
        }
    }

    /// Parse one pattern according to this syntax
    pub fn parse_pattern(self, text: &str) -> Result<Pattern, Vec<ParseError>> {
        match self {
            TemplateSyntax::Plain => parse_plain(text),
            TemplateSyntax::Alternation => parse_alternation(text),
        }
    }

    /// Whether records may carry a dontcare pattern
    pub fn allows_dontcare(self) -> bool {
        matches!(self, TemplateSyntax::Alternation)
    }

    /// What to emit for a placeholder with no value and no fallback
    pub(crate) fn write_missing(self, slot: &str, out: &mut String) {
        match self {
            TemplateSyntax::Plain => {}
            TemplateSyntax::Alternation => {
                out.push('#');
                out.push_str(slot);
            }
        }
    }

    /// Escape literal text so it reads back unchanged
    pub(crate) fn escape_literal(self, text: &str, out: &mut String) {
        match self {
            TemplateSyntax::Plain => out.push_str(text),
            TemplateSyntax::Alternation => {
                for c in text.chars() {
                    if matches!(c, '#' | '{' | '}' | '|' | '\\') {
                        out.push('\\');
                    }
                    out.push(c);
                }
            }
        }
    }
}

impl fmt::Display for TemplateSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemplateSyntax {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" | "DefaultTemplate" => Ok(TemplateSyntax::Plain),
            "alternation" | "DualTemplate" => Ok(TemplateSyntax::Alternation),
            other => Err(format!(
                "unknown template syntax '{}' (expected 'plain' or 'alternation')",
                other
            )),
        }
    }
}
