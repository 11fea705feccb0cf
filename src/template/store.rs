//! Ordered collection of action templates loaded from a template source

use std::collections::HashMap;
use std::path::Path;

use crate::error::{IndexError, LoadError, LookupError, ParseError};

use super::syntax::TemplateSyntax;
use super::template::Template;

/// Templates indexed by action id and action label.
///
/// The id of an action is its position in the source. Labels are unique;
/// a repeated label is rejected at load time. The store is immutable once
/// built.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateStore {
    syntax: TemplateSyntax,
    entries: Vec<(String, Template)>,
    index: HashMap<String, usize>,
}

impl TemplateStore {
    /// Load a template source file
    pub fn from_file(path: &Path, syntax: TemplateSyntax) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content, syntax)
    }

    /// Parse template source text.
    ///
    /// One record per line: `label<TAB>pattern`, plus `<TAB>dontcare-pattern`
    /// for the alternation syntax. Blank lines are skipped.
    pub fn from_str(source: &str, syntax: TemplateSyntax) -> Result<Self, LoadError> {
        let mut entries = Vec::new();
        let mut index = HashMap::new();
        let mut first_lines = Vec::new();

        let mut line_start = 0;
        for (line_idx, raw_line) in source.split_inclusive('\n').enumerate() {
            let offset = line_start;
            line_start += raw_line.len();

            let line_no = line_idx + 1;
            let line = raw_line.trim_end_matches('\n').trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let (label, template) = parse_record(line, offset, line_no, syntax)?;

            if let Some(&existing) = index.get(label) {
                return Err(LoadError::DuplicateAction {
                    action: label.to_string(),
                    line: line_no,
                    first_line: first_lines[existing],
                    span: offset..offset + label.len(),
                });
            }

            index.insert(label.to_string(), entries.len());
            first_lines.push(line_no);
            entries.push((label.to_string(), template));
        }

        Ok(Self {
            syntax,
            entries,
            index,
        })
    }

    pub fn syntax(&self) -> TemplateSyntax {
        self.syntax
    }

    /// Number of loaded actions
    pub fn action_count(&self) -> usize {
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn template_at(&self, index: usize) -> Result<&Template, IndexError> {
        self.entries
            .get(index)
            .map(|(_, template)| template)
            .ok_or(IndexError {
                index,
                count: self.entries.len(),
            })
    }

    pub fn action_at(&self, index: usize) -> Result<&str, IndexError> {
        self.entries
            .get(index)
            .map(|(label, _)| label.as_str())
            .ok_or(IndexError {
                index,
                count: self.entries.len(),
            })
    }

    /// Id of the action with this label
    pub fn index_of_action(&self, label: &str) -> Result<usize, LookupError> {
        self.index.get(label).copied().ok_or_else(|| LookupError {
            action: label.to_string(),
        })
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Action labels in id order
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    /// `(id, label, template)` in id order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &Template)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(id, (label, template))| (id, label.as_str(), template))
    }

    /// Serialize back to the record format accepted by [`TemplateStore::from_str`]
    pub fn to_source_string(&self) -> String {
        let mut out = String::new();
        for (label, template) in &self.entries {
            out.push_str(label);
            out.push('\t');
            out.push_str(&template.to_string());
            out.push('\n');
        }
        out
    }

    /// Write the collection to a file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_source_string())
    }
}

/// Split and compile one record. `offset` is the byte offset of the line in the source.
fn parse_record(
    line: &str,
    offset: usize,
    line_no: usize,
    syntax: TemplateSyntax,
) -> Result<(&str, Template), LoadError> {
    let malformed = |reason: &str| LoadError::MalformedRecord {
        line: line_no,
        span: offset..offset + line.len(),
        reason: reason.to_string(),
    };

    let (label, rest) = line
        .split_once('\t')
        .ok_or_else(|| malformed("expected '<action>\\t<pattern>', found no tab"))?;

    if label.is_empty() {
        return Err(malformed("empty action label"));
    }
    if label.chars().any(char::is_whitespace) {
        return Err(malformed("action label contains whitespace"));
    }

    let pattern_offset = offset + label.len() + 1;

    // Tabs are literal in plain patterns
    let (pattern, dontcare) = if syntax.allows_dontcare() {
        let mut fields = rest.splitn(3, '\t');
        let pattern = fields.next().unwrap_or_default();
        let dontcare = fields.next();
        if fields.next().is_some() {
            return Err(malformed("too many fields, expected at most 3"));
        }
        (pattern, dontcare)
    } else {
        (rest, None)
    };

    let compile = |text: &str, at: usize| {
        syntax
            .parse_pattern(text)
            .map(|pattern| pattern.into_segments())
            .map_err(|errors| first_error(errors, label, line_no, at))
    };

    let mut template = Template::new(syntax, compile(pattern, pattern_offset)?);
    if let Some(dontcare) = dontcare {
        let dontcare_offset = pattern_offset + pattern.len() + 1;
        template = template.with_dontcare(compile(dontcare, dontcare_offset)?);
    }

    Ok((label, template))
}

fn first_error(errors: Vec<ParseError>, label: &str, line_no: usize, offset: usize) -> LoadError {
    match errors.into_iter().next() {
        Some(err) => LoadError::syntax(label, line_no, err.offset(offset)),
        None => LoadError::MalformedRecord {
            line: line_no,
            span: offset..offset,
            reason: format!("invalid pattern for action '{}'", label),
        },
    }
}
