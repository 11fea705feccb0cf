//! Compiled templates and slot substitution

use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};

use crate::error::ParseError;
use crate::parser::Segment;

use super::syntax::TemplateSyntax;

/// Slot value marking "any value is acceptable"
pub const DONTCARE: &str = "dontcare";

/// Read access to the slot values filled by a dialogue state tracker
pub trait SlotValues {
    fn slot_value(&self, slot: &str) -> Option<&str>;
}

impl<K, V, S> SlotValues for HashMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn slot_value(&self, slot: &str) -> Option<&str> {
        self.get(slot).map(|v| v.as_ref())
    }
}

impl<K, V> SlotValues for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn slot_value(&self, slot: &str) -> Option<&str> {
        self.get(slot).map(|v| v.as_ref())
    }
}

impl<K, V> SlotValues for [(K, V)]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn slot_value(&self, slot: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.as_ref() == slot)
            .map(|(_, v)| v.as_ref())
    }
}

/// A compiled response template for one action.
///
/// Holds the default pattern and, for the alternation syntax, an optional
/// dontcare pattern that replaces it when every slot it leaves out is
/// filled with [`DONTCARE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    syntax: TemplateSyntax,
    segments: Vec<Segment>,
    dontcare: Option<Vec<Segment>>,
}

impl Template {
    pub fn new(syntax: TemplateSyntax, segments: Vec<Segment>) -> Self {
        Self {
            syntax,
            segments,
            dontcare: None,
        }
    }

    /// Parse a single pattern with no dontcare variant
    pub fn parse(syntax: TemplateSyntax, text: &str) -> Result<Self, Vec<ParseError>> {
        let pattern = syntax.parse_pattern(text)?;
        Ok(Self::new(syntax, pattern.into_segments()))
    }

    /// Attach a dontcare pattern
    pub fn with_dontcare(mut self, segments: Vec<Segment>) -> Self {
        self.dontcare = Some(segments);
        self
    }

    pub fn syntax(&self) -> TemplateSyntax {
        self.syntax
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn dontcare_segments(&self) -> Option<&[Segment]> {
        self.dontcare.as_deref()
    }

    /// Slot names referenced by the default pattern
    pub fn slots(&self) -> BTreeSet<&str> {
        slot_names(&self.segments)
    }

    /// Slots of the default pattern that the dontcare pattern leaves out
    pub fn dontcare_slots(&self) -> BTreeSet<&str> {
        match &self.dontcare {
            Some(dontcare) => {
                let kept = slot_names(dontcare);
                self.slots().difference(&kept).copied().collect()
            }
            None => BTreeSet::new(),
        }
    }

    /// Substitute slot values into the template.
    ///
    /// Never fails: a missing slot falls back to the placeholder's fallback,
    /// then to the syntax rule (dropped for plain, `#slot` for alternation).
    pub fn render<S: SlotValues + ?Sized>(&self, slots: &S) -> String {
        let segments = match &self.dontcare {
            Some(dontcare) if self.dontcare_applies(slots) => dontcare,
            _ => &self.segments,
        };

        let mut out = String::new();
        for segment in segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { slot, fallback } => {
                    match (slots.slot_value(slot), fallback) {
                        (Some(value), _) => out.push_str(value),
                        (None, Some(fallback)) => out.push_str(fallback),
                        (None, None) => self.syntax.write_missing(slot, &mut out),
                    }
                }
            }
        }
        out
    }

    fn dontcare_applies<S: SlotValues + ?Sized>(&self, slots: &S) -> bool {
        let dontcare_slots = self.dontcare_slots();
        !dontcare_slots.is_empty()
            && dontcare_slots
                .iter()
                .all(|slot| slots.slot_value(slot) == Some(DONTCARE))
    }

    fn write_segments(&self, segments: &[Segment], out: &mut String) {
        for (i, segment) in segments.iter().enumerate() {
            match segment {
                Segment::Literal(text) => self.syntax.escape_literal(text, out),
                Segment::Placeholder {
                    slot,
                    fallback: Some(fallback),
                } => {
                    out.push_str("{#");
                    out.push_str(slot);
                    out.push('|');
                    self.syntax.escape_literal(fallback, out);
                    out.push('}');
                }
                Segment::Placeholder {
                    slot,
                    fallback: None,
                } => {
                    // A following word character would otherwise extend the slot name
                    let glued = matches!(
                        segments.get(i + 1),
                        Some(Segment::Literal(next)) if next.starts_with(is_slot_char)
                    );
                    if glued && self.syntax == TemplateSyntax::Alternation {
                        out.push_str("{#");
                        out.push_str(slot);
                        out.push('}');
                    } else {
                        out.push('#');
                        out.push_str(slot);
                    }
                }
            }
        }
    }
}

/// Writes the template back in its source syntax. The dontcare pattern, if
/// any, follows after a tab.
impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_segments(&self.segments, &mut out);
        if let Some(dontcare) = &self.dontcare {
            out.push('\t');
            self.write_segments(dontcare, &mut out);
        }
        f.write_str(&out)
    }
}

fn slot_names(segments: &[Segment]) -> BTreeSet<&str> {
    segments.iter().filter_map(Segment::slot).collect()
}

fn is_slot_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
