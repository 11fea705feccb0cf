//! Syntax tree types for template patterns

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// One piece of a template pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text emitted verbatim
    Literal(String),
    /// Slot reference, with an optional literal used when the slot is absent
    Placeholder {
        slot: String,
        fallback: Option<String>,
    },
}

impl Segment {
    pub fn literal(text: impl Into<String>) -> Self {
        Segment::Literal(text.into())
    }

    pub fn placeholder(slot: impl Into<String>) -> Self {
        Segment::Placeholder {
            slot: slot.into(),
            fallback: None,
        }
    }

    pub fn placeholder_or(slot: impl Into<String>, fallback: impl Into<String>) -> Self {
        Segment::Placeholder {
            slot: slot.into(),
            fallback: Some(fallback.into()),
        }
    }

    /// Slot name if this is a placeholder
    pub fn slot(&self) -> Option<&str> {
        match self {
            Segment::Placeholder { slot, .. } => Some(slot),
            Segment::Literal(_) => None,
        }
    }
}

/// A parsed pattern: segments in source order, adjacent literals merged
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    pub segments: Vec<Segment>,
}

impl Pattern {
    /// Build a pattern, merging runs of adjacent literals into one segment
    pub fn new(segments: Vec<Segment>) -> Self {
        let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());
        for seg in segments {
            if let (Some(Segment::Literal(prev)), Segment::Literal(text)) =
                (merged.last_mut(), &seg)
            {
                prev.push_str(text);
                continue;
            }
            merged.push(seg);
        }
        Self { segments: merged }
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pattern_merges_literals() {
        let pattern = Pattern::new(vec![
            Segment::literal("a "),
            Segment::literal("{"),
            Segment::placeholder("b"),
            Segment::literal(" c"),
        ]);
        assert_eq!(
            pattern.into_segments(),
            vec![
                Segment::literal("a {"),
                Segment::placeholder("b"),
                Segment::literal(" c"),
            ]
        );
    }

    #[test]
    fn test_segment_slot() {
        assert_eq!(Segment::placeholder_or("area", "anywhere").slot(), Some("area"));
        assert_eq!(Segment::literal("x").slot(), None);
    }
}
