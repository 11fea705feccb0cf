//! Response templates for dialogue actions
//!
//! A template source maps each action label to a pattern of literal text and
//! `#slot` placeholders. Two syntaxes exist:
//!
//! ```text
//! // plain: a missing slot is dropped
//! inform_area	The place is in #area area.
//!
//! // alternation: a missing slot stays as a #slot marker unless a fallback is given,
//! // and an optional third field is used when the left-out slots are "dontcare"
//! ask_food	Serving {#food|any} food in the #area?	Serving #food food anywhere?
//! ```

mod store;
mod syntax;
#[allow(clippy::module_inception)]
mod template;

pub use store::TemplateStore;
pub use syntax::TemplateSyntax;
pub use template::{SlotValues, Template, DONTCARE};
