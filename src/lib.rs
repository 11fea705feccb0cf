//! go-bot NLG - template-based response generation for goal-oriented dialogue
//!
//! The dialogue policy picks an action, the state tracker fills slots, and this
//! crate turns both into the text shown to the user.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use gobot_nlg::{ResponseManager, TemplateStore, TemplateSyntax};
//!
//! let store = TemplateStore::from_str(
//!     "inform_area\tThe place is in #area area.\napi_call\tquery area=#area food=#food\n",
//!     TemplateSyntax::Alternation,
//! )
//! .unwrap();
//! let nlg = ResponseManager::from_store(store, Some("api_call"), false).unwrap();
//!
//! let id = nlg.resolve_action_id("inform_area").unwrap();
//! let slots = HashMap::from([("area", "north")]);
//! assert_eq!(nlg.generate_text(id, &slots).unwrap(), "The place is in north area.");
//!
//! let api_call = nlg.resolve_action_id("api_call").unwrap();
//! let slots = HashMap::from([("food", "italian")]);
//! assert_eq!(
//!     nlg.generate_text(api_call, &slots).unwrap(),
//!     "query area=dontcare food=italian"
//! );
//! ```

pub mod config;
pub mod error;
pub mod manager;
pub mod parser;
pub mod template;

pub use config::NlgConfig;
pub use error::{ConfigError, IndexError, LoadError, LookupError, NlgError, ParseError};
pub use manager::ResponseManager;
pub use template::{SlotValues, Template, TemplateStore, TemplateSyntax, DONTCARE};

/// Load templates from a config and generate the response for one action label
///
/// # Example
///
/// ```rust,no_run
/// use std::collections::HashMap;
/// use gobot_nlg::{generate, NlgConfig};
///
/// let config = NlgConfig::new("templates.txt");
/// let slots = HashMap::from([("area", "north")]);
/// let text = generate(&config, "inform_area", &slots).unwrap();
/// ```
pub fn generate<S: SlotValues + ?Sized>(
    config: &NlgConfig,
    action: &str,
    slots: &S,
) -> Result<String, NlgError> {
    let manager = ResponseManager::new(config)?;
    let id = manager.resolve_action_id(action)?;
    Ok(manager.generate_text(id, slots)?)
}
