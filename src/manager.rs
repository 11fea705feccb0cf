//! Action-to-text resolution for the dialogue agent

use logos::Logos;

use crate::config::NlgConfig;
use crate::error::{ConfigError, IndexError, LookupError, NlgError};
use crate::parser::lexer::MarkerToken;
use crate::template::{SlotValues, TemplateStore, DONTCARE};

/// Turns a policy's action id and the tracker's slot values into response text.
///
/// Owns its own [`TemplateStore`] and never mutates it, so a manager can be
/// shared across threads behind an `Arc`. To reload templates, build a new
/// manager and swap it in.
#[derive(Debug, Clone)]
pub struct ResponseManager {
    store: TemplateStore,
    api_call_id: Option<usize>,
    debug: bool,
}

impl ResponseManager {
    /// Load the templates named by `config` and resolve its API-call action
    pub fn new(config: &NlgConfig) -> Result<Self, NlgError> {
        if config.debug {
            tracing::debug!(
                template_path = %config.template_path.display(),
                template_type = %config.template_type,
                api_call_action = ?config.api_call_action,
                "loading response templates"
            );
        }

        let store = TemplateStore::from_file(&config.template_path, config.template_type)?;
        let manager = Self::from_store(store, config.api_call_action.as_deref(), config.debug)?;
        Ok(manager)
    }

    /// Wrap an already loaded store
    pub fn from_store(
        store: TemplateStore,
        api_call_action: Option<&str>,
        debug: bool,
    ) -> Result<Self, ConfigError> {
        let api_call_id = match api_call_action {
            Some(action) => Some(store.index_of_action(action).map_err(|lookup| {
                ConfigError::UnknownApiCallAction {
                    action: action.to_string(),
                    lookup,
                }
            })?),
            None => None,
        };

        if debug {
            tracing::debug!(
                action_count = store.action_count(),
                syntax = %store.syntax(),
                api_call_id = ?api_call_id,
                "response manager ready"
            );
        }

        Ok(Self {
            store,
            api_call_id,
            debug,
        })
    }

    /// Id of the action with this label
    pub fn resolve_action_id(&self, action_text: &str) -> Result<usize, LookupError> {
        self.store.index_of_action(action_text)
    }

    /// Render the template of `action_id` with the given slot values.
    ///
    /// For the API-call action every unresolved `#slot` marker becomes
    /// `dontcare` and the whole text is lowercased.
    pub fn generate_text<S: SlotValues + ?Sized>(
        &self,
        action_id: usize,
        slots: &S,
    ) -> Result<String, IndexError> {
        let template = self.store.template_at(action_id)?;
        let mut text = template.render(slots);

        if self.is_api_call(action_id) {
            text = normalize_api_call(&text);
        }

        if self.debug {
            tracing::debug!(
                action_id,
                action = self.store.action_at(action_id).unwrap_or_default(),
                text = %text,
                "generated response"
            );
        }

        Ok(text)
    }

    /// Number of actions known to the manager
    pub fn action_count(&self) -> usize {
        self.store.action_count()
    }

    pub fn api_call_id(&self) -> Option<usize> {
        self.api_call_id
    }

    pub fn is_api_call(&self, action_id: usize) -> bool {
        self.api_call_id == Some(action_id)
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }
}

/// Replace `#letters` markers with `dontcare` and lowercase the result
///
/// A marker is `#` followed by ASCII letters only, so `_` and digits end it:
/// `#price_range` becomes `dontcare_range`. Slots used by the API-call
/// template should therefore be named with letters only.
fn normalize_api_call(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut lexer = MarkerToken::lexer(text);
    while let Some(token) = lexer.next() {
        match token {
            Ok(MarkerToken::Marker) => out.push_str(DONTCARE),
            _ => out.push_str(lexer.slice()),
        }
    }
    out.to_lowercase()
}
