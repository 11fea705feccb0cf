//! Construction parameters for the response manager
//!
//! Usually read from a TOML file:
//!
//! ```toml
//! template_path = "templates.txt"
//! template_type = "alternation"
//! api_call_action = "api_call"
//! debug = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::template::TemplateSyntax;

/// Configuration for a [`crate::ResponseManager`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NlgConfig {
    /// File with one `action<TAB>pattern` record per line
    pub template_path: PathBuf,

    /// Syntax of the patterns in `template_path`
    #[serde(default)]
    pub template_type: TemplateSyntax,

    /// Label of the action that performs the database/API call
    #[serde(default)]
    pub api_call_action: Option<String>,

    /// Emit debug events for construction and each generated response
    #[serde(default)]
    pub debug: bool,
}

impl NlgConfig {
    /// Create a configuration with defaults for everything but the template path
    pub fn new(template_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
            template_type: TemplateSyntax::default(),
            api_call_action: None,
            debug: false,
        }
    }

    /// Load from a TOML file. A relative `template_path` is resolved against
    /// the directory containing the config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_str(&content)?;
        if config.template_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.template_path = dir.join(&config.template_path);
            }
        }
        Ok(config)
    }

    /// Load from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_template_type(mut self, template_type: TemplateSyntax) -> Self {
        self.template_type = template_type;
        self
    }

    pub fn with_api_call_action(mut self, action: impl Into<String>) -> Self {
        self.api_call_action = Some(action.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Turn debug on when `debug` is set; never turns off a debug flag read from the file
    pub fn enable_debug(mut self, debug: bool) -> Self {
        self.debug |= debug;
        self
    }
}
