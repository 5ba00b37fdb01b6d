//! Markup contract of the authentication panel.
//!
//! Both the server-rendered page and the client component agree on the
//! class names, the tab attribute and the form id convention described here.
//! Any subset of the defaults can be overridden from JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tab name of the login pair.
pub const TAB_LOGIN: &str = "login";
/// Tab name of the registration pair.
pub const TAB_REGISTER: &str = "register";

/// Id of the optional `<script type="application/json">` element carrying overrides.
pub const CONFIG_ELEMENT_ID: &str = "auth-tabs-config";
/// Id of the element the client component is mounted into.
pub const MOUNT_ELEMENT_ID: &str = "auth-root";

#[derive(Debug)]
pub enum ContractError {
    Json(serde_json::Error),
    InvalidToken { field: &'static str, value: String },
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractError::Json(err) => write!(f, "invalid JSON: {}", err),
            ContractError::InvalidToken { field, value } => {
                write!(f, "`{}` must be a single non-empty token, got {:?}", field, value)
            }
        }
    }
}

impl std::error::Error for ContractError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupContract {
    pub tab_class: String,
    pub form_class: String,
    pub switch_class: String,
    pub tab_attribute: String,
    pub active_class: String,
    pub form_id_suffix: String,
}

impl Default for MarkupContract {
    fn default() -> Self {
        Self {
            tab_class: "auth-tab".to_string(),
            form_class: "auth-form".to_string(),
            switch_class: "switch-tab".to_string(),
            tab_attribute: "data-tab".to_string(),
            active_class: "active".to_string(),
            form_id_suffix: "-form".to_string(),
        }
    }
}

impl MarkupContract {
    /// Parse overrides; fields missing from `json` keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ContractError> {
        let contract: Self = serde_json::from_str(json).map_err(ContractError::Json)?;
        contract.validate()?;
        Ok(contract)
    }

    /// Class names and the tab attribute must be single non-empty tokens,
    /// otherwise `classList` and `querySelectorAll` throw in the browser.
    pub fn validate(&self) -> Result<(), ContractError> {
        let tokens = [
            ("tab_class", &self.tab_class),
            ("form_class", &self.form_class),
            ("switch_class", &self.switch_class),
            ("tab_attribute", &self.tab_attribute),
            ("active_class", &self.active_class),
        ];
        for (field, value) in tokens {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(ContractError::InvalidToken {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Id of the form paired with `tab_name`, e.g. `login` -> `login-form`.
    pub fn form_id(&self, tab_name: &str) -> String {
        format!("{}{}", tab_name, self.form_id_suffix)
    }

    pub fn tab_selector(&self) -> String {
        format!(".{}", self.tab_class)
    }

    pub fn form_selector(&self) -> String {
        format!(".{}", self.form_class)
    }

    pub fn switch_selector(&self) -> String {
        format!(".{}", self.switch_class)
    }
}
