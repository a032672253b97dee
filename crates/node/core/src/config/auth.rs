//! Bearer token configuration.

use podium_api::TokenTable;
use podium_primitives::Identity;
use serde::{Deserialize, Serialize};

/// One accepted bearer token and the identity it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    pub token: String,
    pub user_id: String,
    /// Display name, defaults to the user id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Authentication configuration (TOML-serializable).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub tokens: Vec<TokenEntry>,
}

impl AuthConfig {
    pub fn token_table(&self) -> TokenTable {
        self.tokens
            .iter()
            .map(|entry| {
                let username = entry.username.as_deref().unwrap_or(&entry.user_id);
                (
                    entry.token.clone(),
                    Identity::new(entry.user_id.as_str(), username),
                )
            })
            .collect()
    }
}
