//! Client configuration
//!
//! All fields have defaults, so a RON file only needs the values it changes:
//!
//! ```ron
//! (
//!     default_display_name: "guest",
//!     confirmation_notice_after_ms: 1500,
//! )
//! ```

use crate::{Error, Result};
use rookline_core::Promotion;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default delay before the "waiting for confirmation" indicator shows
pub const DEFAULT_CONFIRMATION_NOTICE_MS: u64 = 3_000;

/// Configuration for a [`SyncCore`](crate::SyncCore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Name sent when the user leaves the name field empty
    pub default_display_name: String,

    /// Promotion piece sent when the gesture carries no choice
    pub default_promotion: Promotion,

    /// Age of an unconfirmed move after which `SyncCore::poll` raises
    /// `Notice::AwaitingConfirmation` (once per move)
    pub confirmation_notice_after_ms: u64,

    /// Render from the local side's point of view instead of always white
    pub orient_to_side: bool,
}

impl SyncConfig {
    /// Parse a configuration from RON text
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    /// Set the fallback display name
    pub fn with_default_display_name(mut self, name: impl Into<String>) -> Self {
        self.default_display_name = name.into();
        self
    }

    /// The name to send for user input `name`
    pub fn display_name_or_default(&self, name: &str) -> String {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            self.default_display_name.clone()
        } else {
            trimmed.to_string()
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            default_display_name: "anon".to_string(),
            default_promotion: Promotion::Queen,
            confirmation_notice_after_ms: DEFAULT_CONFIRMATION_NOTICE_MS,
            orient_to_side: true,
        }
    }
}
