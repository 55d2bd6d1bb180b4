//! JSON entitlement source.
//!
//! Expects a top-level array:
//!
//! ```json
//! [
//!   { "address": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266", "amount": "25000000000000000000" }
//! ]
//! ```

use std::path::{Path, PathBuf};

use crate::domain::{AirdropError, RawEntitlement};
use crate::ports::EntitlementSource;

/// Where the JSON text comes from.
#[derive(Debug, Clone)]
enum JsonInput {
    File(PathBuf),
    Inline(String),
}

/// Loads entitlements from a JSON file or string.
#[derive(Debug, Clone)]
pub struct JsonEntitlementSource {
    input: JsonInput,
}

impl JsonEntitlementSource {
    /// Read records from a file at load time.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            input: JsonInput::File(path.as_ref().to_path_buf()),
        }
    }

    /// Parse records from an in-memory JSON document.
    pub fn from_json(json: impl Into<String>) -> Self {
        Self {
            input: JsonInput::Inline(json.into()),
        }
    }
}

impl EntitlementSource for JsonEntitlementSource {
    fn load(&self) -> Result<Vec<RawEntitlement>, AirdropError> {
        let records: Vec<RawEntitlement> = match &self.input {
            JsonInput::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| AirdropError::Source {
                    message: format!("{}: {e}", path.display()),
                })?;
                serde_json::from_str(&text).map_err(|e| AirdropError::Source {
                    message: format!("{}: {e}", path.display()),
                })?
            }
            JsonInput::Inline(text) => serde_json::from_str(text)?,
        };

        tracing::debug!(records = records.len(), "entitlements loaded");
        Ok(records)
    }
}
