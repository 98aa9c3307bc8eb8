use web_sys::Storage;

use crate::error::{ClientError, Result};
use crate::session::Session;

/// The bearer token entry in `localStorage`.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenStore {
    key: String,
}

impl TokenStore {
    pub fn new(key: &str) -> Self {
        Self { key: key.to_string() }
    }

    fn storage() -> Result<Storage> {
        crate::dom::window()?
            .local_storage()
            .map_err(|e| ClientError::Platform(format!("failed to access local storage: {:?}", e)))?
            .ok_or_else(|| ClientError::Platform("local storage is unavailable".to_string()))
    }

    pub fn load(&self) -> Option<String> {
        match Self::storage().and_then(|s| {
            s.get_item(&self.key)
                .map_err(|e| ClientError::Platform(format!("failed to read {}: {:?}", self.key, e)))
        }) {
            Ok(token) => token,
            Err(e) => {
                log::warn!("no stored session: {}", e);
                None
            }
        }
    }

    /// Read and decode the stored session. Never fails; any problem yields
    /// an anonymous session.
    pub fn session(&self) -> Session {
        Session::from_token(self.load())
    }

    pub fn clear(&self) -> Result<()> {
        Self::storage()?
            .remove_item(&self.key)
            .map_err(|e| ClientError::Platform(format!("failed to remove {}: {:?}", self.key, e)))
    }
}
