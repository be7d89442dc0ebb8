//! Chat data loaded from a JSON snapshot.

mod client;
mod demo;

pub use client::SnapshotChatClient;
pub use demo::demo_snapshot;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Channel, Member, Server, User, UserId};
use crate::domain::errors::DataError;

/// On-disk form of the chat data cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The logged in user.
    #[serde(default)]
    pub self_id: Option<UserId>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Snapshot {
    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    /// Returns [`DataError::Malformed`] if the JSON does not match.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a snapshot file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, DataError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json(&content)
    }
}
