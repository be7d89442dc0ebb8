use serde::{Deserialize, Serialize};

use crate::domain::entities::{ChannelId, ServerId};

/// Session state persisted between runs.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateConfig {
    /// Server ids in the user's chosen order.
    #[serde(default)]
    pub server_order: Vec<ServerId>,

    /// Last accessed server ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_server_id: Option<ServerId>,

    /// Last accessed channel ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_channel_id: Option<ChannelId>,
}
