use serde::{Deserialize, Serialize};

use super::PermissionOverride;
use super::id::string_id;

string_id!(
    /// Unique identifier for a server role.
    RoleId
);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(default)]
    pub colour: Option<String>,
    #[serde(default)]
    pub hoist: bool,
    /// Lower rank takes precedence.
    #[serde(default)]
    pub rank: i64,
    #[serde(default)]
    pub permissions: PermissionOverride,
}

impl Role {
    #[must_use]
    pub fn new(id: impl Into<RoleId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            colour: None,
            hoist: false,
            rank: 0,
            permissions: PermissionOverride::default(),
        }
    }

    #[must_use]
    pub const fn hoisted(mut self, hoist: bool) -> Self {
        self.hoist = hoist;
        self
    }

    #[must_use]
    pub const fn with_rank(mut self, rank: i64) -> Self {
        self.rank = rank;
        self
    }

    #[must_use]
    pub fn with_colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = Some(colour.into());
        self
    }

    #[must_use]
    pub const fn with_permissions(mut self, permissions: PermissionOverride) -> Self {
        self.permissions = permissions;
        self
    }

    #[must_use]
    pub const fn id(&self) -> &RoleId {
        &self.id
    }
}
