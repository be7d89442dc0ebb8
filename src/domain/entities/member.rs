use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RoleId, ServerId, UserId};

/// Composite key of a server membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId {
    pub server: ServerId,
    pub user: UserId,
}

impl MemberId {
    #[must_use]
    pub fn new(server: impl Into<ServerId>, user: impl Into<UserId>) -> Self {
        Self {
            server: server.into(),
            user: user.into(),
        }
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.server, self.user)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleId>,
    #[serde(default)]
    pub timeout: Option<DateTime<Utc>>,
}

impl Member {
    #[must_use]
    pub const fn new(id: MemberId) -> Self {
        Self {
            id,
            nickname: None,
            avatar: None,
            roles: Vec::new(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    #[must_use]
    pub fn with_roles(mut self, roles: Vec<RoleId>) -> Self {
        self.roles = roles;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, until: DateTime<Utc>) -> Self {
        self.timeout = Some(until);
        self
    }

    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.id.user
    }

    #[must_use]
    pub const fn server_id(&self) -> &ServerId {
        &self.id.server
    }

    #[must_use]
    pub fn roles(&self) -> &[RoleId] {
        &self.roles
    }

    #[must_use]
    pub fn has_role(&self, role: &RoleId) -> bool {
        self.roles.contains(role)
    }

    #[must_use]
    pub fn is_timed_out(&self, now: DateTime<Utc>) -> bool {
        self.timeout.is_some_and(|until| until > now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_member_id_display() {
        let id = MemberId::new("S1", "U1");
        assert_eq!(id.to_string(), "S1:U1");
    }

    #[test]
    fn test_timeout_window() {
        let now = Utc::now();
        let member = Member::new(MemberId::new("S", "U")).with_timeout(now + Duration::minutes(5));

        assert!(member.is_timed_out(now));
        assert!(!member.is_timed_out(now + Duration::minutes(10)));
    }
}
