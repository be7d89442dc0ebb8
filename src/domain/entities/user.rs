//! Chat platform user entity.

use serde::{Deserialize, Serialize};

use super::id::string_id;

string_id!(
    /// Unique identifier for a user.
    UserId
);

/// Presence a user has chosen to broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Presence {
    Online,
    Idle,
    Focus,
    Busy,
    #[default]
    Invisible,
}

impl Presence {
    /// Returns the human readable name of this presence.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Idle => "Idle",
            Self::Focus => "Focus",
            Self::Busy => "Do Not Disturb",
            Self::Invisible => "Offline",
        }
    }
}

/// Custom status set by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatus {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub presence: Option<Presence>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    #[serde(default = "default_discriminator")]
    discriminator: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    online: bool,
    #[serde(default)]
    status: Option<UserStatus>,
    #[serde(default)]
    privileged: bool,
    #[serde(default)]
    bot: bool,
}

fn default_discriminator() -> String {
    "0000".to_string()
}

impl User {
    #[must_use]
    pub fn new(id: impl Into<UserId>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            discriminator: default_discriminator(),
            display_name: None,
            avatar: None,
            online: false,
            status: None,
            privileged: false,
            bot: false,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    #[must_use]
    pub const fn with_online(mut self, online: bool) -> Self {
        self.online = online;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn with_privileged(mut self, privileged: bool) -> Self {
        self.privileged = privileged;
        self
    }

    #[must_use]
    pub const fn with_bot(mut self, bot: bool) -> Self {
        self.bot = bot;
        self
    }

    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    #[must_use]
    pub const fn is_online(&self) -> bool {
        self.online
    }

    #[must_use]
    pub const fn status(&self) -> Option<&UserStatus> {
        self.status.as_ref()
    }

    #[must_use]
    pub const fn is_privileged(&self) -> bool {
        self.privileged
    }

    #[must_use]
    pub const fn is_bot(&self) -> bool {
        self.bot
    }

    /// Returns the display name, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    /// Returns the effective presence; offline users are always invisible.
    #[must_use]
    pub fn presence(&self) -> Presence {
        if !self.online {
            return Presence::Invisible;
        }
        self.status
            .as_ref()
            .and_then(|s| s.presence)
            .unwrap_or(Presence::Online)
    }

    /// Sets the online flag.
    pub const fn set_online(&mut self, online: bool) {
        self.online = online;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("01HUSER", "ann").with_avatar("abc123");

        assert_eq!(user.id().as_str(), "01HUSER");
        assert_eq!(user.username(), "ann");
        assert_eq!(user.discriminator(), "0000");
        assert_eq!(user.avatar(), Some("abc123"));
        assert!(!user.is_bot());
    }

    #[test]
    fn test_display_name_fallback() {
        let user = User::new("1", "handle");
        assert_eq!(user.display_name(), "handle");

        let user = user.with_display_name("Display Name");
        assert_eq!(user.display_name(), "Display Name");
    }

    #[test]
    fn test_presence_offline_is_invisible() {
        let user = User::new("1", "a").with_status(UserStatus {
            text: None,
            presence: Some(Presence::Busy),
        });
        assert_eq!(user.presence(), Presence::Invisible);

        let user = user.with_online(true);
        assert_eq!(user.presence(), Presence::Busy);
    }

    #[test]
    fn test_presence_defaults_to_online() {
        let user = User::new("1", "a").with_online(true);
        assert_eq!(user.presence(), Presence::Online);
    }

    #[test]
    fn test_deserialize_minimal_user() {
        let user: User = serde_json::from_str(r#"{"id": "01X", "username": "cid"}"#)
            .expect("minimal user parses");
        assert_eq!(user.display_name(), "cid");
        assert!(!user.is_online());
        assert!(user.status().is_none());
    }
}
