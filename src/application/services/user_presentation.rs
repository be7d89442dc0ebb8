//! Derives what a member row shows: name, avatar glyph, colour and status.

use crate::domain::entities::{Channel, Member, Presence, Server, User, UserId};

/// Display information for a user, optionally in the context of a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInformation {
    pub username: String,
    pub avatar: Option<String>,
    pub colour: Option<String>,
}

/// Resolves the name, avatar and name colour shown for a user.
///
/// Server nickname and avatar take priority over the user's own. The name
/// colour comes from the highest precedence role with a colour set.
#[must_use]
pub fn user_information(
    user: Option<&User>,
    member: Option<&Member>,
    server: Option<&Server>,
) -> UserInformation {
    let username = member
        .and_then(|m| m.nickname.clone())
        .or_else(|| user.map(|u| u.display_name().to_string()))
        .or_else(|| member.map(|m| m.user_id().to_string()))
        .unwrap_or_default();

    let avatar = member
        .and_then(|m| m.avatar.clone())
        .or_else(|| user.and_then(|u| u.avatar().map(str::to_string)));

    let colour = match (member, server) {
        (Some(member), Some(server)) => member
            .roles()
            .iter()
            .filter_map(|id| server.role(id))
            .filter(|role| role.colour.is_some())
            .min_by_key(|role| role.rank)
            .and_then(|role| role.colour.clone()),
        _ => None,
    };

    UserInformation {
        username,
        avatar,
        colour,
    }
}

/// Returns the status line shown under a user's name.
///
/// Offline users show nothing. Online users show their custom status text,
/// or the presence name when it is anything other than plain online.
#[must_use]
pub fn status_message(user: &User) -> Option<String> {
    if !user.is_online() {
        return None;
    }

    if let Some(text) = user
        .status()
        .and_then(|s| s.text.as_deref())
        .filter(|t| !t.trim().is_empty())
    {
        return Some(text.to_string());
    }

    match user.presence() {
        p @ (Presence::Idle | Presence::Focus | Presence::Busy) => Some(p.label().to_string()),
        Presence::Online | Presence::Invisible => None,
    }
}

/// Generates the fallback avatar glyph from a name.
#[must_use]
pub fn avatar_initial(name: &str) -> String {
    name.trim()
        .chars()
        .find(|c| c.is_alphanumeric())
        .map_or_else(|| "?".to_string(), |c| c.to_uppercase().collect())
}

/// Label for a conversation: its name, or else the username of the first
/// other recipient, or else its id.
#[must_use]
pub fn conversation_label(
    channel: &Channel,
    self_id: Option<&UserId>,
    lookup: impl Fn(&UserId) -> Option<User>,
) -> String {
    if let Some(name) = channel.name().filter(|n| !n.trim().is_empty()) {
        return name.to_string();
    }

    channel
        .recipient_ids()
        .iter()
        .filter(|id| Some(*id) != self_id)
        .find_map(|id| lookup(id))
        .map_or_else(|| channel.id().to_string(), |u| u.username().to_string())
}
