//! Flat recipient list for group conversations.

use crate::application::services::collation::locale_compare;
use crate::domain::entities::{Channel, User};
use crate::domain::ports::ChatDataPort;

use super::memo::Memo;

/// Resolves a group's recipients sorted by display name.
///
/// Recipients whose user is not cached are skipped.
#[must_use]
pub fn sorted_recipients(port: &dyn ChatDataPort, channel: &Channel) -> Vec<User> {
    let mut users: Vec<User> = channel
        .recipient_ids()
        .iter()
        .filter_map(|id| port.user(id))
        .collect();
    users.sort_by(|a, b| locale_compare(a.display_name(), b.display_name()));
    users
}

/// Memoized recipient list for the group sidebar.
#[derive(Debug, Default)]
pub struct RecipientList {
    users: Memo<(Channel, u64), Vec<User>>,
}

impl RecipientList {
    pub fn compute(&mut self, port: &dyn ChatDataPort, channel: &Channel) -> &[User] {
        self.users
            .get_or_compute((channel.clone(), port.revision()), || {
                sorted_recipients(port, channel)
            })
    }

    /// Version of the current list, bumped when its contents change.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.users.version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ChannelKind, UserId};
    use crate::domain::ports::mocks::MockChatDataPort;

    fn group() -> Channel {
        Channel::new("G1", ChannelKind::Group).with_recipients(vec![
            UserId::from("U1"),
            UserId::from("U2"),
            UserId::from("U3"),
            UserId::from("missing"),
        ])
    }

    fn port() -> MockChatDataPort {
        let mut port = MockChatDataPort::new();
        port.expect_user().returning(|id| match id.as_str() {
            "U1" => Some(User::new("U1", "zoe")),
            "U2" => Some(User::new("U2", "x").with_display_name("Adam")),
            "U3" => Some(User::new("U3", "mia")),
            _ => None,
        });
        port.expect_revision().return_const(1_u64);
        port
    }

    #[test]
    fn test_recipients_sorted_by_display_name() {
        let users = sorted_recipients(&port(), &group());
        let names: Vec<&str> = users.iter().map(User::display_name).collect();

        assert_eq!(names, vec!["Adam", "mia", "zoe"]);
    }

    #[test]
    fn test_recipient_list_memoized() {
        let port = port();
        let mut list = RecipientList::default();

        assert_eq!(list.compute(&port, &group()).len(), 3);
        assert_eq!(list.compute(&port, &group()).len(), 3);
        assert_eq!(list.version(), 1);
    }
}
