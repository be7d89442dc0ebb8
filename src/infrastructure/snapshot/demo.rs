//! Built-in data used when no snapshot file is configured.

use super::Snapshot;
use crate::domain::entities::{
    Channel, ChannelKind, Member, MemberId, PermissionOverride, Permissions, Presence, Role,
    Server, User, UserStatus,
};

const SELF_ID: &str = "01HDEMO0000000000000000SELF";

fn status(text: Option<&str>, presence: Presence) -> UserStatus {
    UserStatus {
        text: text.map(str::to_string),
        presence: Some(presence),
    }
}

fn users() -> Vec<User> {
    vec![
        User::new(SELF_ID, "you")
            .with_display_name("You")
            .with_online(true)
            .with_privileged(true),
        User::new("U_ANN", "ann")
            .with_display_name("Ann")
            .with_online(true)
            .with_status(status(Some("shipping :rocket:"), Presence::Online)),
        User::new("U_BOB", "bob")
            .with_online(true)
            .with_status(status(None, Presence::Busy)),
        User::new("U_CID", "cid").with_display_name("Cid"),
        User::new("U_DEE", "dee")
            .with_online(true)
            .with_status(status(None, Presence::Idle)),
        User::new("U_EVE", "Émile")
            .with_online(true)
            .with_status(status(
                Some(":01GX9Q2ZK3M4N5P6Q7R8S9T0VW: reviewing"),
                Presence::Focus,
            )),
        User::new("U_FAY", "fay").with_online(true),
        User::new("U_GUS", "gus"),
        User::new("U_HAL", "hal")
            .with_display_name("Hal")
            .with_online(true)
            .with_bot(true),
    ]
}

fn member(server: &str, user: &str) -> Member {
    Member::new(MemberId::new(server, user))
}

fn lounge() -> (Server, Vec<Channel>, Vec<Member>) {
    let view = Permissions::VIEW_CHANNEL;
    let server = Server::new("S_LOUNGE", "Rust Lounge", "U_ANN")
        .with_default_permissions(Permissions::VIEW_CHANNEL | Permissions::READ_MESSAGE_HISTORY)
        .with_roles(vec![
            Role::new("R_ADMIN", "Admins")
                .hoisted(true)
                .with_rank(0)
                .with_colour("#E9196C"),
            Role::new("R_MOD", "Moderators")
                .hoisted(true)
                .with_rank(1)
                .with_colour("linear-gradient(to right, #4F8EF7, #9C5BF5)"),
            Role::new("R_REGULAR", "Regulars").with_rank(2).with_colour("teal"),
        ])
        .with_channels(vec!["C_GENERAL".into(), "C_STAFF".into(), "C_VOICE".into(), "C_FORUM".into()])
        .with_unread(true, 3);

    let channels = vec![
        Channel::new("C_GENERAL", ChannelKind::TextChannel)
            .with_name("general")
            .with_server("S_LOUNGE")
            .with_description("Say hi :wave: and be kind :heart:"),
        Channel::new("C_STAFF", ChannelKind::TextChannel)
            .with_name("staff")
            .with_server("S_LOUNGE")
            .with_description("Moderation only")
            .with_default_permissions(PermissionOverride::new(Permissions::empty(), view))
            .with_role_permissions("R_ADMIN", PermissionOverride::new(view, Permissions::empty()))
            .with_role_permissions("R_MOD", PermissionOverride::new(view, Permissions::empty())),
        Channel::new("C_VOICE", ChannelKind::VoiceChannel)
            .with_name("hangout")
            .with_server("S_LOUNGE"),
        Channel::new("C_FORUM", ChannelKind::Unknown)
            .with_name("forum")
            .with_server("S_LOUNGE"),
    ];

    let members = vec![
        member("S_LOUNGE", SELF_ID).with_roles(vec!["R_REGULAR".into()]),
        member("S_LOUNGE", "U_ANN").with_roles(vec!["R_ADMIN".into()]),
        member("S_LOUNGE", "U_BOB")
            .with_nickname("Bobby")
            .with_roles(vec!["R_MOD".into(), "R_REGULAR".into()]),
        member("S_LOUNGE", "U_CID").with_roles(vec!["R_MOD".into()]),
        member("S_LOUNGE", "U_DEE").with_roles(vec!["R_REGULAR".into()]),
        member("S_LOUNGE", "U_EVE"),
        member("S_LOUNGE", "U_FAY").with_nickname("fay 🌙"),
        member("S_LOUNGE", "U_GUS"),
        member("S_LOUNGE", "U_HAL").with_roles(vec!["R_MOD".into()]),
    ];

    (server, channels, members)
}

fn workshop() -> (Server, Vec<Channel>, Vec<Member>) {
    let server = Server::new("S_WORKSHOP", "Workshop", SELF_ID)
        .with_default_permissions(Permissions::VIEW_CHANNEL)
        .with_channels(vec!["C_BENCH".into()]);

    let channels = vec![
        Channel::new("C_BENCH", ChannelKind::TextChannel)
            .with_name("bench")
            .with_server("S_WORKSHOP"),
    ];

    let members = vec![
        member("S_WORKSHOP", SELF_ID),
        member("S_WORKSHOP", "U_DEE"),
        member("S_WORKSHOP", "U_GUS"),
    ];

    (server, channels, members)
}

/// Returns a small but complete data set for trying the client out.
#[must_use]
pub fn demo_snapshot() -> Snapshot {
    let mut snapshot = Snapshot {
        self_id: Some(SELF_ID.into()),
        users: users(),
        ..Snapshot::default()
    };

    for (server, channels, members) in [lounge(), workshop()] {
        snapshot.servers.push(server);
        snapshot.channels.extend(channels);
        snapshot.members.extend(members);
    }

    snapshot.channels.extend([
        Channel::new("C_SAVED", ChannelKind::SavedMessages).with_recipients(vec![SELF_ID.into()]),
        Channel::new("C_DM_ANN", ChannelKind::DirectMessage)
            .with_recipients(vec![SELF_ID.into(), "U_ANN".into()])
            .with_unread(true, 1),
        Channel::new("C_GROUP", ChannelKind::Group)
            .with_name("weekend plans")
            .with_recipients(vec![
                SELF_ID.into(),
                "U_DEE".into(),
                "U_BOB".into(),
                "U_EVE".into(),
            ])
            .with_unread(true, 0),
    ]);

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::PermissionCalculator;

    #[test]
    fn test_demo_references_are_consistent() {
        let snapshot = demo_snapshot();

        for member in &snapshot.members {
            assert!(snapshot.users.iter().any(|u| u.id() == member.user_id()));
            assert!(snapshot.servers.iter().any(|s| s.id() == member.server_id()));
        }
        for server in &snapshot.servers {
            for id in server.channel_ids() {
                assert!(snapshot.channels.iter().any(|c| c.id() == id));
            }
        }
    }

    #[test]
    fn test_demo_staff_channel_is_restricted() {
        let snapshot = demo_snapshot();
        let staff = snapshot
            .channels
            .iter()
            .find(|c| c.id().as_str() == "C_STAFF")
            .unwrap();
        let server = snapshot
            .servers
            .iter()
            .find(|s| Some(s.id()) == staff.server_id())
            .unwrap();

        assert!(PermissionCalculator::potentially_restricted(server, staff));
    }
}
