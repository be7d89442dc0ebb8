use chrono::{DateTime, Utc};

use crate::domain::entities::{Channel, Member, Permissions, Server};

pub struct PermissionCalculator;

impl PermissionCalculator {
    /// Computes a member's effective permissions in a server channel.
    #[must_use]
    pub fn compute_permissions(
        server: &Server,
        channel: &Channel,
        member: &Member,
        now: DateTime<Utc>,
    ) -> Permissions {
        let mut permissions = Self::granted_permissions(server, channel, member);

        if member.is_timed_out(now) {
            permissions &= Permissions::TIMEOUT_ALLOWED;
        }

        permissions
    }

    /// Returns true if the member can see the channel.
    ///
    /// A timeout never removes `VIEW_CHANNEL`, so the answer does not depend
    /// on the current time.
    #[must_use]
    pub fn can_view(server: &Server, channel: &Channel, member: &Member) -> bool {
        Self::granted_permissions(server, channel, member).contains(Permissions::VIEW_CHANNEL)
    }

    /// Returns true if some members of the server may be unable to see the
    /// channel: the server default lacks `VIEW_CHANNEL`, or a server role,
    /// the channel default or a channel role override denies it.
    #[must_use]
    pub fn potentially_restricted(server: &Server, channel: &Channel) -> bool {
        if channel.server_id() != Some(server.id()) {
            return false;
        }

        !server.default_permissions().contains(Permissions::VIEW_CHANNEL)
            || server
                .roles()
                .iter()
                .any(|role| role.permissions.denies(Permissions::VIEW_CHANNEL))
            || channel
                .default_permissions()
                .is_some_and(|ov| ov.denies(Permissions::VIEW_CHANNEL))
            || channel
                .role_overrides()
                .any(|ov| ov.denies(Permissions::VIEW_CHANNEL))
    }

    /// Permissions from the server and channel layers, before any timeout.
    ///
    /// Role overrides are applied from the lowest precedence role to the
    /// highest so that higher ranked roles win conflicts.
    fn granted_permissions(server: &Server, channel: &Channel, member: &Member) -> Permissions {
        if server.owner() == member.user_id() {
            return Permissions::all();
        }

        let mut member_roles: Vec<_> = member
            .roles()
            .iter()
            .filter_map(|id| server.role(id))
            .collect();
        member_roles.sort_by(|a, b| b.rank.cmp(&a.rank));

        let mut permissions = server.default_permissions();

        for role in &member_roles {
            permissions = role.permissions.apply(permissions);
        }

        if let Some(overwrite) = channel.default_permissions() {
            permissions = overwrite.apply(permissions);
        }

        for role in &member_roles {
            if let Some(overwrite) = channel.role_permissions(&role.id) {
                permissions = overwrite.apply(permissions);
            }
        }

        permissions
    }
}
