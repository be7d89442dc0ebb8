//! Chat data port for reading servers, channels, members and users.

use async_trait::async_trait;

use crate::domain::entities::{Channel, ChannelId, Member, Server, ServerId, User, UserId};
use crate::domain::errors::DataError;

/// Port onto the client-side chat data cache.
///
/// Reads are synchronous snapshots of whatever is currently cached. The
/// revision increases every time cached data changes, so derived views can
/// tell when their inputs are stale.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatDataPort: Send + Sync {
    /// Returns the logged in user.
    fn current_user(&self) -> Option<User>;

    /// Returns every server the user belongs to, in natural order.
    fn servers(&self) -> Vec<Server>;

    /// Looks up a server.
    fn server(&self, id: &ServerId) -> Option<Server>;

    /// Looks up a channel.
    fn channel(&self, id: &ChannelId) -> Option<Channel>;

    /// Returns the channels of a server in configured order.
    fn server_channels(&self, id: &ServerId) -> Vec<Channel>;

    /// Returns direct conversations with unread messages.
    fn unread_conversations(&self) -> Vec<Channel>;

    /// Returns the cached members of a server.
    fn members(&self, server: &ServerId) -> Vec<Member>;

    /// Looks up a user.
    fn user(&self, id: &UserId) -> Option<User>;

    /// Returns the current data revision.
    fn revision(&self) -> u64;

    /// Fetches the member list of a server into the cache.
    ///
    /// Returns the number of members now cached for the server.
    async fn sync_members(
        &self,
        server: &ServerId,
        exclude_offline: bool,
    ) -> Result<usize, DataError>;
}
