//! Domain entity definitions.

mod id;

mod channel;
mod member;
mod permissions;
mod role;
mod server;
mod user;

pub use channel::{Channel, ChannelId, ChannelKind};
pub use member::{Member, MemberId};
pub use permissions::{PermissionOverride, Permissions};
pub use role::{Role, RoleId};
pub use server::{Server, ServerId};
pub use user::{Presence, User, UserId, UserStatus};
