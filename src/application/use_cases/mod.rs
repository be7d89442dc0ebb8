//! Use case implementations.

mod resolve_channel_page;
mod sync_members;

pub use resolve_channel_page::{ChannelPageView, ResolveChannelPageUseCase};
pub use sync_members::{SyncMembersUseCase, SyncScope};
