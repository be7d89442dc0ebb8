//! Application layer with derivations and use cases.

/// Member list pipeline, collation and presentation helpers.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use services::{MemberListPipeline, RecipientList, locale_compare};
pub use use_cases::{
    ChannelPageView, ResolveChannelPageUseCase, SyncMembersUseCase, SyncScope,
};
