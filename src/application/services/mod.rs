//! Pure derivations shared by the presentation layer.

pub mod collation;
pub mod emoji;
pub mod member_list;
pub mod server_order;
pub mod user_presentation;

pub use collation::locale_compare;
pub use member_list::{MemberListEntry, MemberListPipeline, RecipientList};
pub use server_order::{apply_saved_order, move_item};
pub use user_presentation::{
    UserInformation, avatar_initial, conversation_label, status_message, user_information,
};
