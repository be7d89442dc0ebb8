mod channel_header;
mod channel_page;
mod footer_bar;
mod member_sidebar;
mod server_list;
mod virtual_list;

pub use channel_header::{ChannelHeader, ChannelHeaderStyle};
pub use channel_page::{
    ChannelPage, LEGACY_VOICE_TEXT, MESSAGES_PLACEHOLDER, NOT_FOUND_TEXT, UNKNOWN_KIND_TEXT,
};
pub use footer_bar::{FocusContext, FooterBar, FooterBarStyle, StatusLevel};
pub use member_sidebar::{
    MEMBER_SIDEBAR_WIDTH, MemberSidebar, MemberSidebarAction, MemberSidebarState, UserMenuItem,
};
pub use server_list::{
    Conversation, ServerList, ServerListAction, ServerListItem, ServerListState,
};
pub use virtual_list::{VirtualList, VirtualListState, item_area, visible_range};
