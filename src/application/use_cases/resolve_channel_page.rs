//! Resolves which view a channel route should display.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::{Channel, ChannelId, ChannelKind};
use crate::domain::ports::ChatDataPort;

/// What the channel page shows for a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelPageView {
    /// No channel with the requested id.
    NotFound,
    /// A message-bearing channel.
    Text(Channel),
    /// A legacy voice channel, which only gets a notice.
    LegacyVoice(Channel),
    /// A channel kind this client does not know.
    Unsupported(Channel),
}

impl ChannelPageView {
    #[must_use]
    pub const fn channel(&self) -> Option<&Channel> {
        match self {
            Self::NotFound => None,
            Self::Text(c) | Self::LegacyVoice(c) | Self::Unsupported(c) => Some(c),
        }
    }

    /// Only groups and server text channels list their members.
    #[must_use]
    pub fn has_member_sidebar(&self) -> bool {
        matches!(
            self,
            Self::Text(c) if matches!(c.kind(), ChannelKind::Group | ChannelKind::TextChannel)
        )
    }
}

#[derive(Clone)]
pub struct ResolveChannelPageUseCase {
    port: Arc<dyn ChatDataPort>,
}

impl ResolveChannelPageUseCase {
    #[must_use]
    pub const fn new(port: Arc<dyn ChatDataPort>) -> Self {
        Self { port }
    }

    #[must_use]
    pub fn execute(&self, channel_id: Option<&ChannelId>) -> ChannelPageView {
        let Some(channel) = channel_id.and_then(|id| self.port.channel(id)) else {
            debug!(channel = ?channel_id, "Channel not found");
            return ChannelPageView::NotFound;
        };

        match channel.kind() {
            kind if kind.is_text_bearing() => ChannelPageView::Text(channel),
            kind if kind.is_legacy_voice() => ChannelPageView::LegacyVoice(channel),
            kind => {
                debug!(?kind, channel = %channel.id(), "Unsupported channel type");
                ChannelPageView::Unsupported(channel)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockChatDataPort;
    use test_case::test_case;

    fn use_case(kind: Option<ChannelKind>) -> ResolveChannelPageUseCase {
        let mut port = MockChatDataPort::new();
        port.expect_channel()
            .returning(move |id| kind.map(|k| Channel::new(id.clone(), k)));
        ResolveChannelPageUseCase::new(Arc::new(port))
    }

    #[test]
    fn test_unknown_channel_is_not_found() {
        let view = use_case(None).execute(Some(&ChannelId::from("missing")));
        assert_eq!(view, ChannelPageView::NotFound);
    }

    #[test]
    fn test_absent_route_parameter_is_not_found() {
        let port = MockChatDataPort::new();
        let view = ResolveChannelPageUseCase::new(Arc::new(port)).execute(None);
        assert_eq!(view, ChannelPageView::NotFound);
    }

    #[test_case(ChannelKind::TextChannel, true ; "text channel")]
    #[test_case(ChannelKind::Group, true ; "group")]
    #[test_case(ChannelKind::DirectMessage, false ; "direct message")]
    #[test_case(ChannelKind::SavedMessages, false ; "saved messages")]
    fn test_text_bearing_kinds(kind: ChannelKind, sidebar: bool) {
        let view = use_case(Some(kind)).execute(Some(&ChannelId::from("c")));

        assert!(matches!(view, ChannelPageView::Text(_)));
        assert_eq!(view.has_member_sidebar(), sidebar);
    }

    #[test]
    fn test_voice_channel_is_legacy() {
        let view = use_case(Some(ChannelKind::VoiceChannel)).execute(Some(&ChannelId::from("v")));

        assert!(matches!(view, ChannelPageView::LegacyVoice(_)));
        assert!(!view.has_member_sidebar());
    }

    #[test]
    fn test_unknown_kind_falls_back() {
        let view = use_case(Some(ChannelKind::Unknown)).execute(Some(&ChannelId::from("x")));

        assert!(matches!(view, ChannelPageView::Unsupported(_)));
        assert_eq!(view.channel().map(|c| c.id().as_str()), Some("x"));
    }
}
