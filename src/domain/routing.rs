//! Navigation routes encoded as link paths.

use std::str::FromStr;

use thiserror::Error;

use super::entities::{ChannelId, ServerId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("unrecognised route: {0}")]
    Unrecognised(String),
}

/// A location the client can navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Route {
    /// Home screen, no server selected.
    #[default]
    Home,
    /// Administration panel for privileged users.
    Admin,
    /// A conversation outside any server.
    Channel(ChannelId),
    /// A server landing page.
    Server(ServerId),
    /// A channel inside a server.
    ServerChannel(ServerId, ChannelId),
}

impl Route {
    /// Returns the selected server id encoded in this route.
    #[must_use]
    pub const fn server_id(&self) -> Option<&ServerId> {
        match self {
            Self::Server(id) | Self::ServerChannel(id, _) => Some(id),
            _ => None,
        }
    }

    /// Returns the channel id route parameter.
    #[must_use]
    pub const fn channel_id(&self) -> Option<&ChannelId> {
        match self {
            Self::Channel(id) | Self::ServerChannel(_, id) => Some(id),
            _ => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => write!(f, "/"),
            Self::Admin => write!(f, "/admin"),
            Self::Channel(id) => write!(f, "/channel/{id}"),
            Self::Server(id) => write!(f, "/server/{id}"),
            Self::ServerChannel(server, channel) => {
                write!(f, "/server/{server}/channel/{channel}")
            }
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('/').filter(|seg| !seg.is_empty()).collect();

        match segments.as_slice() {
            [] => Ok(Self::Home),
            ["admin"] => Ok(Self::Admin),
            ["channel", id] => Ok(Self::Channel(ChannelId::from(*id))),
            ["server", id] => Ok(Self::Server(ServerId::from(*id))),
            ["server", server, "channel", channel] => Ok(Self::ServerChannel(
                ServerId::from(*server),
                ChannelId::from(*channel),
            )),
            _ => Err(RouteError::Unrecognised(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("/", Route::Home ; "home")]
    #[test_case("/admin", Route::Admin ; "admin")]
    #[test_case("/channel/C1", Route::Channel(ChannelId::from("C1")) ; "channel")]
    #[test_case("/server/S1", Route::Server(ServerId::from("S1")) ; "server")]
    #[test_case(
        "/server/S1/channel/C1",
        Route::ServerChannel(ServerId::from("S1"), ChannelId::from("C1"))
        ; "server channel"
    )]
    fn test_route_round_trip(path: &str, route: Route) {
        assert_eq!(path.parse::<Route>(), Ok(route.clone()));
        assert_eq!(route.to_string(), path);
    }

    #[test]
    fn test_trailing_slash_tolerated() {
        assert_eq!("/admin/".parse::<Route>(), Ok(Route::Admin));
    }

    #[test]
    fn test_unrecognised_route() {
        assert!(matches!(
            "/settings/profile".parse::<Route>(),
            Err(RouteError::Unrecognised(_))
        ));
    }

    #[test]
    fn test_selected_server() {
        assert_eq!(Route::Home.server_id(), None);
        assert_eq!(
            Route::Server(ServerId::from("S1")).server_id(),
            Some(&ServerId::from("S1"))
        );
        assert_eq!(Route::Channel(ChannelId::from("C")).server_id(), None);
    }
}
