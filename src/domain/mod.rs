//! Domain layer with core entities, routes and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Keybinding definitions.
pub mod keybinding;
/// Port definitions.
pub mod ports;
/// Navigation routes.
pub mod routing;
/// Domain services.
pub mod services;

pub use entities::{Channel, ChannelKind, Member, Role, Server, User};
pub use errors::DataError;
pub use ports::ChatDataPort;
pub use routing::{Route, RouteError};
