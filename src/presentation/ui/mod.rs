//! UI screens.

mod app;
mod home_screen;
pub mod utils;

pub use app::App;
pub use home_screen::{HomePanel, HomeScreen};
