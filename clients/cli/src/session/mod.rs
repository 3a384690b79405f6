pub mod headless_mode;
pub mod messages;
pub mod once_mode;
pub mod setup;

pub use headless_mode::run_headless_mode;
pub use once_mode::render_once;
pub use setup::{SessionData, setup_session};
