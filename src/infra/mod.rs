mod config;
mod discover;
mod editor;
mod paths;
mod record_store;
mod session;

pub use config::*;
pub use discover::*;
pub use editor::*;
pub use paths::*;
pub use record_store::*;
pub use session::*;
