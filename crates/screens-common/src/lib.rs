pub mod errors;

pub use errors::{BridgeError, ScreensError, ServerError};

pub type Result<T> = std::result::Result<T, ScreensError>;
