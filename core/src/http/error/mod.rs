//! Error types.

pub use security_error::SecurityError;

mod security_error;
