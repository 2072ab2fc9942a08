//! Logging utilities for gateway-chat
//!
//! Re-exports tracing macros with log_* naming so call sites read the same
//! across modules. Subscriber setup belongs to the binary.

pub use tracing::{debug as log_debug, error as log_error, info as log_info, warn as log_warn};
