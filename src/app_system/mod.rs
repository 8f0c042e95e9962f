//! System orchestration, configuration, startup, and shutdown logic.

pub mod config;
pub mod liveness;
pub mod orderflow_system;
pub mod tracing;

pub use self::config::*;
pub use self::liveness::*;
pub use self::orderflow_system::*;
pub use self::tracing::*;
