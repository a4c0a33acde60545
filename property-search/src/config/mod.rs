//! Startup configuration and dependency wiring.

mod dependencies;
mod logging;
mod settings;

pub use dependencies::Dependencies;
pub use logging::{init_tracing, LogFormat};
pub use settings::AppConfig;
