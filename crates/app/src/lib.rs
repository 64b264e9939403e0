pub mod config;
pub mod draw;
pub mod logging;

pub use config::{Config, ConfigError, EncryptorKind, ToolsConfig};
pub use draw::{run, DrawError, DrawOutcome, DrawSettings};
