//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! $CONFIG_PATH (or --config <path> when unset)
//!     → loader.rs (read, parse TOML, apply $ENV override)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - Optional sections have defaults; `env`, `storage_path` and the listen
//!   address must be given
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config_path, ConfigError, CONFIG_PATH_VAR};
pub use schema::HttpServerConfig;
pub use schema::ObservabilityConfig;
pub use schema::ServiceConfig;
pub use schema::ShutdownConfig;
pub use schema::TimeoutConfig;
