//! Configuration file loading for pollster
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `POLLSTER_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./pollster.toml` or `./.pollster.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/pollster/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileListingConfig, FileLoggingConfig, FileOutputConfig, FileStoreConfig,
};
pub use loader::ConfigLoader;
