// Core configuration types
mod core;
mod loader;

pub use self::core::{default_exclude, AnalysisSettings, FlogConfig, DEFAULT_THRESHOLD};
pub use self::loader::{
    directory_ancestors, load_config, load_config_from, load_config_in,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
