//! TOML configuration loader
//!
//! Every section and key is optional; anything missing keeps its default.
//!
//! ```toml
//! [arm]
//! center_offset = 460
//!
//! [classifier]
//! red_orange_threshold = 60
//! ```

use super::{ConfigError, RigConfig};

/// Parse and validate a TOML rig configuration
pub fn parse_config(input: &str) -> Result<RigConfig, ConfigError> {
    let config: RigConfig = ::toml::from_str(input).map_err(|_| ConfigError::Parse)?;
    config.validate()?;
    Ok(config)
}
