//! Path resolution for toolgate configuration.
//!
//! XDG-compliant, resolved from environment variables only.

use std::env;
use std::path::PathBuf;

/// Get the XDG-compliant config directory for toolgate.
///
/// # Returns
/// `$XDG_CONFIG_HOME/toolgate`, or `~/.config/toolgate` when
/// `XDG_CONFIG_HOME` is unset.
///
/// # Panics
/// Panics if neither `XDG_CONFIG_HOME` nor `HOME` is set.
pub fn config_dir() -> PathBuf {
    let config_home = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });

    config_home.join("toolgate")
}

/// Get the config file path (`config_dir()/config.json`).
pub fn config_file() -> PathBuf {
    config_dir().join("config.json")
}
