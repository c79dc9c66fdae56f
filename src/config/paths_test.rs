//! Tests for config path resolution.

use crate::config::{config_dir, config_file};

#[test]
fn test_config_dir_ends_with_toolgate() {
    // Just verify the suffix (env vars are unreliable in parallel tests).
    let path = config_dir();
    assert!(path.ends_with("toolgate"));
}

#[test]
fn test_config_file_ends_with_config_json() {
    let path = config_file();
    assert!(path.ends_with("toolgate/config.json"));
}
