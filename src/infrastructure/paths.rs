//! Path utilities for the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host` inside the sandbox, so paths
//! given in plugin configuration need translating before use.

use std::path::PathBuf;

/// Directory holding the trace output file.
///
/// Resolves to `~/.local/share/zellij/trustboard` on the host.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("trustboard")
}

/// Maps a `~`-relative host path into the sandbox.
///
/// ```
/// use trustboard::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/ops.toml"), "/host/themes/ops.toml");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_is_under_host_share() {
        assert!(get_data_dir().ends_with("zellij/trustboard"));
        assert!(get_data_dir().starts_with("/host"));
    }

    #[test]
    fn bare_tilde_maps_to_host_root() {
        assert_eq!(expand_tilde("~"), "/host");
        assert_eq!(expand_tilde("themes/~x"), "themes/~x");
    }
}
