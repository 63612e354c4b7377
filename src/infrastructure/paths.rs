//! Sandbox path helpers.

use std::path::PathBuf;

/// Sandbox mount point of the host home directory.
const HOST_ROOT: &str = "/host";

/// Directory holding the trace file.
///
/// Resolves to `~/.local/share/zellij/parley` on the host when Zellij was
/// started from the home directory.
///
/// # Examples
///
/// ```
/// use parley::infrastructure::data_dir;
///
/// assert_eq!(data_dir().to_str(), Some("/host/.local/share/zellij/parley"));
/// ```
#[must_use]
pub fn data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij/parley")
}

/// Maps `~` and `~/...` onto the sandbox's `/host` mount.
///
/// Used for the `theme_file` and `responses_file` configuration keys.
///
/// # Examples
///
/// ```
/// use parley::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/replies.toml"), "/etc/replies.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_leaves_user_homes_alone() {
        assert_eq!(expand_tilde("~alice/file"), "~alice/file");
        assert_eq!(expand_tilde("relative/~/x"), "relative/~/x");
    }
}
