//! User settings loaded from `settings.conf`.

use std::path::{Path, PathBuf};

use crate::sources::endpoints::DEFAULT_BASE_URL;
use crate::util::config::{parse_key_value, skip_comment_or_empty};
use crate::util::paths;

/// Runtime configuration for the controller, HTTP client, store, and logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Recipe service API root.
    pub api_base_url: String,
    /// Term searched at startup (`search.php?s=<term>`).
    pub default_search: String,
    /// TCP connect timeout for requests.
    pub connect_timeout_secs: u64,
    /// Overall per-request timeout; `None` leaves requests unbounded.
    pub request_timeout_secs: Option<u64>,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Directory for the file-backed persistent store; `None` uses the config dir.
    pub store_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            default_search: "beef".to_string(),
            connect_timeout_secs: 15,
            request_timeout_secs: None,
            log_level: "info".to_string(),
            store_dir: None,
        }
    }
}

impl Settings {
    /// What: Load settings from the user's config directory.
    ///
    /// Output:
    /// - Parsed settings, or defaults when no `settings.conf` exists or it cannot be read.
    #[must_use]
    pub fn load() -> Self {
        paths::resolve_settings_path().map_or_else(Self::default, |p| Self::load_from(&p))
    }

    /// What: Load settings from an explicit file.
    ///
    /// Inputs:
    /// - `path`: Path to a `settings.conf`-format file
    ///
    /// Output:
    /// - Parsed settings; defaults when the file cannot be read.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let mut settings = Self::default();
        match std::fs::read_to_string(path) {
            Ok(content) => parse_settings(&content, &mut settings),
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read settings; using defaults"
            ),
        }
        settings
    }

    /// Store directory to use, falling back to `<config_dir>/store`.
    #[must_use]
    pub fn resolved_store_dir(&self) -> PathBuf {
        self.store_dir.clone().unwrap_or_else(paths::default_store_dir)
    }
}

/// What: Apply `key = value` lines to `settings`.
///
/// Inputs:
/// - `content`: Text of a settings file
/// - `settings`: Settings to update in place
///
/// Details:
/// - Unknown keys are ignored so newer files still load.
/// - Invalid numbers leave the previous value untouched.
/// - `request_timeout_secs = 0` (or empty) disables the overall timeout.
pub fn parse_settings(content: &str, settings: &mut Settings) {
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((key, val)) = parse_key_value(line) else {
            continue;
        };
        match key.as_str() {
            "api_base_url" | "base_url" => {
                if !val.is_empty() {
                    settings.api_base_url = val;
                }
            }
            "default_search" => {
                if !val.is_empty() {
                    settings.default_search = val;
                }
            }
            "connect_timeout_secs" => {
                if let Ok(v) = val.parse::<u64>() {
                    settings.connect_timeout_secs = v;
                }
            }
            "request_timeout_secs" => {
                if val.is_empty() {
                    settings.request_timeout_secs = None;
                } else if let Ok(v) = val.parse::<u64>() {
                    settings.request_timeout_secs = (v > 0).then_some(v);
                }
            }
            "log_level" => {
                if !val.is_empty() {
                    settings.log_level = val;
                }
            }
            "store_dir" => {
                settings.store_dir = (!val.is_empty()).then(|| PathBuf::from(val));
            }
            other => tracing::debug!(key = other, "ignoring unknown settings key"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Recognised keys override defaults; junk is ignored.
    ///
    /// Inputs:
    /// - Settings text with comments, a URL value, numeric timeouts, an invalid number, and an unknown key.
    ///
    /// Output:
    /// - Fields reflect the valid lines only.
    fn settings_parse_overrides_defaults() {
        let text = "\
# mealscope settings
api_base_url = http://localhost:8080/api/json/v1/1
default_search = chicken   # startup query
connect_timeout_secs = nope
request_timeout_secs = 20
log_level = debug
store_dir = /tmp/mealscope-store
colour = purple
";
        let mut s = Settings::default();
        parse_settings(text, &mut s);
        assert_eq!(s.api_base_url, "http://localhost:8080/api/json/v1/1");
        assert_eq!(s.default_search, "chicken");
        assert_eq!(s.connect_timeout_secs, 15);
        assert_eq!(s.request_timeout_secs, Some(20));
        assert_eq!(s.log_level, "debug");
        assert_eq!(s.store_dir, Some(PathBuf::from("/tmp/mealscope-store")));
    }

    #[test]
    /// What: A zero request timeout disables it; a missing file yields defaults.
    ///
    /// Inputs:
    /// - `request_timeout_secs = 0` and a path that does not exist.
    ///
    /// Output:
    /// - Timeout is `None`; loading the missing file equals `Settings::default()`.
    fn settings_zero_timeout_and_missing_file() {
        let mut s = Settings {
            request_timeout_secs: Some(5),
            ..Settings::default()
        };
        parse_settings("request_timeout_secs = 0", &mut s);
        assert_eq!(s.request_timeout_secs, None);

        let tmp = tempfile::tempdir().expect("tempdir");
        assert_eq!(
            Settings::load_from(&tmp.path().join("missing.conf")),
            Settings::default()
        );
    }

    #[test]
    fn settings_load_from_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("settings.conf");
        std::fs::write(&path, "default_search = pasta\n").expect("write settings");
        assert_eq!(Settings::load_from(&path).default_search, "pasta");
    }
}
