use crate::constants::{defaults, env};
use crate::utils::user_paths::expand_home_path;
use std::path::PathBuf;
use std::time::Duration;

/// Where the helper and the token live, and how long to wait for a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub xcall_path: PathBuf,
    pub token_file: PathBuf,
    pub timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            xcall_path: expand_home_path(defaults::XCALL_PATH),
            token_file: PathBuf::from(defaults::TOKEN_FILE),
            timeout: None,
        }
    }
}

fn read_positive_int(value: Option<&str>) -> Option<u64> {
    value?.trim().parse::<u64>().ok().filter(|n| *n > 0)
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl Settings {
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            xcall_path: non_empty_env(env::XCALL_PATH)
                .map(expand_home_path)
                .unwrap_or(base.xcall_path),
            token_file: non_empty_env(env::TOKEN_FILE)
                .map(expand_home_path)
                .unwrap_or(base.token_file),
            timeout: read_positive_int(non_empty_env(env::TIMEOUT_MS).as_deref())
                .map(Duration::from_millis),
        }
    }

    pub fn with_overrides(
        mut self,
        xcall_path: Option<PathBuf>,
        token_file: Option<PathBuf>,
        timeout_ms: Option<u64>,
    ) -> Self {
        if let Some(path) = xcall_path {
            self.xcall_path = expand_home_path(path);
        }
        if let Some(path) = token_file {
            self.token_file = expand_home_path(path);
        }
        if let Some(ms) = timeout_ms.filter(|ms| *ms > 0) {
            self.timeout = Some(Duration::from_millis(ms));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_positive_int_rejects_zero_and_garbage() {
        assert_eq!(read_positive_int(Some("250")), Some(250));
        assert_eq!(read_positive_int(Some(" 10 ")), Some(10));
        assert_eq!(read_positive_int(Some("0")), None);
        assert_eq!(read_positive_int(Some("soon")), None);
        assert_eq!(read_positive_int(None), None);
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let base = Settings {
            xcall_path: PathBuf::from("/opt/xcall"),
            token_file: PathBuf::from("token"),
            timeout: None,
        };
        let merged = base
            .clone()
            .with_overrides(None, Some(PathBuf::from("/tmp/bear-token")), Some(1500));
        assert_eq!(merged.xcall_path, base.xcall_path);
        assert_eq!(merged.token_file, PathBuf::from("/tmp/bear-token"));
        assert_eq!(merged.timeout, Some(Duration::from_millis(1500)));
    }
}
