use std::path::{Path, PathBuf};

/// Expands a leading `~` or `$HOME` against the `HOME` environment variable.
pub fn expand_home_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let Some(text) = path.to_str() else {
        return path.to_path_buf();
    };
    let Ok(home) = std::env::var("HOME") else {
        return path.to_path_buf();
    };
    if text == "~" || text == "$HOME" {
        return PathBuf::from(home);
    }
    for prefix in ["~/", "$HOME/"] {
        if let Some(rest) = text.strip_prefix(prefix) {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}

/// The `.app` bundle that contains `executable`, if there is one.
pub fn app_bundle(executable: &Path) -> Option<PathBuf> {
    executable
        .ancestors()
        .find(|dir| dir.extension().map(|ext| ext == "app").unwrap_or(false))
        .map(Path::to_path_buf)
}
