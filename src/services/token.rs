use crate::errors::BearError;
use std::path::PathBuf;
use tokio::sync::OnceCell;

/// The application token, read from its file on first use and then kept.
#[derive(Debug)]
pub struct TokenStore {
    path: PathBuf,
    cached: OnceCell<String>,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: OnceCell::new(),
        }
    }

    /// A store that never touches the filesystem.
    pub fn from_value(token: impl Into<String>) -> Self {
        Self {
            path: PathBuf::new(),
            cached: OnceCell::new_with(Some(token.into())),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.initialized()
    }

    pub async fn get(&self) -> Result<&str, BearError> {
        let token = self
            .cached
            .get_or_try_init(|| async {
                let raw = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
                    BearError::validation(format!(
                        "Cannot read token file {}: {}",
                        self.path.display(),
                        err
                    ))
                    .with_hint("Copy the token from Bear > Help > API Token into that file.")
                })?;
                let token = raw.trim().to_string();
                if token.is_empty() {
                    return Err(BearError::validation(format!(
                        "Token file {} is empty",
                        self.path.display()
                    )));
                }
                Ok(token)
            })
            .await?;
        Ok(token.as_str())
    }
}
