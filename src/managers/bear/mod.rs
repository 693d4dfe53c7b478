//! Client for the Bear notes app's x-callback-url API.
//!
//! Each operation validates its arguments, builds one callback URL, hands it
//! to the [`Xcall`] helper and normalizes the reply. Calls never overlap.

use crate::errors::BearError;
use crate::services::logger::Logger;
use crate::services::response::{normalize, Reply};
use crate::services::settings::Settings;
use crate::services::token::TokenStore;
use crate::services::validation::Validation;
use crate::services::xcall::{ProcessXcall, Xcall};
use crate::utils::callback_url::{build_url, Action, CallbackParams};
use crate::utils::redact::redact_callback_url;
use std::sync::Arc;

mod appearance;
mod notes;
mod tags;

pub use notes::{AddFileArgs, AddMode, AddTextArgs, CreateArgs, GrabUrlArgs, OpenNoteArgs};
pub use tags::SearchArgs;

#[derive(Clone)]
pub struct BearClient {
    logger: Logger,
    validation: Validation,
    xcall: Arc<dyn Xcall>,
    token: Arc<TokenStore>,
}

impl BearClient {
    pub fn new(logger: Logger, xcall: Arc<dyn Xcall>, token: TokenStore) -> Self {
        Self {
            logger: logger.child("client"),
            validation: Validation::new(),
            xcall,
            token: Arc::new(token),
        }
    }

    pub fn from_settings(logger: Logger, settings: &Settings) -> Self {
        let xcall = ProcessXcall::new(logger.clone(), &settings.xcall_path, settings.timeout);
        Self::new(logger, Arc::new(xcall), TokenStore::new(&settings.token_file))
    }

    /// The access token, read from the token file on first use.
    pub async fn token(&self) -> Result<String, BearError> {
        self.token.get().await.map(str::to_string)
    }

    /// The `tags` callback URL for this client's token. Nothing is sent.
    pub async fn sample_url(&self) -> Result<String, BearError> {
        let mut params = CallbackParams::new();
        params.set("token", self.token.get().await?);
        Ok(build_url(Action::Tags, &params))
    }

    /// Sends a caller-built `bear://` URL as-is.
    pub async fn raw_url(&self, url: &str) -> Result<Reply, BearError> {
        let parsed = url::Url::parse(url)
            .map_err(|err| BearError::validation(format!("Invalid callback URL: {}", err)))?;
        if parsed.scheme() != crate::constants::callback::SCHEME {
            return Err(BearError::validation(format!(
                "Callback URL must use the {}:// scheme",
                crate::constants::callback::SCHEME
            )));
        }
        self.dispatch(url).await
    }

    async fn send(&self, action: Action, params: &CallbackParams) -> Result<Reply, BearError> {
        self.dispatch(&build_url(action, params)).await
    }

    async fn dispatch(&self, url: &str) -> Result<Reply, BearError> {
        let raw = self.xcall.call(url).await?;
        let reply = normalize(&raw, url);
        if let Err(err) = &reply {
            self.logger.debug(
                "callback rejected",
                Some(&serde_json::json!({
                    "url": redact_callback_url(url),
                    "kind": err.kind,
                    "message": err.message,
                })),
            );
        }
        reply
    }
}
