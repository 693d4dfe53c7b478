#![allow(dead_code)]

use async_trait::async_trait;
use bear_xcall::errors::BearError;
use bear_xcall::managers::bear::BearClient;
use bear_xcall::services::logger::Logger;
use bear_xcall::services::token::TokenStore;
use bear_xcall::services::xcall::Xcall;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub static ENV_LOCK: Lazy<tokio::sync::Mutex<()>> = Lazy::new(|| tokio::sync::Mutex::new(()));

pub const TOKEN: &str = "710124-D107AF-A0B87D";

/// Stands in for the xcall helper: records every URL and answers from a
/// queue, falling back to an empty reply.
#[derive(Default)]
pub struct RecordingXcall {
    replies: Mutex<VecDeque<Result<String, BearError>>>,
    urls: Mutex<Vec<String>>,
}

impl RecordingXcall {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_replies<I, S>(replies: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fake = Self::default();
        fake.replies
            .lock()
            .unwrap()
            .extend(replies.into_iter().map(|r| Ok(r.into())));
        Arc::new(fake)
    }

    pub fn push_error(&self, err: BearError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.urls.lock().unwrap().len()
    }
}

#[async_trait]
impl Xcall for RecordingXcall {
    async fn call(&self, url: &str) -> Result<String, BearError> {
        self.urls.lock().unwrap().push(url.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

pub fn client(fake: &Arc<RecordingXcall>) -> BearClient {
    BearClient::new(Logger::new("test"), fake.clone(), TokenStore::from_value(TOKEN))
}

pub fn note_reply(text: &str) -> String {
    serde_json::json!({
        "note": text,
        "identifier": "7E4B681B",
        "title": "Groceries",
        "is_trashed": "no",
    })
    .to_string()
}

pub fn tmp_dir(prefix: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("{}-{}", prefix, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}
