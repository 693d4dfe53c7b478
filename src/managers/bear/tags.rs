use super::BearClient;
use crate::errors::BearError;
use crate::services::response::Reply;
use crate::utils::callback_url::{Action, CallbackParams};
use serde_json::Value;

const TAG_NOT_FOUND: &str = "The tag could not be found";

#[derive(Debug, Clone, Default)]
pub struct SearchArgs {
    pub term: Option<String>,
    pub tag: Option<String>,
    pub show_window: Option<String>,
}

/// Finds the list stored under `key`, which may be the value itself, a
/// field of an object, or a JSON string inside that field.
fn list_under(value: Value, key: &str) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => match map.remove(key)? {
            Value::Array(items) => Some(items),
            Value::String(text) => match serde_json::from_str(&text).ok()? {
                Value::Array(items) => Some(items),
                _ => None,
            },
            _ => None,
        },
        _ => None,
    }
}

fn tag_names(reply: Reply) -> Result<Vec<String>, BearError> {
    let items = list_under(reply.into_value(), "tags").ok_or_else(|| {
        BearError::decode("tags reply carries no tag list")
            .with_hint("The tags action only answers when a valid token is sent.")
    })?;
    items
        .iter()
        .map(|item| {
            item.get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| BearError::decode(format!("tag entry without a name: {}", item)))
        })
        .collect()
}

impl BearClient {
    /// `/tags`: names of all tags shown in the sidebar.
    pub async fn tags(&self) -> Result<Vec<String>, BearError> {
        let mut params = CallbackParams::new();
        params.set("token", self.token.get().await?);
        let reply = self.send(Action::Tags, &params).await?;
        tag_names(reply)
    }

    /// `/open-tag`: the notes carrying tag `name`.
    pub async fn open_tag(&self, name: &str) -> Result<Reply, BearError> {
        let name = self.validation.ensure_text(Some(name), "name", "open-tag")?;
        let mut params = CallbackParams::new();
        params.set("name", name).set("token", self.token.get().await?);
        match self.send(Action::OpenTag, &params).await {
            Err(err) if err.is_remote() && err.message.contains(TAG_NOT_FOUND) => {
                Err(BearError::remote(format!("Tag '{}' was not found", name))
                    .with_details(serde_json::json!({ "error_message": err.message })))
            }
            other => other,
        }
    }

    pub async fn rename_tag(&self, old: &str, new: &str) -> Result<Reply, BearError> {
        let old = self.validation.ensure_text(Some(old), "name", "rename-tag")?;
        let new = self
            .validation
            .ensure_text(Some(new), "new_name", "rename-tag")?;
        let mut params = CallbackParams::new();
        params
            .set("name", old)
            .set("new_name", new)
            .set("show_window", "no");
        self.send(Action::RenameTag, &params).await
    }

    pub async fn delete_tag(&self, name: &str) -> Result<Reply, BearError> {
        let name = self
            .validation
            .ensure_text(Some(name), "(tag) name", "delete-tag")?;
        let mut params = CallbackParams::new();
        params.set("name", name).set("show_window", "no");
        self.send(Action::DeleteTag, &params).await
    }

    /// `/search`: notes matching `term`, optionally inside `tag`.
    pub async fn search(&self, args: SearchArgs) -> Result<Reply, BearError> {
        let mut params = CallbackParams::new();
        params
            .set_opt("term", args.term.as_deref())
            .set_opt("tag", args.tag.as_deref())
            .set("show_window", "no")
            .set_opt("show_window", args.show_window.as_deref())
            .set("token", self.token.get().await?);
        self.send(Action::Search, &params).await
    }

    pub async fn today(&self, search: Option<&str>) -> Result<Reply, BearError> {
        self.sidebar(Action::Today, search).await
    }

    pub async fn todo(&self, search: Option<&str>) -> Result<Reply, BearError> {
        self.sidebar(Action::Todo, search).await
    }

    pub async fn untagged(&self, search: Option<&str>) -> Result<Reply, BearError> {
        self.sidebar(Action::Untagged, search).await
    }

    async fn sidebar(&self, action: Action, search: Option<&str>) -> Result<Reply, BearError> {
        let mut params = CallbackParams::new();
        params
            .set_opt("search", search)
            .set("show_window", "no")
            .set("token", self.token.get().await?);
        self.send(action, &params).await
    }
}
