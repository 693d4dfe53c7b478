//! Callback URL construction.
//!
//! Values are escaped with the narrow character set the application's URL
//! parser expects, not with generic percent-encoding.

use crate::constants::callback::{ESCAPED_CHARS, HOST, SCHEME};
use std::fmt::{self, Write};

/// One endpoint of the application's callback API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    AddFile,
    AddText,
    Archive,
    ChangeFont,
    ChangeTheme,
    Create,
    DeleteTag,
    GrabUrl,
    OpenNote,
    OpenTag,
    RenameTag,
    Search,
    Tags,
    Today,
    Todo,
    Trash,
    Untagged,
}

impl Action {
    pub const ALL: &'static [Action] = &[
        Action::AddFile,
        Action::AddText,
        Action::Archive,
        Action::ChangeFont,
        Action::ChangeTheme,
        Action::Create,
        Action::DeleteTag,
        Action::GrabUrl,
        Action::OpenNote,
        Action::OpenTag,
        Action::RenameTag,
        Action::Search,
        Action::Tags,
        Action::Today,
        Action::Todo,
        Action::Trash,
        Action::Untagged,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::AddFile => "add-file",
            Action::AddText => "add-text",
            Action::Archive => "archive",
            Action::ChangeFont => "change-font",
            Action::ChangeTheme => "change-theme",
            Action::Create => "create",
            Action::DeleteTag => "delete-tag",
            Action::GrabUrl => "grab-url",
            Action::OpenNote => "open-note",
            Action::OpenTag => "open-tag",
            Action::RenameTag => "rename-tag",
            Action::Search => "search",
            Action::Tags => "tags",
            Action::Today => "today",
            Action::Todo => "todo",
            Action::Trash => "trash",
            Action::Untagged => "untagged",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered query parameters for a single callback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pairs: Vec<(&'static str, String)>,
}

impl CallbackParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, keeping its original position if it was already present.
    pub fn set(&mut self, key: &'static str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.pairs.iter_mut().find(|(name, _)| *name == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    /// Like [`set`](Self::set), but absent and empty values are skipped.
    pub fn set_opt(&mut self, key: &'static str, value: Option<&str>) -> &mut Self {
        match value {
            Some(text) if !text.is_empty() => self.set(key, text),
            _ => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.pairs.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ESCAPED_CHARS.contains(&ch) {
            let _ = write!(out, "%{:02x}", ch as u32);
        } else {
            out.push(ch);
        }
    }
    out
}

pub fn build_url(action: Action, params: &CallbackParams) -> String {
    let mut url = format!("{}://{}/{}", SCHEME, HOST, action);
    let mut sep = '?';
    for (key, value) in params.iter() {
        url.push(sep);
        url.push_str(key);
        url.push('=');
        url.push_str(&quote(value));
        sep = '&';
    }
    url
}
