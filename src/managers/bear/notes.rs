use super::BearClient;
use crate::constants::appearance::ADD_MODES;
use crate::errors::BearError;
use crate::services::response::Reply;
use crate::services::validation::Validation;
use crate::utils::callback_url::{Action, CallbackParams};
use crate::utils::text::hashed_tag;
use std::fmt;
use std::str::FromStr;

/// Where `add-text` and `add-file` put the new content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddMode {
    Prepend,
    Append,
    Replace,
    ReplaceAll,
}

impl AddMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AddMode::Prepend => "prepend",
            AddMode::Append => "append",
            AddMode::Replace => "replace",
            AddMode::ReplaceAll => "replace_all",
        }
    }
}

impl fmt::Display for AddMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddMode {
    type Err = BearError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match Validation::new().ensure_choice(value, "Mode", ADD_MODES)? {
            "prepend" => Ok(AddMode::Prepend),
            "append" => Ok(AddMode::Append),
            "replace" => Ok(AddMode::Replace),
            _ => Ok(AddMode::ReplaceAll),
        }
    }
}

fn parse_mode(mode: Option<&str>) -> Result<Option<AddMode>, BearError> {
    mode.map(str::parse::<AddMode>).transpose()
}

#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    pub title: Option<String>,
    pub text: Option<String>,
    /// Comma separated tag names.
    pub tags: Option<String>,
    /// Base64 file body; needs `filename` too.
    pub file: Option<String>,
    pub filename: Option<String>,
    pub pin: Option<String>,
    pub timestamp: Option<String>,
    pub open_note: Option<String>,
    pub new_window: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AddTextArgs {
    pub id: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub header: Option<String>,
    pub mode: Option<String>,
    pub tags: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AddFileArgs {
    pub id: Option<String>,
    pub title: Option<String>,
    /// Base64 file body, sent as `file`.
    pub content: Option<String>,
    pub header: Option<String>,
    pub filename: Option<String>,
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct OpenNoteArgs {
    pub id: Option<String>,
    pub title: Option<String>,
    pub exclude_trashed: Option<String>,
    pub show_window: Option<String>,
    pub new_window: Option<String>,
}

impl OpenNoteArgs {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GrabUrlArgs {
    pub url: String,
    pub images: Option<String>,
    pub tags: Option<String>,
    pub pin: Option<String>,
    pub wait: Option<String>,
}

impl BearClient {
    /// `/create`: a new note. The reply carries `identifier` and `title`.
    pub async fn create(&self, args: CreateArgs) -> Result<Reply, BearError> {
        let mut params = CallbackParams::new();
        params
            .set("open_note", "no")
            .set("show_window", "no")
            .set_opt("title", args.title.as_deref())
            .set_opt("text", args.text.as_deref())
            .set_opt("tags", args.tags.as_deref())
            .set_opt("file", args.file.as_deref())
            .set_opt("filename", args.filename.as_deref())
            .set_opt("pin", args.pin.as_deref())
            .set_opt("timestamp", args.timestamp.as_deref())
            .set_opt("open_note", args.open_note.as_deref())
            .set_opt("new_window", args.new_window.as_deref());
        self.send(Action::Create, &params).await
    }

    /// `/add-text`: append, prepend or replace text in a note found by id
    /// or title. When both are given both are sent and the application
    /// decides which one wins. Without a mode no `mode` parameter is sent
    /// and the application applies its own default.
    pub async fn add_text(&self, args: AddTextArgs) -> Result<Reply, BearError> {
        let text = self
            .validation
            .ensure_present(args.text.as_deref(), "text", "add-text")?;
        self.validation.ensure_any(
            &[("id", args.id.as_deref()), ("title", args.title.as_deref())],
            "add-text",
        )?;
        let mode = parse_mode(args.mode.as_deref())?;

        let mut params = CallbackParams::new();
        params
            .set("text", text)
            .set_opt("id", args.id.as_deref())
            .set_opt("title", args.title.as_deref())
            .set_opt("header", args.header.as_deref())
            .set_opt("mode", mode.map(AddMode::as_str))
            .set_opt("tags", args.tags.as_deref())
            .set("exclude_trashed", "yes")
            .set("open_note", "no")
            .set("new_window", "no")
            .set("show_window", "no");
        self.send(Action::AddText, &params).await
    }

    /// `/add-file`: attach a base64-encoded file to a note.
    pub async fn add_file(&self, args: AddFileArgs) -> Result<Reply, BearError> {
        let content = self
            .validation
            .ensure_text(args.content.as_deref(), "content", "add-file")?;
        let filename = self
            .validation
            .ensure_text(args.filename.as_deref(), "filename", "add-file")?;
        let mode = parse_mode(args.mode.as_deref())?;

        let mut params = CallbackParams::new();
        params
            .set_opt("id", args.id.as_deref())
            .set_opt("title", args.title.as_deref())
            .set("file", content)
            .set_opt("header", args.header.as_deref())
            .set("filename", filename)
            .set_opt("mode", mode.map(AddMode::as_str))
            .set("open_note", "no")
            .set("show_window", "no");
        self.send(Action::AddFile, &params).await
    }

    /// `/open-note`: the note's text and metadata, trashed notes excluded
    /// unless `exclude_trashed` says otherwise.
    pub async fn open_note(&self, args: OpenNoteArgs) -> Result<Reply, BearError> {
        self.validation.ensure_any(
            &[("id", args.id.as_deref()), ("title", args.title.as_deref())],
            "open-note",
        )?;

        let mut params = CallbackParams::new();
        params
            .set_opt("id", args.id.as_deref())
            .set_opt("title", args.title.as_deref())
            .set("exclude_trashed", "yes")
            .set_opt("exclude_trashed", args.exclude_trashed.as_deref())
            .set("show_window", "no")
            .set_opt("show_window", args.show_window.as_deref())
            .set_opt("new_window", args.new_window.as_deref());
        self.send(Action::OpenNote, &params).await
    }

    pub async fn archive(&self, id: Option<&str>, search: Option<&str>) -> Result<Reply, BearError> {
        self.move_note(Action::Archive, id, search).await
    }

    /// `/trash`. The application ignores `search` when `id` is present.
    pub async fn trash(&self, id: Option<&str>, search: Option<&str>) -> Result<Reply, BearError> {
        self.move_note(Action::Trash, id, search).await
    }

    async fn move_note(
        &self,
        action: Action,
        id: Option<&str>,
        search: Option<&str>,
    ) -> Result<Reply, BearError> {
        self.validation
            .ensure_any(&[("id", id), ("search", search)], action.as_str())?;
        let mut params = CallbackParams::new();
        params
            .set("show_window", "no")
            .set_opt("id", id)
            .set_opt("search", search);
        self.send(action, &params).await
    }

    /// `/grab-url`: a new note with the content of a web page.
    pub async fn grab_url(&self, args: GrabUrlArgs) -> Result<Reply, BearError> {
        let url = self
            .validation
            .ensure_text(Some(args.url.as_str()), "url", "grab-url")?;
        let mut params = CallbackParams::new();
        params
            .set("url", url)
            .set_opt("images", args.images.as_deref())
            .set_opt("tags", args.tags.as_deref())
            .set_opt("pin", args.pin.as_deref())
            .set_opt("wait", args.wait.as_deref());
        self.send(Action::GrabUrl, &params).await
    }

    async fn note_text(&self, id: &str) -> Result<String, BearError> {
        let reply = self.open_note(OpenNoteArgs::by_id(id)).await?;
        reply
            .note_text()
            .map(str::to_string)
            .ok_or_else(|| BearError::decode(format!("open-note reply for {} has no note text", id)))
    }

    /// Whether the note body contains `#tag`.
    pub async fn has_tag(&self, id: &str, tag: &str) -> Result<bool, BearError> {
        let tag = self.validation.ensure_text(Some(tag), "tag", "has-tag")?;
        let note = self.note_text(id).await?;
        Ok(note.contains(&hashed_tag(tag)))
    }

    /// Appends `tag` to the note unless the note already carries it.
    /// Returns whether the note was changed. The read and the append are two
    /// separate callbacks; a concurrent edit in between is not detected.
    pub async fn idemp_add(&self, id: &str, tag: &str) -> Result<bool, BearError> {
        if id.trim().is_empty() || tag.trim().is_empty() {
            return Ok(false);
        }
        let hashed = hashed_tag(tag);
        let note = self.note_text(id).await?;
        if note.contains(&hashed) {
            return Ok(false);
        }
        self.add_text(AddTextArgs {
            id: Some(id.to_string()),
            text: Some(String::new()),
            tags: Some(hashed.strip_prefix('#').unwrap_or(&hashed).to_string()),
            mode: Some(AddMode::Append.as_str().to_string()),
            ..AddTextArgs::default()
        })
        .await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BearErrorKind;

    #[test]
    fn add_mode_parses_documented_values() {
        for (text, mode) in [
            ("prepend", AddMode::Prepend),
            ("append", AddMode::Append),
            ("replace", AddMode::Replace),
            ("replace_all", AddMode::ReplaceAll),
        ] {
            assert_eq!(text.parse::<AddMode>().unwrap(), mode);
            assert_eq!(mode.to_string(), text);
        }
    }

    #[test]
    fn add_mode_rejects_unknown_value() {
        let err = "replace-all".parse::<AddMode>().unwrap_err();
        assert_eq!(err.kind, BearErrorKind::Validation);
        assert!(err.hint.unwrap_or_default().contains("replace_all"));
    }
}
