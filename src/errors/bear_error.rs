use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BearErrorKind {
    /// Rejected before anything reached the helper.
    Validation,
    /// Delivered, but the application answered with an error message.
    Remote,
    /// The helper could not be started or did not finish cleanly.
    Process,
    /// The helper answered with something that is not a recognized reply.
    Decode,
}

#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct BearError {
    pub kind: BearErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl BearError {
    pub fn new(kind: BearErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            hint: None,
            details: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(BearErrorKind::Validation, "INVALID_ARGS", message)
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::new(BearErrorKind::Remote, "APP_ERROR", message)
    }

    pub fn process(message: impl Into<String>) -> Self {
        Self::new(BearErrorKind::Process, "HELPER_FAILED", message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(BearErrorKind::Decode, "BAD_REPLY", message)
    }

    pub fn is_validation(&self) -> bool {
        self.kind == BearErrorKind::Validation
    }

    pub fn is_remote(&self) -> bool {
        self.kind == BearErrorKind::Remote
    }
}

impl From<serde_json::Error> for BearError {
    fn from(err: serde_json::Error) -> Self {
        BearError::decode(format!("Reply is not valid JSON: {}", err))
    }
}
