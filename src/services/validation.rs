use crate::errors::BearError;
use crate::utils::suggest::choice_hint;

/// Argument checks that run before any callback URL is built.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    /// `value` must be given; it may be empty.
    pub fn ensure_present<'a>(
        &self,
        value: Option<&'a str>,
        label: &str,
        action: &str,
    ) -> Result<&'a str, BearError> {
        value.ok_or_else(|| BearError::validation(format!("{} requires {}", action, label)))
    }

    /// `value` must be given and contain something besides whitespace.
    pub fn ensure_text<'a>(
        &self,
        value: Option<&'a str>,
        label: &str,
        action: &str,
    ) -> Result<&'a str, BearError> {
        match value {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(BearError::validation(format!(
                "{} requires a non-empty {}",
                action, label
            ))),
        }
    }

    /// At least one of `values` must be non-empty.
    pub fn ensure_any(
        &self,
        values: &[(&str, Option<&str>)],
        action: &str,
    ) -> Result<(), BearError> {
        if values
            .iter()
            .any(|(_, value)| value.map(|v| !v.is_empty()).unwrap_or(false))
        {
            return Ok(());
        }
        let labels: Vec<&str> = values.iter().map(|(label, _)| *label).collect();
        Err(BearError::validation(format!(
            "{} requires either {}",
            action,
            labels.join(" or ")
        )))
    }

    /// `value` must be one of `choices`, compared exactly.
    pub fn ensure_choice(
        &self,
        value: &str,
        label: &str,
        choices: &[&'static str],
    ) -> Result<&'static str, BearError> {
        choices
            .iter()
            .find(|choice| **choice == value)
            .copied()
            .ok_or_else(|| {
                BearError::validation(format!("{} '{}' is not supported", label, value))
                    .with_hint(choice_hint(value, choices))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::appearance::FONTS;

    #[test]
    fn ensure_present_allows_empty_text() {
        let v = Validation::new();
        assert_eq!(v.ensure_present(Some(""), "text", "add-text").ok(), Some(""));
        assert!(v.ensure_present(None, "text", "add-text").is_err());
    }

    #[test]
    fn ensure_any_names_every_alternative() {
        let err = Validation::new()
            .ensure_any(&[("id", None), ("title", Some(""))], "open-note")
            .unwrap_err();
        assert_eq!(err.message, "open-note requires either id or title");
    }

    #[test]
    fn ensure_choice_is_exact_and_hints() {
        let v = Validation::new();
        assert_eq!(v.ensure_choice("Menlo", "Font", FONTS).ok(), Some("Menlo"));
        let err = v.ensure_choice("menlo", "Font", FONTS).unwrap_err();
        assert_eq!(err.message, "Font 'menlo' is not supported");
        assert!(err.hint.unwrap_or_default().contains("Did you mean: Menlo?"));
    }
}
