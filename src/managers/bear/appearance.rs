use super::BearClient;
use crate::constants::appearance::{FONTS, THEMES};
use crate::errors::BearError;
use crate::services::response::Reply;
use crate::utils::callback_url::{Action, CallbackParams};

impl BearClient {
    /// `/change-font`: one of the fonts the application ships with.
    pub async fn change_font(&self, font: &str) -> Result<Reply, BearError> {
        let font = self.validation.ensure_choice(font, "Font", FONTS)?;
        let mut params = CallbackParams::new();
        params.set("font", font);
        self.send(Action::ChangeFont, &params).await
    }

    /// `/change-theme`. Some themes need a Pro subscription; the application
    /// reports that itself.
    pub async fn change_theme(&self, theme: &str) -> Result<Reply, BearError> {
        let theme = self.validation.ensure_choice(theme, "Theme", THEMES)?;
        let mut params = CallbackParams::new();
        params.set("theme", theme);
        self.send(Action::ChangeTheme, &params).await
    }
}
