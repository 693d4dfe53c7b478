use crate::managers::bear::BearClient;
use crate::services::logger::{LogLevel, Logger};
use crate::services::settings::Settings;

/// Wiring shared by the CLI: one logger, resolved settings, one client.
pub struct App {
    pub logger: Logger,
    pub settings: Settings,
    pub client: BearClient,
}

impl App {
    pub fn initialize(settings: Settings, level: Option<LogLevel>) -> Self {
        let mut logger = Logger::new("bear");
        if let Some(level) = level {
            logger.set_level(level);
        }
        logger.debug(
            "settings",
            Some(&serde_json::json!({
                "xcall_path": settings.xcall_path,
                "token_file": settings.token_file,
                "timeout_ms": settings.timeout.map(|t| t.as_millis() as u64),
            })),
        );
        let client = BearClient::from_settings(logger.clone(), &settings);
        Self {
            logger,
            settings,
            client,
        }
    }
}
