pub mod callback_url;
pub mod redact;
pub mod suggest;
pub mod text;
pub mod user_paths;
