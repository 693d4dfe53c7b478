//! Remote control for the Bear notes app through its x-callback-url API,
//! using the external `xcall` helper to deliver callbacks and collect replies.

pub mod app;
pub mod cli;
pub mod constants;
pub mod errors;
pub mod managers;
pub mod services;
pub mod utils;

pub use errors::{BearError, BearErrorKind};
pub use managers::bear::BearClient;
pub use services::response::Reply;
