pub mod logger;
pub mod response;
pub mod settings;
pub mod token;
pub mod validation;
pub mod xcall;
