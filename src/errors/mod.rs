mod bear_error;

pub use bear_error::{BearError, BearErrorKind};
