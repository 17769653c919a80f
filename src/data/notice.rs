use std::fmt;

use serde::Serialize;

/// A short informational message for the user, written to stderr.
#[derive(Debug, Serialize)]
pub struct Notice {
    pub notice: String,
}

impl Notice {
    pub fn new<S: Into<String>>(notice: S) -> Notice {
        Notice {
            notice: notice.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Note: {}", self.notice)
    }
}
