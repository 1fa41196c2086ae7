use std::fmt;
use std::path::Path;

use crate::error::ConvertError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// A short user-facing message shown after each action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn converted(output_name: &str) -> Self {
        Self::info("File converted", format!("Ready to save as {output_name}"))
    }

    pub fn saved(path: &Path) -> Self {
        Self::info("File saved", format!("Saved as {}", path.display()))
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl From<&ConvertError> for Notice {
    fn from(err: &ConvertError) -> Self {
        Self {
            level: Level::Error,
            title: err.title().to_string(),
            body: err.to_string(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.body)
    }
}
