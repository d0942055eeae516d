//! Bar title with the display-name length limit applied.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest title that is sent unchanged.
pub const MAX_TITLE_CHARS: usize = 64;

/// Length a title is cut to once it exceeds [`MAX_TITLE_CHARS`].
pub const TRUNCATED_TITLE_CHARS: usize = 63;

/// Title shown above an emulated bar.
///
/// Titles longer than 64 characters are cut to their first 63 characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BarTitle(String);

impl BarTitle {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        if title.chars().count() > MAX_TITLE_CHARS {
            Self(title.chars().take(TRUNCATED_TITLE_CHARS).collect())
        } else {
            Self(title)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for BarTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BarTitle {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
