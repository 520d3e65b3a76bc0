use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::JPushError;

/// The literal selecting every platform (and, for audiences, every device).
pub const ALL: &str = "all";

pub const ANDROID: &str = "android";
pub const IOS: &str = "ios";
pub const WINPHONE: &str = "winphone";

/// Which platforms a push targets: every platform, or an explicit ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    All,
    Only(Vec<String>),
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Only(Vec::new())
    }
}

impl Platform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds platforms to the selection.
    ///
    /// A single `"all"` switches to [`Platform::All`]. Any other input is appended to
    /// the explicit list in the given order, so repeated calls accumulate. Once
    /// every platform is selected, further names are ignored.
    pub fn set<I, S>(&mut self, platforms: I) -> Result<(), JPushError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let platforms: Vec<String> = platforms.into_iter().map(Into::into).collect();

        if platforms.is_empty() {
            return Err(JPushError::InvalidPlatform);
        }

        if platforms.len() == 1 && platforms[0] == ALL {
            *self = Platform::All;
            return Ok(());
        }

        if let Platform::Only(selected) = self {
            selected.extend(platforms);
        }

        Ok(())
    }

    pub fn set_all(&mut self) {
        *self = Platform::All;
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Platform::All)
    }

    /// The JSON form sent in the `platform` field.
    pub fn to_value(&self) -> Value {
        match self {
            Platform::All => Value::from(ALL),
            Platform::Only(platforms) => Value::from(platforms.clone()),
        }
    }
}

impl Serialize for Platform {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Platform::All => serializer.serialize_str(ALL),
            Platform::Only(platforms) => platforms.serialize(serializer),
        }
    }
}
