use serde::ser::{Serialize, SerializeMap, Serializer};

/// Pending tag changes of one device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagUpdate {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remove: Vec<String>,
    /// Drop every tag of the device. Takes priority over `add` and `remove`.
    #[serde(skip)]
    pub clear: bool,
}

/// Changes to the tags, alias and mobile number of a single device, sent to the
/// device API.
///
/// ```
/// # use jpush_api::DeviceUpdate;
/// let mut update = DeviceUpdate::new();
/// update.add_tags(["vip"]);
/// update.set_alias("");
///
/// let json = serde_json::to_string(&update).unwrap();
/// assert_eq!(r#"{"tags":{"add":["vip"]},"alias":""}"#, json);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceUpdate {
    pub tags: TagUpdate,
    /// An empty alias removes the current alias of the device.
    pub alias: Option<String>,
    pub mobile: Option<String>,
}

impl DeviceUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.clear = false;
        self.tags.add.extend(tags.into_iter().map(Into::into));
    }

    pub fn remove_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.clear = false;
        self.tags.remove.extend(tags.into_iter().map(Into::into));
    }

    /// Until the next `add_tags` or `remove_tags`, the update clears every tag
    /// instead of sending the pending changes.
    pub fn clear_all_tags(&mut self) {
        self.tags.clear = true;
    }

    pub fn set_alias(&mut self, alias: impl Into<String>) {
        self.alias = Some(alias.into());
    }

    pub fn set_mobile(&mut self, mobile: impl Into<String>) {
        self.mobile = Some(mobile.into());
    }
}

impl Serialize for DeviceUpdate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;

        if self.tags.clear {
            map.serialize_entry("tags", "")?;
        } else {
            map.serialize_entry("tags", &self.tags)?;
        }

        if let Some(ref alias) = self.alias {
            map.serialize_entry("alias", alias)?;
        }

        if let Some(ref mobile) = self.mobile {
            map.serialize_entry("mobile", mobile)?;
        }

        map.end()
    }
}
