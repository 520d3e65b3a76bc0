/// Delivery parameters. Numeric fields left at zero are not sent and the
/// provider default applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// Echoed back in the response to match requests and responses.
    #[serde(skip_serializing_if = "is_zero", default)]
    pub sendno: i32,
    /// Seconds an offline message is kept.
    #[serde(skip_serializing_if = "is_zero", default)]
    pub time_to_live: i64,
    /// Replaces the content of an earlier push still queued for delivery.
    #[serde(skip_serializing_if = "is_zero", default)]
    pub override_msg_id: i64,
    /// `true` for the APNs production environment. Always sent.
    #[serde(default)]
    pub apns_production: bool,
    /// Minutes over which a large push is spread out.
    #[serde(skip_serializing_if = "is_zero", default)]
    pub big_push_duration: i32,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }
}

pub(crate) fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}
