use crate::message::Extras;

/// Alert and extras, shared by every platform specific notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformNotification {
    pub alert: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub extras: Option<Extras>,
}

impl PlatformNotification {
    pub fn new(alert: impl Into<String>) -> Self {
        PlatformNotification {
            alert: alert.into(),
            extras: None,
        }
    }
}

/// Access to the shared part of a platform notification.
pub trait PlatformVariant {
    fn base(&self) -> &PlatformNotification;

    fn base_mut(&mut self) -> &mut PlatformNotification;

    fn alert(&self) -> &str {
        &self.base().alert
    }

    /// Sets the extras. A second call replaces the map from the first one,
    /// the two are never merged.
    fn add_extra(&mut self, extras: Extras) {
        self.base_mut().extras = Some(extras);
    }
}

macro_rules! platform_variant {
    ($name:ident) => {
        impl $name {
            pub fn new(alert: impl Into<String>) -> Self {
                $name {
                    base: PlatformNotification::new(alert),
                    ..Default::default()
                }
            }
        }

        impl PlatformVariant for $name {
            fn base(&self) -> &PlatformNotification {
                &self.base
            }

            fn base_mut(&mut self) -> &mut PlatformNotification {
                &mut self.base
            }
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AndroidNotification {
    #[serde(flatten)]
    pub base: PlatformNotification,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    /// Id of a notification style registered in the Android SDK.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub builder_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IosNotification {
    #[serde(flatten)]
    pub base: PlatformNotification,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub badge: Option<i32>,
    /// Wakes the app up in the background.
    #[serde(rename = "content-available", skip_serializing_if = "std::ops::Not::not", default)]
    pub content_available: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WinphoneNotification {
    #[serde(flatten)]
    pub base: PlatformNotification,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    /// Page opened when the toast is tapped.
    #[serde(rename = "_open_page", skip_serializing_if = "Option::is_none", default)]
    pub open_page: Option<String>,
}

platform_variant!(AndroidNotification);
platform_variant!(IosNotification);
platform_variant!(WinphoneNotification);

/// A system notification. The common alert is used for every platform lacking
/// its own variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub alert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub android: Option<AndroidNotification>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ios: Option<IosNotification>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub winphone: Option<WinphoneNotification>,
}

impl Notification {
    pub fn new(alert: impl Into<String>) -> Self {
        Notification {
            alert: Some(alert.into()),
            ..Default::default()
        }
    }

    pub fn set_android(&mut self, android: AndroidNotification) {
        self.android = Some(android);
    }

    pub fn set_ios(&mut self, ios: IosNotification) {
        self.ios = Some(ios);
    }

    pub fn set_winphone(&mut self, winphone: WinphoneNotification) {
        self.winphone = Some(winphone);
    }
}
