//! # JPush API
//!
//! A client library for the [JPush](https://docs.jiguang.cn/jpush/server/push/rest_api_v3_push)
//! v3 REST API. Describe the push with a [`Payload`], attach it to a [`JPushClient`] and
//! call [`JPushClient::push`].
//!
//! ```no_run
//! # use jpush_api::*;
//! let mut platform = Platform::new();
//! platform.set(["android", "ios"])?;
//!
//! let mut audience = Audience::new();
//! audience.set_tag(["beijing", "shanghai"]);
//!
//! let mut notification = Notification::new("Hello!");
//! let mut ios = IosNotification::new("Hello, iOS!");
//! ios.badge = Some(1);
//! notification.set_ios(ios);
//!
//! let mut payload = Payload::new(platform, audience);
//! payload.set_notification(notification);
//! payload.set_options(Options { time_to_live: 60, ..Options::new() });
//!
//! let mut client = JPushClient::new("app-key", "master-secret")?;
//! client.set_payload(payload);
//!
//! let result = client.push_result()?;
//! println!("{:?}", result.outcome());
//! # Ok::<(), JPushError>(())
//! ```
//!
//! The default transport is built on `isahc` (feature `isahc-client`). Any other HTTP stack
//! can be plugged in by implementing [`HttpTransport`] and using
//! [`JPushClient::with_transport`].

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub use crate::audience::{Audience, AudienceKind};
pub use crate::client::JPushClient;
#[cfg(feature = "isahc-client")]
pub use crate::clients::isahc_client::IsahcTransport;
pub use crate::clients::request_builder;
pub use crate::clients::{HttpTransport, RawResponse};
pub use crate::config::Config;
pub use crate::device::{DeviceUpdate, TagUpdate};
pub use crate::error::JPushError;
pub use crate::message::{Extras, Message, SmsMessage};
pub use crate::notification::{
    AndroidNotification, IosNotification, Notification, PlatformNotification, PlatformVariant, WinphoneNotification,
};
pub use crate::options::Options;
pub use crate::payload::Payload;
pub use crate::platform::Platform;
pub use crate::response::{ErrorResult, MsgId, PushOutcome, PushResult, QueryDeviceResult, RateLimitInfo, ResponseBase};

mod audience;
mod client;
mod clients;
pub mod config;
mod device;
mod error;
mod message;
mod notification;
mod options;
mod payload;
pub mod platform;
mod response;
