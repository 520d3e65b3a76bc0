//! Process-wide endpoint and header settings.
//!
//! The configuration is set at most once, usually at startup with [`init`]. Every
//! client built afterwards reads it through [`get`]; if nothing was initialized
//! the defaults pointing to the public JPush API are used.

use std::sync::OnceLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const PUSH_HOST: &str = "https://api.jpush.cn";
pub const DEVICE_HOST: &str = "https://device.jpush.cn";
pub const USER_AGENT: &str = "jpush-api-rust-client";

pub const CHARSET: &str = "UTF-8";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONNECTION_ALIVE: &str = "keep-alive";

/// Everything but unreserved URI characters is escaped in a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

static CONFIG: OnceLock<Config> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where pushes are posted.
    pub push_url: String,
    /// Base of the device API, the registration id is appended as a path segment.
    pub device_url: String,
    /// Sent as `User-Agent` with every request.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            push_url: format!("{}/v3/push", PUSH_HOST),
            device_url: format!("{}/v3/devices", DEVICE_HOST),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// The device API URL of one registration id, escaped as a single path segment.
    pub fn device_endpoint(&self, registration_id: &str) -> String {
        format!(
            "{}/{}",
            self.device_url.trim_end_matches('/'),
            utf8_percent_encode(registration_id, PATH_SEGMENT)
        )
    }
}

/// Installs the process configuration. Returns the rejected value if a
/// configuration was already in place, including the implicit default one
/// installed by an earlier [`get`].
pub fn init(config: Config) -> Result<(), Config> {
    CONFIG.set(config)
}

pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_to_the_public_api() {
        let config = Config::default();

        assert_eq!("https://api.jpush.cn/v3/push", config.push_url);
        assert_eq!(
            "https://device.jpush.cn/v3/devices/abc123",
            config.device_endpoint("abc123")
        );
    }

    #[test]
    fn registration_ids_stay_in_one_path_segment() {
        let config = Config::default();

        assert_eq!(
            "https://device.jpush.cn/v3/devices/a%2F..%2Fpush",
            config.device_endpoint("a/../push")
        );
        assert_eq!(
            "https://device.jpush.cn/v3/devices/id%20with%20space",
            config.device_endpoint("id with space")
        );
        assert_eq!(
            "https://device.jpush.cn/v3/devices/1a0018970a_b-c.d~",
            config.device_endpoint("1a0018970a_b-c.d~")
        );
    }

    #[test]
    fn configuration_cannot_be_replaced_once_read() {
        let current = get().clone();

        let rejected = init(Config {
            push_url: "http://localhost/v3/push".into(),
            ..Config::default()
        });

        assert!(rejected.is_err());
        assert_eq!(&current, get());
    }
}
