//! Where the API lives.

use std::env;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Host loopback as seen from the Android emulator.
pub const ANDROID_EMULATOR_BASE_URL: &str = "http://10.0.2.2:3000/api";

pub const BASE_URL_ENV: &str = "OFFERS_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// `OFFERS_API_BASE_URL` if set and non-empty, else the default.
    pub fn from_env() -> Self {
        Self::from_value(env::var(BASE_URL_ENV).ok())
    }

    pub fn android_emulator() -> Self {
        Self {
            base_url: ANDROID_EMULATOR_BASE_URL.to_string(),
        }
    }

    fn from_value(value: Option<String>) -> Self {
        match value.map(|v| v.trim().to_string()) {
            Some(url) if !url.is_empty() => Self { base_url: url },
            _ => Self::default(),
        }
    }
}
