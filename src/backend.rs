use serde::Deserialize;
use std::env;
use std::fmt;

pub const SERVICE_URL_ENV_VAR: &str = "CALENDARIO_SERVICE_URL";
pub const ACCESS_KEY_ENV_VAR: &str = "CALENDARIO_ACCESS_KEY";

/// Connection settings for the optional sync backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub url: Option<String>,
    pub access_key: Option<String>,
}

impl BackendSettings {
    pub fn new(url: Option<String>, access_key: Option<String>) -> Self {
        BackendSettings { url, access_key }
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| env::var(name).ok())
    }

    /// Replaces each setting for which `lookup` yields a value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(SERVICE_URL_ENV_VAR) {
            self.url = Some(url);
        }
        if let Some(key) = lookup(ACCESS_KEY_ENV_VAR) {
            self.access_key = Some(key);
        }
        self
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Handle to the sync backend. Nothing in the calendar talks to it yet.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientHandle {
    url: String,
    access_key: String,
}

impl ClientHandle {
    /// Builds a handle when both settings are present and non-empty.
    /// Otherwise logs a warning and returns `None`.
    pub fn from_settings(settings: &BackendSettings) -> Option<Self> {
        match (non_empty(&settings.url), non_empty(&settings.access_key)) {
            (Some(url), Some(access_key)) => {
                log::info!("Sync backend configured at {}", url);
                Some(ClientHandle {
                    url: url.to_owned(),
                    access_key: access_key.to_owned(),
                })
            }
            _ => {
                log::warn!(
                    "Missing {} and/or {}; set them (or [backend] in the config file) to enable synchronization",
                    SERVICE_URL_ENV_VAR,
                    ACCESS_KEY_ENV_VAR
                );
                None
            }
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }
}

// Keep the access key out of logs.
impl fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientHandle")
            .field("url", &self.url)
            .field("access_key", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(url: Option<&str>, key: Option<&str>) -> BackendSettings {
        BackendSettings::new(url.map(str::to_owned), key.map(str::to_owned))
    }

    #[test]
    fn both_settings_configure_a_client() {
        let client =
            ClientHandle::from_settings(&settings(Some("https://sync.example"), Some("k3y")))
                .unwrap();

        assert_eq!(client.url(), "https://sync.example");
        assert_eq!(client.access_key(), "k3y");
    }

    #[test]
    fn missing_setting_leaves_client_unconfigured() {
        assert!(ClientHandle::from_settings(&settings(None, Some("k3y"))).is_none());
        assert!(ClientHandle::from_settings(&settings(Some("https://sync.example"), None)).is_none());
        assert!(ClientHandle::from_settings(&BackendSettings::default()).is_none());
    }

    #[test]
    fn empty_setting_counts_as_missing() {
        assert!(ClientHandle::from_settings(&settings(Some(""), Some("k3y"))).is_none());
        assert!(ClientHandle::from_settings(&settings(Some("https://x"), Some("  "))).is_none());
    }

    #[test]
    fn overrides_take_precedence() {
        let merged = settings(Some("https://file"), Some("file-key")).with_overrides(|name| {
            if name == SERVICE_URL_ENV_VAR {
                Some("https://env".to_owned())
            } else {
                None
            }
        });

        assert_eq!(merged, settings(Some("https://env"), Some("file-key")));
    }

    #[test]
    fn debug_hides_access_key() {
        let client =
            ClientHandle::from_settings(&settings(Some("https://x"), Some("secret"))).unwrap();
        assert!(!format!("{:?}", client).contains("secret"));
    }
}
