//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated SharePoint site URL.
///
/// The URL must be absolute with an `http` or `https` scheme. A trailing
/// slash is trimmed so that service paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use sharepoint_api::SiteUrl;
///
/// let url = SiteUrl::new("https://contoso.sharepoint.com/sites/dev/").unwrap();
/// assert_eq!(url.as_ref(), "https://contoso.sharepoint.com/sites/dev");
/// assert_eq!(url.origin(), "https://contoso.sharepoint.com");
/// assert_eq!(url.host_name(), "contoso.sharepoint.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteUrl {
    url: String,
    host_start: usize,
    host_end: usize,
}

impl SiteUrl {
    /// Creates a new validated site URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSiteUrl`] if the URL is not an absolute
    /// `http`/`https` URL with a host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidSiteUrl { url: url.clone() })?;

        let scheme = url[..scheme_end].to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(ConfigError::InvalidSiteUrl { url });
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        // Authority ends at the first path, query or fragment delimiter
        let host_end = remainder
            .find(['/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start || remainder.contains(['?', '#']) {
            return Err(ConfigError::InvalidSiteUrl { url });
        }

        Ok(Self {
            url,
            host_start,
            host_end,
        })
    }

    /// Returns the scheme and authority of the URL (e.g., `https://contoso.sharepoint.com`).
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.url[..self.host_end]
    }

    /// Returns the host name, including any port.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Returns the server-relative path of the site (`/` for a root site).
    #[must_use]
    pub fn server_relative_path(&self) -> &str {
        let path = &self.url[self.host_end..];
        if path.is_empty() {
            "/"
        } else {
            path
        }
    }
}

impl AsRef<str> for SiteUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for SiteUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for SiteUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A bearer token forwarded in the `Authorization` header.
///
/// Acquiring the token is the caller's business; the SDK only attaches it.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `AccessToken(*****)`.
///
/// # Example
///
/// ```rust
/// use sharepoint_api::AccessToken;
///
/// let token = AccessToken::new("eyJ0eXAi...").unwrap();
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}
