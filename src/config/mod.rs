//! Configuration types for the SharePoint API SDK.
//!
//! This module provides the core configuration types used to initialize
//! a [`ClientContext`](crate::ClientContext) for a SharePoint site.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: The configuration struct holding all SDK settings
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`SiteUrl`]: A validated absolute site URL
//! - [`AccessToken`]: A bearer token with masked debug output
//!
//! # Example
//!
//! ```rust
//! use sharepoint_api::{ClientConfig, SiteUrl, AccessToken};
//!
//! let config = ClientConfig::builder()
//!     .site_url(SiteUrl::new("https://contoso.sharepoint.com/sites/dev").unwrap())
//!     .access_token(AccessToken::new("token").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{AccessToken, SiteUrl};

use crate::error::ConfigError;

/// Configuration for the SharePoint API SDK.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use sharepoint_api::{ClientConfig, SiteUrl};
///
/// let config = ClientConfig::builder()
///     .site_url(SiteUrl::new("https://contoso.sharepoint.com").unwrap())
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    site_url: SiteUrl,
    access_token: Option<AccessToken>,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the site URL.
    #[must_use]
    pub const fn site_url(&self) -> &SiteUrl {
        &self.site_url
    }

    /// Returns the access token, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// The only required field is `site_url`.
///
/// # Defaults
///
/// - `access_token`: `None` (no `Authorization` header is sent)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    site_url: Option<SiteUrl>,
    access_token: Option<AccessToken>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the site URL (required).
    #[must_use]
    pub fn site_url(mut self, url: SiteUrl) -> Self {
        self.site_url = Some(url);
        self
    }

    /// Sets the bearer token sent with every request.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `site_url` is not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let site_url = self
            .site_url
            .ok_or(ConfigError::MissingRequiredField { field: "site_url" })?;

        Ok(ClientConfig {
            site_url,
            access_token: self.access_token,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_site_url() {
        let result = ClientConfigBuilder::new()
            .access_token(AccessToken::new("token").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "site_url" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ClientConfig::builder()
            .site_url(SiteUrl::new("https://contoso.sharepoint.com").unwrap())
            .build()
            .unwrap();

        assert!(config.access_token().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = ClientConfig::builder()
            .site_url(SiteUrl::new("https://contoso.sharepoint.com/sites/dev").unwrap())
            .access_token(AccessToken::new("token").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert_eq!(
            config.site_url().as_ref(),
            "https://contoso.sharepoint.com/sites/dev"
        );
        assert_eq!(config.access_token().unwrap().as_ref(), "token");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }

    #[test]
    fn test_config_debug_masks_token() {
        let config = ClientConfig::builder()
            .site_url(SiteUrl::new("https://contoso.sharepoint.com").unwrap())
            .access_token(AccessToken::new("very-secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("ClientConfig"));
        assert!(!debug_str.contains("very-secret"));
    }
}
