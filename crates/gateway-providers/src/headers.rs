//! Authentication header construction.
//!
//! Each provider id maps to an [`AuthScheme`]. Ids without an explicit entry
//! use bearer authentication, which is what OpenAI-compatible servers expect.

use gateway_core::{GatewayError, ProviderKind};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::collections::HashMap;

/// Anthropic API version sent with every Anthropic request
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Header convention a provider uses for its credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <credential>`
    Bearer,
    /// Credential in a dedicated header, with an optional version header
    ApiKeyHeader {
        /// Header carrying the credential
        header: HeaderName,
        /// Fixed version header sent alongside the credential
        version: Option<(HeaderName, HeaderValue)>,
    },
}

impl AuthScheme {
    /// Anthropic convention: `x-api-key` plus `anthropic-version`
    #[must_use]
    pub fn anthropic() -> Self {
        Self::ApiKeyHeader {
            header: HeaderName::from_static("x-api-key"),
            version: Some((
                HeaderName::from_static("anthropic-version"),
                HeaderValue::from_static(ANTHROPIC_VERSION),
            )),
        }
    }

    fn apply(
        &self,
        headers: &mut HeaderMap,
        provider_id: &str,
        credential: &str,
    ) -> Result<(), GatewayError> {
        match self {
            Self::Bearer => {
                headers.insert(
                    AUTHORIZATION,
                    sensitive_value(provider_id, &format!("Bearer {credential}"))?,
                );
            }
            Self::ApiKeyHeader { header, version } => {
                headers.insert(header.clone(), sensitive_value(provider_id, credential)?);
                if let Some((name, value)) = version {
                    headers.insert(name.clone(), value.clone());
                }
            }
        }
        Ok(())
    }
}

fn sensitive_value(provider_id: &str, value: &str) -> Result<HeaderValue, GatewayError> {
    let mut value = HeaderValue::from_str(value).map_err(|e| {
        GatewayError::unexpected(provider_id, format!("Invalid credential header value: {e}"))
    })?;
    value.set_sensitive(true);
    Ok(value)
}

/// Builds request headers for a provider
#[derive(Debug, Clone)]
pub struct HeaderBuilder {
    schemes: HashMap<String, AuthScheme>,
    fallback: AuthScheme,
}

impl Default for HeaderBuilder {
    fn default() -> Self {
        let schemes = ProviderKind::ALL
            .into_iter()
            .map(|kind| {
                let scheme = match kind {
                    ProviderKind::Anthropic => AuthScheme::anthropic(),
                    _ => AuthScheme::Bearer,
                };
                (kind.as_str().to_string(), scheme)
            })
            .collect();

        Self {
            schemes,
            fallback: AuthScheme::Bearer,
        }
    }
}

impl HeaderBuilder {
    /// Register (or replace) the scheme for a provider id
    #[must_use]
    pub fn with_scheme(mut self, provider_id: impl Into<String>, scheme: AuthScheme) -> Self {
        self.schemes.insert(provider_id.into(), scheme);
        self
    }

    /// Scheme used for a provider id
    #[must_use]
    pub fn scheme_for(&self, provider_id: &str) -> &AuthScheme {
        self.schemes.get(provider_id).unwrap_or(&self.fallback)
    }

    /// Build the headers for a request to `provider_id`
    ///
    /// # Errors
    /// Returns an unexpected error if the credential is not a valid header value
    pub fn build(&self, provider_id: &str, credential: &str) -> Result<HeaderMap, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.scheme_for(provider_id)
            .apply(&mut headers, provider_id, credential)?;
        Ok(headers)
    }
}
