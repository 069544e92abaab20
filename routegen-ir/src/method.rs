use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// HTTP verb bound to an operation.
///
/// `Any` is the wildcard that matches every verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Any,
}

impl HttpMethod {
    /// All methods, in declaration order.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Any,
    ];

    /// Canonical upper-case spelling (`GET`, `ANY`).
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Any => "ANY",
        }
    }

    /// Name of the router registration method (`GET`, `Any`).
    pub fn router_method(&self) -> &'static str {
        match self {
            HttpMethod::Any => "Any",
            other => other.as_str(),
        }
    }

    /// Verb a client should send; the wildcard falls back to `POST`.
    pub fn client_method(&self) -> &'static str {
        match self {
            HttpMethod::Any => "POST",
            other => other.as_str(),
        }
    }

    /// Returns true if this is the wildcard method.
    pub fn is_any(&self) -> bool {
        matches!(self, HttpMethod::Any)
    }

    /// Two methods conflict when they would serve the same request.
    pub fn conflicts_with(&self, other: &HttpMethod) -> bool {
        self == other || self.is_any() || other.is_any()
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known HTTP method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown HTTP method '{0}' (expected one of GET, POST, PUT, DELETE, PATCH, HEAD, OPTIONS, ANY)"
)]
pub struct ParseMethodError(pub String);

impl FromStr for HttpMethod {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == upper)
            .ok_or_else(|| ParseMethodError(s.to_string()))
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = ParseMethodError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for HttpMethod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
