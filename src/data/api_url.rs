use std::{fmt::Display, str::FromStr};

use reqwest::Url;
use serde::{Deserialize, Serialize};
use url::ParseError;

/// The base address of the SIM API.
///
/// Wraps a `Url` whose path never ends in a slash, so that endpoint
/// paths can be appended verbatim.
#[derive(Debug, PartialEq, Clone)]
pub struct ApiUrl(Url);

pub const DEFAULT_API_URL: &str = "https://simapi.sim.lrz.de";

impl ApiUrl {
    pub fn parse(s: &str) -> Result<ApiUrl, ParseError> {
        s.parse::<ApiUrl>()
    }

    pub fn as_url(&self) -> &Url {
        let ApiUrl(u) = self;
        u
    }

    pub fn as_str(&self) -> &str {
        self.as_url().as_str().trim_end_matches('/')
    }

    /// The host name used to look up credentials.
    pub fn host(&self) -> Option<&str> {
        self.as_url().host_str()
    }

    /// Appends the given path segments to the base url, each one
    /// percent-encoded, and sets the query pairs.
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let ApiUrl(base) = self;
        let mut url = base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl Display for ApiUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApiUrl {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut url = Url::parse(s.trim())?;
        if url.cannot_be_a_base() {
            return Err(ParseError::RelativeUrlWithCannotBeABaseBase);
        }
        let path = url.path().trim_end_matches('/').to_string();
        url.set_path(&path);
        Ok(ApiUrl(url))
    }
}
