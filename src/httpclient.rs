//! A http client for the LRZ SIM API
//!
//! Provides a client to the SIM API based on reqwest.
//!
//! # Usage
//!
//! ```rust,no_run
//! use sim_api::httpclient::{Client, ClientOptions};
//! async {
//!     let client = Client::new(ClientOptions::default()).unwrap();
//!     println!("{:?}", client.list_groups().await);
//! };
//! ```
//!
//! # Authentication
//!
//! Requests use HTTP basic authentication with the login and password
//! found for the API host in a netrc file (`~/.netrc` by default). See
//! [`Authentication`] for how to choose the file or turn it off.

pub mod data;
pub mod mapping;
pub mod netrc;
pub mod transport;

use self::data::*;
use self::netrc::Credentials;
use self::transport::Transport;
use crate::data::api_url::{ApiUrl, DEFAULT_API_URL};
use serde_json::Value;
use snafu::{ResultExt, Snafu};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("{}", source))]
    Credentials { source: netrc::Error },

    #[snafu(display("Invalid base url '{}': {}", url, source))]
    InvalidBaseUrl {
        source: url::ParseError,
        url: String,
    },

    #[snafu(display("Base url '{}' has no host", url))]
    NoHost { url: String },

    #[snafu(display("An error occurred creating the http client: {}", source))]
    ClientCreate { source: reqwest::Error },

    #[snafu(display("Invalid input: {}", message))]
    InvalidInput { message: String },

    #[snafu(display("An error was received from {}: {}", url, source))]
    Http { source: reqwest::Error, url: String },

    #[snafu(display("Request to {} failed with status {}: {}", url, status, message))]
    ApiRequestFailed {
        url: String,
        status: u16,
        body: String,
        message: String,
    },

    #[snafu(display("Response from {} is not valid JSON: {}", url, source))]
    InvalidResponseFormat {
        source: serde_json::Error,
        url: String,
    },

    #[snafu(display("Unexpected response from the {} endpoint: {}", endpoint, source))]
    Mapping {
        source: mapping::Error,
        endpoint: &'static str,
    },
}

/// The kind of failure, for callers that want to branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CredentialsNotFound,
    CredentialsFileUnreadable,
    ClientSetup,
    InvalidInput,
    TransportError,
    ApiRequestFailed,
    ApiErrorCode,
    InvalidResponseFormat,
    MappingError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Credentials { source } => match source {
                netrc::Error::NotFound { .. } => ErrorKind::CredentialsNotFound,
                netrc::Error::FileUnreadable { .. }
                | netrc::Error::FileUnparseable { .. }
                | netrc::Error::NoHomeDir => ErrorKind::CredentialsFileUnreadable,
            },
            Error::InvalidBaseUrl { .. } | Error::NoHost { .. } | Error::ClientCreate { .. } => {
                ErrorKind::ClientSetup
            }
            Error::InvalidInput { .. } => ErrorKind::InvalidInput,
            Error::Http { .. } => ErrorKind::TransportError,
            Error::ApiRequestFailed { .. } => ErrorKind::ApiRequestFailed,
            Error::InvalidResponseFormat { .. } => ErrorKind::InvalidResponseFormat,
            Error::Mapping { source, .. } => match source {
                mapping::Error::ApiCode { .. } => ErrorKind::ApiErrorCode,
                mapping::Error::Shape { .. } => ErrorKind::MappingError,
            },
        }
    }

    /// The HTTP status of a failed request, if there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ApiRequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Where to take credentials from.
#[derive(Debug, Clone, PartialEq)]
pub enum Authentication {
    /// Read them from a netrc file. Without a path `~/.netrc` is used
    /// if it exists.
    Netrc { path: Option<PathBuf> },

    /// Send requests without authentication.
    Disabled,
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub auth: Authentication,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            auth: Authentication::Netrc { path: None },
        }
    }
}

/// The SIM API client.
///
/// Each method issues a single GET request and maps the response into
/// a record. Credentials are resolved and the connection pool is
/// created in [`Client::new`]; both are released when the client is
/// dropped or [`closed`](Client::close). A client serves one caller at
/// a time, create one per concurrent caller.
pub struct Client {
    transport: Transport,
}

impl Client {
    pub fn new(opts: ClientOptions) -> Result<Client, Error> {
        let base_url = ApiUrl::parse(&opts.base_url).context(InvalidBaseUrlSnafu {
            url: &opts.base_url,
        })?;
        log::debug!("Create sim-api client for: {}", base_url);
        let credentials = load_credentials(&base_url, &opts.auth)?;
        let transport = Transport::new(base_url, credentials, opts.timeout)?;
        Ok(Client { transport })
    }

    pub fn base_url(&self) -> &ApiUrl {
        self.transport.base_url()
    }

    pub fn is_authenticated(&self) -> bool {
        self.transport.is_authenticated()
    }

    /// Releases the connection pool.
    pub fn close(self) {
        log::debug!("Closing sim-api client for {}", self.base_url());
    }

    /// Lists all available project groups.
    pub async fn list_groups(&self) -> Result<Vec<String>, Error> {
        self.fetch(&["service", "AI", "groups"], &[], "groups", mapping::groups)
            .await
    }

    /// Lists the members of a group. With `solve` nested group
    /// memberships are resolved by the server.
    pub async fn group_members(&self, group: &str, solve: bool) -> Result<Group, Error> {
        let group = non_empty(group, "group name")?;
        let solve = if solve { "true" } else { "false" };
        let members = self
            .fetch(
                &["service", "AI", "groups", group, "members"],
                &[("solve", solve)],
                "group members",
                mapping::group_members,
            )
            .await?;
        Ok(Group {
            name: group.to_string(),
            members,
        })
    }

    /// Returns the institution links of a project, e.g. `pn69ju`.
    pub async fn project_institution_links(
        &self,
        project: &str,
    ) -> Result<Vec<ProjectInstitutionLink>, Error> {
        let project = non_empty(project, "project name")?;
        self.fetch(
            &["einrichtung"],
            &[("projektname", project)],
            "project institution",
            mapping::project_institution_links,
        )
        .await
    }

    /// Fetches an institution by its LRZ id.
    pub async fn institution(&self, id: &str) -> Result<Institution, Error> {
        let id = non_empty(id, "institution id")?;
        self.fetch(&["einrichtung", id], &[], "institution", mapping::institution)
            .await
    }

    /// Fetches a person by its LRZ id.
    pub async fn person(&self, id: &str) -> Result<Person, Error> {
        let id = non_empty(id, "person id")?;
        self.fetch(&["person", id], &[], "person", mapping::person)
            .await
    }

    /// Fetches a user by its username (Kennung).
    pub async fn user(&self, username: &str) -> Result<User, Error> {
        let username = non_empty(username, "username")?;
        self.fetch(&["user", username], &[], "user", mapping::user)
            .await
    }

    async fn fetch<R>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        endpoint: &'static str,
        map: fn(&Value) -> Result<R, mapping::Error>,
    ) -> Result<R, Error> {
        let json = self.transport.get_json(segments, query).await?;
        map(&json).context(MappingSnafu { endpoint })
    }
}

fn load_credentials(base_url: &ApiUrl, auth: &Authentication) -> Result<Option<Credentials>, Error> {
    let path = match auth {
        Authentication::Disabled => {
            log::debug!("Authentication disabled");
            return Ok(None);
        }
        Authentication::Netrc { path } => path,
    };
    let host = base_url.host().ok_or_else(|| Error::NoHost {
        url: base_url.to_string(),
    })?;
    match path {
        Some(p) => netrc::resolve(p, host).map(Some).context(CredentialsSnafu),
        None => {
            let default = netrc::default_path().context(CredentialsSnafu)?;
            match netrc::resolve(&default, host) {
                Ok(creds) => Ok(Some(creds)),
                Err(e) if e.is_missing_file() => {
                    log::info!(
                        "No netrc file at {}, continuing without authentication",
                        default.display()
                    );
                    Ok(None)
                }
                Err(source) => Err(Error::Credentials { source }),
            }
        }
    }
}

fn non_empty<'a>(value: &'a str, what: &str) -> Result<&'a str, Error> {
    let v = value.trim();
    if v.is_empty() {
        Err(Error::InvalidInput {
            message: format!("The {} must not be empty", what),
        })
    } else {
        Ok(v)
    }
}
