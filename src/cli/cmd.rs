pub mod groups;
pub mod institution;
pub mod person;
pub mod project;
pub mod shell_completion;
pub mod user;
pub mod version;

use super::sink::{Error as SinkError, Sink};
use crate::cli::opts::CommonOpts;
use crate::config::{ConfigError, SimApiConfig};
use crate::data::api_url::DEFAULT_API_URL;
use crate::httpclient::{self, Authentication, Client, ClientOptions, DEFAULT_TIMEOUT};
use serde::Serialize;
use snafu::{ResultExt, Snafu};
use std::fmt;
use std::time::Duration;

/// A sub command talking to the SIM API.
#[allow(async_fn_in_trait)]
pub trait Cmd {
    async fn exec(&self, ctx: &Context) -> Result<(), CmdError>;
}

pub struct Context {
    pub opts: CommonOpts,
    pub client: Client,
}

impl Context {
    pub fn new(opts: &CommonOpts) -> Result<Context, CmdError> {
        let config = SimApiConfig::load(opts.config.as_deref()).context(ConfigSnafu)?;
        let client =
            Client::new(client_options(opts, config)).context(ContextCreateSnafu)?;
        Ok(Context {
            opts: opts.clone(),
            client,
        })
    }

    /// A short hand for `Sink::write(self.format(), value)`
    fn write_result<A: Sink + Serialize>(&self, value: &A) -> Result<(), CmdError> {
        let fmt = self.opts.format;
        Sink::write(&fmt, value).context(WriteResultSnafu)
    }

    /// A short hand for `Sink::write_err(self.format(), value)`
    fn write_err<A: Sink + Serialize>(&self, value: &A) -> Result<(), CmdError> {
        let fmt = self.opts.format;
        Sink::write_err(&fmt, value).context(WriteResultSnafu)
    }

    /// Closes the client.
    pub fn close(self) {
        self.client.close();
    }
}

/// Combines the command line options with the config file. Options
/// given on the command line win.
fn client_options(opts: &CommonOpts, config: SimApiConfig) -> ClientOptions {
    let base_url = match &opts.base_url {
        Some(u) => {
            log::debug!("Use base url from arguments: {}", u);
            u.to_string()
        }
        None => match config.base_url {
            Some(u) => {
                log::debug!("Use base url from config file: {}", u);
                u
            }
            None => {
                log::debug!("Use base url: {}", DEFAULT_API_URL);
                DEFAULT_API_URL.to_string()
            }
        },
    };
    let timeout = opts
        .timeout
        .or(config.timeout)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT);
    let auth = if opts.no_netrc {
        Authentication::Disabled
    } else {
        Authentication::Netrc {
            path: opts.netrc.clone().or(config.netrc),
        }
    };
    ClientOptions {
        base_url,
        timeout,
        auth,
    }
}

/// Writes `label: value` on a new line, if there is a value.
fn write_field<V: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: Option<V>,
) -> fmt::Result {
    match value {
        Some(v) => write!(f, "\n{}: {}", label, v),
        None => Ok(()),
    }
}

/// Writes `label:` followed by the values as an indented list.
fn write_list(f: &mut fmt::Formatter<'_>, label: &str, values: &[String]) -> fmt::Result {
    if values.is_empty() {
        return Ok(());
    }
    write!(f, "\n{}:", label)?;
    values.iter().try_for_each(|v| write!(f, "\n  - {}", v))
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CmdError {
    #[snafu(display("{}", source))]
    Config { source: ConfigError },

    #[snafu(display("{}", source))]
    ContextCreate { source: httpclient::Error },

    #[snafu(display("{}", source))]
    HttpClient { source: httpclient::Error },

    #[snafu(display("Error writing data: {}", source))]
    WriteResult { source: SinkError },
}

impl CmdError {
    /// The client error behind this one, if any.
    pub fn client_error(&self) -> Option<&httpclient::Error> {
        match self {
            CmdError::ContextCreate { source } | CmdError::HttpClient { source } => Some(source),
            CmdError::Config { .. } | CmdError::WriteResult { .. } => None,
        }
    }
}
