//! Global error types

use crate::cli::cmd;
use crate::exitcode;
use crate::httpclient::ErrorKind;
use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{}", source))]
    Cmd { source: cmd::CmdError },
}

pub type Result<A> = std::result::Result<A, Error>;

impl From<cmd::CmdError> for Error {
    fn from(e: cmd::CmdError) -> Error {
        Error::Cmd { source: e }
    }
}

impl Error {
    /// A short name for the kind of error, shown in front of the
    /// message.
    pub fn label(&self) -> String {
        let Error::Cmd { source } = self;
        match source {
            cmd::CmdError::Config { .. } => "ConfigError".to_string(),
            cmd::CmdError::WriteResult { .. } => "OutputError".to_string(),
            cmd::CmdError::ContextCreate { source } | cmd::CmdError::HttpClient { source } => {
                source.kind().to_string()
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        let Error::Cmd { source } = self;
        match source.client_error().map(|e| e.kind()) {
            Some(ErrorKind::CredentialsFileUnreadable) => exitcode::NOINPUT,
            Some(ErrorKind::CredentialsNotFound) => exitcode::NOPERM,
            Some(ErrorKind::ClientSetup) => exitcode::CONFIG,
            Some(ErrorKind::InvalidInput) => exitcode::USAGE,
            Some(ErrorKind::TransportError) => exitcode::UNAVAILABLE,
            Some(ErrorKind::ApiRequestFailed) | Some(ErrorKind::ApiErrorCode) => {
                exitcode::PROTOCOL
            }
            Some(ErrorKind::InvalidResponseFormat) | Some(ErrorKind::MappingError) => {
                exitcode::DATAERR
            }
            None => match source {
                cmd::CmdError::Config { .. } => exitcode::CONFIG,
                _ => exitcode::SOFTWARE,
            },
        }
    }
}
