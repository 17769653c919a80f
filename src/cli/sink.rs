use crate::cli::opts::Format;
use crate::data::notice::Notice;
use serde::Serialize;
use snafu::Snafu;
use std::fmt::Display;
use std::io::Write;

use super::BuildInfo;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{}", source))]
    Json { source: serde_json::Error },

    #[snafu(display("{}", source))]
    Io { source: std::io::Error },
}

/// Values that can be presented to the user, either as JSON or in
/// their human readable `Display` form.
pub trait Sink
where
    Self: Serialize + Display,
{
    fn write(format: &Format, value: &Self) -> Result<(), Error> {
        let mut out = std::io::stdout().lock();
        match format {
            Format::Json => {
                serde_json::to_writer(&mut out, value)?;
                writeln!(out)?;
            }
            Format::Default => writeln!(out, "{}", value)?,
        }
        Ok(())
    }
    fn write_err(format: &Format, value: &Self) -> Result<(), Error> {
        let mut out = std::io::stderr().lock();
        match format {
            Format::Json => {
                serde_json::to_writer(&mut out, value)?;
                writeln!(out)?;
            }
            Format::Default => writeln!(out, "{}", value)?,
        }
        Ok(())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Json { source: e }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io { source: e }
    }
}

impl Sink for Notice {}
impl Sink for BuildInfo {}
