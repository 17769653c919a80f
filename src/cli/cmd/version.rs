use crate::cli::opts::Format;
use crate::cli::sink::Error as SinkError;
use crate::cli::sink::Sink;
use crate::cli::BuildInfo;
use clap::Parser;
use serde::Serialize;
use std::fmt;

/// Prints version information about this client.
#[derive(Parser, Debug, PartialEq)]
pub struct Input {}

impl Input {
    pub fn exec(&self, format: &Format, base_url: Option<&str>) -> Result<(), SinkError> {
        let vinfo = Versions {
            client: BuildInfo::default(),
            base_url,
        };
        Sink::write(format, &vinfo)
    }
}

#[derive(Debug, Serialize)]
pub struct Versions<'a> {
    pub client: BuildInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<&'a str>,
}

impl fmt::Display for Versions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Client:\n{}", self.client)?;
        if let Some(url) = self.base_url {
            write!(f, "\n\nSIM API @ {}", url)?;
        }
        Ok(())
    }
}

impl Sink for Versions<'_> {}
