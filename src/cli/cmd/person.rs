use super::{write_field, write_list, Cmd, CmdError, Context, HttpClientSnafu};
use crate::cli::sink::Sink;
use crate::httpclient::data::Person;
use clap::Parser;
use snafu::ResultExt;
use std::fmt;

/// Fetch person details by id.
#[derive(Parser, Debug, PartialEq)]
pub struct Input {
    /// The LRZ id of the person, e.g. `00000000001F17E0`.
    pub id: String,
}

impl Cmd for Input {
    async fn exec(&self, ctx: &Context) -> Result<(), CmdError> {
        let person = ctx
            .client
            .person(&self.id)
            .await
            .context(HttpClientSnafu)?;
        ctx.write_result(&person)
    }
}

impl Person {
    /// The full name including titles, as far as it is known.
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [
            self.title_prefix.as_deref(),
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.title_suffix.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id: {}", self.lrz_id)?;
        write_field(f, "Name", self.display_name())?;
        write_field(f, "Username", self.username.as_ref())?;
        write_field(f, "Status", self.status.as_ref())?;
        write_list(f, "Accounts", &self.accounts)
    }
}
impl Sink for Person {}
