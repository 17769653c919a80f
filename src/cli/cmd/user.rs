use super::{write_field, Cmd, CmdError, Context, HttpClientSnafu};
use crate::cli::sink::Sink;
use crate::httpclient::data::User;
use clap::Parser;
use snafu::ResultExt;
use std::fmt;

/// Fetch user details by username.
#[derive(Parser, Debug, PartialEq)]
pub struct Input {
    /// The SIM username (Kennung), e.g. `di38qex`.
    pub username: String,
}

impl Cmd for Input {
    async fn exec(&self, ctx: &Context) -> Result<(), CmdError> {
        let user = ctx
            .client
            .user(&self.username)
            .await
            .context(HttpClientSnafu)?;
        ctx.write_result(&user)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username: {}", self.username)?;
        write_field(f, "Person", self.person_id.as_ref())?;
        write_field(f, "Status", self.status.as_ref())?;
        write_field(f, "Project", self.project.as_ref())?;
        write_field(f, "Account type", self.account_type.as_ref())?;
        write_field(f, "Uid", self.uid.as_ref())?;
        write_field(f, "Gid", self.gid.as_ref())?;
        if !self.data.is_empty() {
            write!(f, "\nData:")?;
        }
        for (key, value) in self.data.iter() {
            match value {
                serde_json::Value::String(s) => write!(f, "\n  {}: {}", key, s)?,
                other => write!(f, "\n  {}: {}", key, other)?,
            }
        }
        Ok(())
    }
}
impl Sink for User {}
