use super::{Cmd, CmdError, Context, HttpClientSnafu};
use crate::cli::sink::Sink;
use crate::data::notice::Notice;
use crate::httpclient::data::Group;
use clap::Parser;
use serde::Serialize;
use snafu::ResultExt;
use std::fmt;

/// List all available project groups.
#[derive(Parser, Debug, PartialEq)]
pub struct ListInput {}

/// List the members of a project group.
#[derive(Parser, Debug, PartialEq)]
pub struct MembersInput {
    /// The name of the group, e.g. `pn69ju-ai-c`.
    pub group: String,

    /// Resolve nested group memberships.
    #[arg(long)]
    pub solve: bool,
}

impl Cmd for ListInput {
    async fn exec(&self, ctx: &Context) -> Result<(), CmdError> {
        let groups = ctx.client.list_groups().await.context(HttpClientSnafu)?;
        ctx.write_result(&GroupList(groups))
    }
}

impl Cmd for MembersInput {
    async fn exec(&self, ctx: &Context) -> Result<(), CmdError> {
        let group = ctx
            .client
            .group_members(&self.group, self.solve)
            .await
            .context(HttpClientSnafu)?;
        if group.members.is_empty() {
            ctx.write_err(&Notice::new(format!(
                "Group {} has no members",
                group.name
            )))?;
        }
        ctx.write_result(&group)
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct GroupList(pub Vec<String>);

impl fmt::Display for GroupList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("\n"))
    }
}
impl Sink for GroupList {}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.members.join("\n"))
    }
}
impl Sink for Group {}
