use super::{Cmd, CmdError, Context, HttpClientSnafu};
use crate::cli::sink::Sink;
use crate::data::notice::Notice;
use crate::httpclient::data::ProjectInstitutionLink;
use clap::Parser;
use serde::Serialize;
use snafu::ResultExt;
use std::fmt;

/// Resolve the institution links of a project.
#[derive(Parser, Debug, PartialEq)]
pub struct Input {
    /// The project name, e.g. `pn69ju`.
    pub project: String,
}

impl Cmd for Input {
    async fn exec(&self, ctx: &Context) -> Result<(), CmdError> {
        let links = ctx
            .client
            .project_institution_links(&self.project)
            .await
            .context(HttpClientSnafu)?;
        if links.is_empty() {
            ctx.write_err(&Notice::new(format!(
                "No institution linked to project {}",
                self.project
            )))?;
        }
        ctx.write_result(&InstitutionLinks(links))
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct InstitutionLinks(pub Vec<ProjectInstitutionLink>);

impl fmt::Display for ProjectInstitutionLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.project, self.institution_id)?;
        if !self.link.is_empty() {
            write!(f, " ({})", self.link)?;
        }
        Ok(())
    }
}

impl fmt::Display for InstitutionLinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(|l| l.to_string()).collect();
        write!(f, "{}", lines.join("\n"))
    }
}
impl Sink for InstitutionLinks {}
