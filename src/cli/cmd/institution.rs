use super::{write_field, write_list, Cmd, CmdError, Context, HttpClientSnafu};
use crate::cli::sink::Sink;
use crate::httpclient::data::{Institution, InstitutionAddress};
use clap::Parser;
use snafu::ResultExt;
use std::fmt;

/// Fetch institution details by id.
#[derive(Parser, Debug, PartialEq)]
pub struct Input {
    /// The LRZ id of the institution, e.g. `0000000000E4EE4B`.
    pub id: String,
}

impl Cmd for Input {
    async fn exec(&self, ctx: &Context) -> Result<(), CmdError> {
        let inst = ctx
            .client
            .institution(&self.id)
            .await
            .context(HttpClientSnafu)?;
        ctx.write_result(&inst)
    }
}

impl fmt::Display for Institution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id: {}", self.lrz_id)?;
        write_field(f, "Name", self.name.as_ref())?;
        write_field(f, "Description", self.description.as_ref())?;
        write_field(f, "Kind", self.institution_kind.as_ref())?;
        write_field(f, "Type", self.institution_type.as_ref())?;
        write_field(f, "Status", self.status.as_ref())?;
        write_field(f, "Head", self.head_lrz_id.as_ref())?;
        write_list(f, "Parents", &self.parent_ids)?;
        if !self.addresses.is_empty() {
            write!(f, "\nAddresses:")?;
            for addr in self.addresses.iter() {
                write!(f, "\n  - {}", addr)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for InstitutionAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let city = match (&self.postal_code, &self.city) {
            (Some(plz), Some(city)) => Some(format!("{} {}", plz, city)),
            (None, Some(city)) => Some(city.clone()),
            (Some(plz), None) => Some(plz.clone()),
            (None, None) => None,
        };
        let parts: Vec<&str> = [
            self.recipient1.as_deref(),
            self.recipient2.as_deref(),
            self.street.as_deref(),
            city.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();
        match &self.kind {
            Some(kind) => write!(f, "{}: {}", kind, parts.join(", ")),
            None => write!(f, "{}", parts.join(", ")),
        }
    }
}
impl Sink for Institution {}
