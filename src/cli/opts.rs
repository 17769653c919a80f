use super::cmd::*;
use crate::data::api_url::ApiUrl;
use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main options are available to all commands. They must appear
/// before a sub-command.
#[derive(Parser, Debug, Clone)]
#[command()]
pub struct CommonOpts {
    /// Be more verbose when logging. Verbosity increases with each
    /// occurence of that option.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// How to format the output. The default is human readable which
    /// may choose to not show every detail for better readability.
    /// The json output format can be used to always show all details
    /// in a structured form.
    #[arg(short, long, value_enum, default_value_t = Format::Default)]
    pub format: Format,

    /// The (base) URL to the SIM API. It can be given as environment
    /// variable SIM_API_URL or in the config file. The default is
    /// https://simapi.sim.lrz.de.
    #[arg(long, env = "SIM_API_URL", value_hint = ValueHint::Url)]
    pub base_url: Option<ApiUrl>,

    /// Read credentials for the API host from this netrc file instead
    /// of ~/.netrc.
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "no_netrc")]
    pub netrc: Option<PathBuf>,

    /// Do not read any netrc file and send requests without
    /// authentication.
    #[arg(long)]
    pub no_netrc: bool,

    /// Timeout in seconds for each request. Defaults to 10.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// A TOML config file providing defaults for `base_url`,
    /// `timeout` and `netrc`. If not given, the file `config.toml` in
    /// the user's config directory is read if it exists.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub enum SubCommand {
    #[command()]
    Groups(groups::ListInput),

    #[command()]
    GroupMembers(groups::MembersInput),

    #[command()]
    ProjectInstitution(project::Input),

    #[command()]
    Institution(institution::Input),

    #[command()]
    Person(person::Input),

    #[command()]
    User(user::Input),

    #[command()]
    Version(version::Input),

    #[command()]
    ShellCompletion(shell_completion::Input),
}

/// This is the command line interface to the LRZ SIM API. Main
/// options are available to all sub-commands and must appear before
/// them. Each sub command has its own set of flags/options and
/// arguments.
///
/// Requests are authenticated with the credentials found for the API
/// host in ~/.netrc, unless `--netrc` or `--no-netrc` is given.
#[derive(Parser, Debug)]
#[command(name = "sim-api", version)]
pub struct MainOpts {
    #[clap(flatten)]
    pub common_opts: CommonOpts,

    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

/// The format for presenting the results.
#[derive(ValueEnum, Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub enum Format {
    Json,
    Default,
}
