pub mod cmd;
pub mod opts;
pub mod sink;

use self::cmd::{Cmd, CmdError, Context, WriteResultSnafu};
use self::opts::{MainOpts, SubCommand};
use clap::CommandFactory;
use serde::Serialize;
use snafu::ResultExt;
use std::fmt;

pub async fn execute_cmd(opts: MainOpts) -> Result<(), CmdError> {
    log::info!("Running command: {:?}", opts.subcmd);
    // these work without talking to the api
    match &opts.subcmd {
        SubCommand::Version(input) => {
            let url = opts.common_opts.base_url.as_ref().map(|u| u.as_str());
            return input
                .exec(&opts.common_opts.format, url)
                .context(WriteResultSnafu);
        }
        SubCommand::ShellCompletion(input) => {
            let mut app = MainOpts::command();
            input.print_completions(&mut app);
            return Ok(());
        }
        _ => {}
    }

    let ctx = Context::new(&opts.common_opts)?;
    let result = match &opts.subcmd {
        SubCommand::Groups(input) => input.exec(&ctx).await,
        SubCommand::GroupMembers(input) => input.exec(&ctx).await,
        SubCommand::ProjectInstitution(input) => input.exec(&ctx).await,
        SubCommand::Institution(input) => input.exec(&ctx).await,
        SubCommand::Person(input) => input.exec(&ctx).await,
        SubCommand::User(input) => input.exec(&ctx).await,
        SubCommand::Version(_) | SubCommand::ShellCompletion(_) => Ok(()),
    };
    ctx.close();
    result
}

#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub build_date: &'static str,
    pub build_version: &'static str,
    pub git_commit: &'static str,
    pub rustc_host_triple: &'static str,
    pub rustc_llvm_version: &'static str,
    pub rustc_version: &'static str,
    pub cargo_target_triple: &'static str,
}
impl Default for BuildInfo {
    fn default() -> Self {
        BuildInfo {
            build_date: env!("VERGEN_BUILD_TIMESTAMP"),
            build_version: env!("CARGO_PKG_VERSION"),
            git_commit: env!("VERGEN_GIT_SHA"),
            rustc_host_triple: env!("VERGEN_RUSTC_HOST_TRIPLE"),
            rustc_llvm_version: env!("VERGEN_RUSTC_LLVM_VERSION"),
            rustc_version: env!("VERGEN_RUSTC_SEMVER"),
            cargo_target_triple: env!("VERGEN_CARGO_TARGET_TRIPLE"),
        }
    }
}
impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cc = self.git_commit.get(..8).unwrap_or(self.git_commit);
        write!(
            f,
            "  Built at: {}\n  Version: {}\n  Sha: {}",
            self.build_date, self.build_version, cc
        )
    }
}
