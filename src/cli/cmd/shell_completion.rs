use clap::{Command, Parser};
use clap_complete::{generate, Shell};

/// Generates completions for some shells.
///
/// Example for bash: `sim-api shell-completion --shell bash >
/// ~/.local/share/bash-completion/completions/sim-api`
#[derive(Parser, Debug)]
pub struct Input {
    /// For which shell to generate completions.
    #[arg(long, value_enum)]
    pub shell: Shell,

    /// The binary name.
    #[arg(long, default_value = "sim-api")]
    pub binary: String,
}

impl Input {
    pub fn print_completions(&self, app: &mut Command) {
        log::debug!("Generating {} completions for {}", self.shell, self.binary);
        generate(self.shell, app, &self.binary, &mut std::io::stdout());
    }
}
