//! # CLI Completions Command

use clap::Command;
use clap_complete::Shell;
use error::Result;

/// Generates shell completions for the CLI on stdout
pub fn completions(shell: Shell, cmd: &mut Command) -> Result<()> {
    clap_complete::generate(shell, cmd, "guichet", &mut std::io::stdout());
    Ok(())
}
