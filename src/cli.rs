use clap::Parser;

use crate::command::localize::LocalizeArgs;

/// Rewrite remote Swift package references in an Xcode project into local
/// path references.
#[derive(Parser)]
#[command(name = "pbxproj-localize", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub localize: LocalizeArgs,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
