use clap::Parser;
use clap::Subcommand;

#[derive(Debug, Subcommand, PartialEq)]
pub(crate) enum Command {
    /// Run the monitor in the foreground.
    Run {
        /// Path to a YAML file with normalization options
        #[clap(short, long)]
        options: Option<String>,
    },
}

/// Frame-driven gamepad monitor: polls connected controllers and logs
/// connect, disconnect, axis and button events.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Turn debugging information on
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// The command to run
    #[clap(subcommand)]
    pub command: Command,
}
