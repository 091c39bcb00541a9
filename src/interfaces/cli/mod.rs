use std::path::PathBuf;

use clap::Parser;

use crate::io::format::gbasis_output;

const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Logs a heading to the `gbasis-output` logger.
pub fn log_heading() {
    let version = if let Some(ver) = VERSION {
        format!("v{ver}")
    } else {
        "v unknown".to_string()
    };
    gbasis_output!("╭──────────────────────────────────────────────────────────────────────────────╮");
    gbasis_output!("│                                                                              │");
    gbasis_output!("│      ██████  ██████   █████  ███████ ██ ███████                              │");
    gbasis_output!("│     ██       ██   ██ ██   ██ ██      ██ ██                                   │");
    gbasis_output!("│     ██   ███ ██████  ███████ ███████ ██ ███████                              │");
    gbasis_output!("│     ██    ██ ██   ██ ██   ██      ██ ██      ██                              │");
    gbasis_output!("│      ██████  ██████  ██   ██ ███████ ██ ███████                              │");
    gbasis_output!("│                                                                              │");
    gbasis_output!("│     Gaussian basis-set assembly and derivative permutation maps {version:>12} │");
    gbasis_output!("╰──────────────────────────────────────────────────────────────────────────────╯");
    gbasis_output!("");
}

/// Command-line arguments of the `gbasis` binary.
#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// The YAML input file.
    #[arg(short, long)]
    pub config: PathBuf,

    /// An optional file to which the output is also written.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Logs debugging messages to standard error.
    #[arg(short, long)]
    pub debug: bool,
}
