use std::path::Path;

use anyhow::{self, format_err};
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use gbasis::interfaces::cli::{log_heading, Cli};
use gbasis::interfaces::input::Input;
use gbasis::interfaces::InputHandle;
use gbasis::io::read_yaml;

/// Configures `log4rs` so that the `gbasis-output` target is written plainly to standard output
/// (and to `output` if given) while every other record goes to standard error.
fn configure_logging(output: Option<&Path>, debug: bool) -> Result<(), anyhow::Error> {
    let stdout = ConsoleAppender::builder()
        .target(Target::Stdout)
        .encoder(Box::new(PatternEncoder::new("{m}{n}")))
        .build();
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("[{l}] {t}: {m}{n}")))
        .build();

    let mut builder = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .appender(Appender::builder().build("stderr", Box::new(stderr)));
    let mut output_logger = Logger::builder().appender("stdout").additive(false);
    if let Some(path) = output {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{m}{n}")))
            .append(false)
            .build(path)
            .map_err(|err| format_err!("Unable to open {}: {err}.", path.display()))?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        output_logger = output_logger.appender("file");
    }
    let root_level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let config = builder
        .logger(output_logger.build("gbasis-output", LevelFilter::Info))
        .build(Root::builder().appender("stderr").build(root_level))
        .map_err(|err| format_err!(err))?;
    log4rs::init_config(config).map_err(|err| format_err!(err))?;
    Ok(())
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    configure_logging(cli.output.as_deref(), cli.debug)?;
    log_heading();
    let input = read_yaml::<Input, _>(&cli.config)?;
    input.handle()
}
