//! Formatted output to the `gbasis-output` logger.

use std::fmt;

use log;

const GBASIS_BANNER_LENGTH: usize = 80;

/// Logs an error to the `gbasis-output` logger as well as the default logger.
macro_rules! gbasis_error {
    ($fmt:expr $(, $($arg:tt)*)?) => {
        log::error!($fmt, $($($arg)*)?);
        log::error!(target: "gbasis-output", $fmt, $($($arg)*)?);
    }
}

/// Logs a main output line to the `gbasis-output` logger.
macro_rules! gbasis_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "gbasis-output", $fmt, $($($arg)*)?); }
}

pub(crate) use {gbasis_error, gbasis_output};

/// Logs a nicely formatted section title to the `gbasis-output` logger.
pub(crate) fn log_title(title: &str) {
    let length = title.chars().count().max(GBASIS_BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    gbasis_output!("┌──{bar}──┐");
    gbasis_output!("│§ {title:^length$} §│");
    gbasis_output!("└──{bar}──┘");
}

/// Logs a nicely formatted subtitle to the `gbasis-output` logger.
pub(crate) fn log_subtitle(subtitle: &str) {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    gbasis_output!("{}", subtitle);
    gbasis_output!("{}", bar);
}

/// Turns a boolean into a string of `yes` or `no`.
pub(crate) fn nice_bool(b: bool) -> String {
    if b {
        "yes".to_string()
    } else {
        "no".to_string()
    }
}

/// A trait for logging outputs nicely, line by line.
pub(crate) trait GbasisOutput: fmt::Display {
    /// Logs display output nicely.
    fn log_output_display(&self) {
        let lines = self.to_string();
        lines.lines().for_each(|line| {
            gbasis_output!("{line}");
        })
    }
}

// Blanket implementation
impl<T> GbasisOutput for T where T: fmt::Display {}
