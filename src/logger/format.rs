//! Log formatting and output with ANSI colors
//!
//! Handles colorized console output with aligned tag and level columns,
//! plus plain-text file output.

use super::file::write_to_file;
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stdout, ErrorKind, Write};

/// Log format width for tag alignment
const TAG_WIDTH: usize = 11;
const LEVEL_WIDTH: usize = 7;

/// Format and output a log message to console and file
pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let now = Local::now();
    let time = now.format("%H:%M:%S").to_string();

    let tag_str = format_tag(&tag);
    let level_str = format_level(level);

    let console_line = format!(
        "{} [{}] [{}] {}",
        time.dimmed(),
        tag_str,
        level_str,
        message
    );
    print_stdout_safe(&console_line);

    let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
    let file_line = format!(
        "{} [{}] [{}] {}",
        timestamp,
        tag.to_plain_string(),
        level.as_str(),
        message
    );
    write_to_file(&file_line);
}

/// Format the tag column with a per-module color
fn format_tag(tag: &LogTag) -> String {
    let padded = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => padded.cyan().to_string(),
        LogTag::Webserver => padded.blue().to_string(),
        LogTag::Database => padded.magenta().to_string(),
        LogTag::CheckIn => padded.green().to_string(),
        LogTag::Badges => padded.yellow().to_string(),
        LogTag::Places => padded.bright_blue().to_string(),
        LogTag::Auth => padded.bright_magenta().to_string(),
        LogTag::Leaderboard => padded.bright_green().to_string(),
        LogTag::Config => padded.white().to_string(),
    }
}

/// Format the level column with severity colors
fn format_level(level: LogLevel) -> String {
    let padded = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);
    match level {
        LogLevel::Error => padded.red().bold().to_string(),
        LogLevel::Warning => padded.yellow().to_string(),
        LogLevel::Info => padded.green().to_string(),
        LogLevel::Debug => padded.bright_black().to_string(),
        LogLevel::Verbose => padded.dimmed().to_string(),
    }
}

/// Print to stdout, tolerating broken pipes when output is piped
fn print_stdout_safe(line: &str) {
    let mut out = stdout();
    if let Err(e) = writeln!(out, "{}", line) {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
    }
}
