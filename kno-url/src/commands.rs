use clap::{arg, value_parser};
use std::path::PathBuf;

pub const DEFAULT_STATE_DIR: &str = "./.kno-url";

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("kno-url")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("kno-url")
        .about("Interactive URL scraper with HTML and live network modes")
        .after_help("Type -h at the 'Main URL:' prompt for the interactive flag reference.")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress the banner").required(false))
        .arg(
            arg!(-c --"command" <LINE>)
                .required(false)
                .help("Run a single interactive line, e.g. \"cnn.com -a -d\", then exit"),
        )
        .arg(
            arg!(--"state-dir" <PATH>)
                .required(false)
                .help("Directory holding the browser tracking marker")
                .default_value(DEFAULT_STATE_DIR),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("HTML fetch timeout in seconds")
                .value_parser(value_parser!(u64).range(1..))
                .default_value("20"),
        )
        .arg(
            arg!(--"chromium" <PATH>)
                .required(false)
                .help("Browser executable for network mode")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(arg!(-v --"verbose" "Enable debug logging").required(false))
}
