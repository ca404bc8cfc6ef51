use crate::errors::AppError;
use argparse::{ArgumentParser, Collect, Store};
use log::warn;
use std::io::{self, Write};

/// Channel used when none is given, and the only one automatic mode searches.
pub const DEFAULT_CHANNEL: &str = "C";

pub const USAGE: &str = "Usage: qso_trigger <callsign> <grid> [channel]";
pub const EXAMPLE: &str = "Example: qso_trigger PD1HPB JO22 C";

pub struct CliArgs {
    pub positional: Vec<String>,
    pub log_level: String,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            positional: vec![],
            log_level: "essential".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Pick the weakest CQ station on the default channel.
    Automatic,
    /// Skip selection and call `callsign` directly.
    Manual { callsign: String, grid: String, channel: String },
}

impl CliArgs {
    pub fn mode(&self) -> Result<Mode, AppError> {
        match self.positional.as_slice() {
            [] => Ok(Mode::Automatic),
            [call, grid] => Ok(Mode::Manual {
                callsign: call.clone(),
                grid: grid.clone(),
                channel: DEFAULT_CHANNEL.into(),
            }),
            [call, grid, channel, rest @ ..] => {
                if !rest.is_empty() {
                    warn!("ignoring {} extra argument(s) after channel", rest.len());
                }
                Ok(Mode::Manual {
                    callsign: call.clone(),
                    grid: grid.clone(),
                    channel: channel.clone(),
                })
            }
            other => Err(AppError::Usage(format!(
                "expected 0 or at least 2 positional arguments, got {}\n{}\n{}",
                other.len(),
                USAGE,
                EXAMPLE
            ))),
        }
    }
}

fn build<'a>(ap: &mut ArgumentParser<'a>, args: &'a mut CliArgs) {
    ap.set_description("Pick a weak CQ station from the MCP server and start an automated QSO");
    ap.refer(&mut args.positional)
        .add_argument("args", Collect, "<callsign> <grid> [channel] for manual mode; none for automatic");
    ap.refer(&mut args.log_level)
        .add_option(&["--log"], Store, "Log level (essential|debug|trace|warn|error)");
}

/// Parse an explicit argv (program name first), writing help and errors to
/// the given streams. `Err` carries argparse's exit code (0 after `--help`).
pub fn parse_with(argv: Vec<String>, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<CliArgs, i32> {
    let mut args = CliArgs::default();
    {
        let mut ap = ArgumentParser::new();
        build(&mut ap, &mut args);
        ap.parse(argv, stdout, stderr)?;
    }
    Ok(args)
}

pub fn parse_from(argv: Vec<String>) -> Result<CliArgs, i32> {
    parse_with(argv, &mut io::sink(), &mut io::sink())
}

/// Process exit status after argparse stopped early: 0 for `--help`, 1 for any parse error.
pub fn parse_exit_status(code: i32) -> u8 {
    if code == 0 { 0 } else { 1 }
}
