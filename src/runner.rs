//! Top-level flow: manual trigger, or fetch-select-trigger.
//!
//! Everything meant for the operator is written to `out`; diagnostics go to
//! the log.

use crate::cli::{Mode, DEFAULT_CHANNEL, EXAMPLE, USAGE};
use crate::client::McpClient;
use crate::config::ClientConfig;
use crate::errors::AppError;
use crate::model::{instance_id_for, Candidate, Slice};
use crate::selector::{self, SnrWindow};
use crate::transport::Transport;
use log::info;
use serde_json::Value;
use std::io::Write;

/// How many ranked candidates are listed before the chosen one.
const SHOWN_CANDIDATES: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The server accepted the QSO request; carries its acknowledgement.
    Started(Value),
    /// Automatic mode found nobody to call, even with the wide window.
    NoCandidates,
}

impl Outcome {
    pub fn exit_status(&self) -> u8 {
        match self {
            Outcome::Started(_) => 0,
            Outcome::NoCandidates => 1,
        }
    }
}

pub fn run<T: Transport, W: Write>(
    client: &McpClient<T>,
    mode: &Mode,
    out: &mut W,
) -> Result<Outcome, AppError> {
    writeln!(out, "\n=== MCP QSO Trigger (via Web API) ===\n")?;
    match mode {
        Mode::Manual { callsign, grid, channel } => run_manual(client, callsign, grid, channel, out),
        Mode::Automatic => run_automatic(client, out),
    }
}

fn run_manual<T: Transport, W: Write>(
    client: &McpClient<T>,
    callsign: &str,
    grid: &str,
    channel: &str,
    out: &mut W,
) -> Result<Outcome, AppError> {
    let instance_id = instance_id_for(channel);
    info!("manual mode: {} on {}", callsign, instance_id);

    writeln!(out, "Manual mode: starting QSO with {}", callsign)?;
    writeln!(out, "Target: {}", callsign)?;
    writeln!(out, "Grid: {}", grid)?;
    writeln!(out, "Channel: {}", channel)?;
    writeln!(out, "Instance: {}", instance_id)?;

    let ack = client.execute_qso(&client.request_for(&instance_id, callsign))?;
    report_started(out, &ack, &instance_id)?;
    Ok(Outcome::Started(ack))
}

fn run_automatic<T: Transport, W: Write>(client: &McpClient<T>, out: &mut W) -> Result<Outcome, AppError> {
    writeln!(out, "Fetching current slice states...")?;
    let slices = client.fetch_slices()?;

    writeln!(out, "\n=== Current Activity ===")?;
    for a in selector::summarize_activity(&slices) {
        writeln!(
            out,
            "Channel {} ({}, {:.3} MHz): {} stations, {} calling CQ",
            a.channel, a.band, a.dial_mhz, a.stations, a.cq_calls
        )?;
    }

    let channel = DEFAULT_CHANNEL;
    writeln!(out, "\nSearching for weak CQ stations on channel {}...", channel)?;
    let selection = selector::select_with_fallback(&slices, channel);
    if selection.widened {
        writeln!(out, "No CQ stations within {} on channel {}", window_label(SnrWindow::NARROW), channel)?;
        writeln!(out, "\nSearching for any CQ stations within {}...", window_label(SnrWindow::WIDE))?;
    }

    let ranked = selector::rank_weakest_first(selection.candidates);
    let target = match selector::select_target(&ranked) {
        Some(t) => t,
        None => {
            info!("no candidates on {}; nothing triggered", channel);
            writeln!(out, "No CQ stations found on channel {}", channel)?;
            writeln!(out, "\n{}", USAGE)?;
            writeln!(out, "{}", EXAMPLE)?;
            return Ok(Outcome::NoCandidates);
        }
    };

    writeln!(out, "\nFound {} CQ stations on channel {}:", ranked.len(), channel)?;
    for (i, c) in ranked.iter().take(SHOWN_CANDIDATES).enumerate() {
        writeln!(out, "  {}. {}", i + 1, candidate_line(c))?;
    }

    let instance_id = instance_id_for(channel);

    writeln!(out, "\n=== Starting QSO with {} ===", target.callsign)?;
    writeln!(out, "Target: {}", target.callsign)?;
    writeln!(out, "Grid: {}", target.grid)?;
    writeln!(out, "SNR: {:+} dB", target.snr)?;
    writeln!(out, "Channel: {}", channel_label(&slices, channel))?;
    writeln!(out, "Instance: {}", instance_id)?;

    let ack = client.execute_qso(&client.request_for(&instance_id, &target.callsign))?;
    report_started(out, &ack, &instance_id)?;
    writeln!(out, "The QSO state machine will handle the complete exchange automatically.")?;
    Ok(Outcome::Started(ack))
}

fn report_started<W: Write>(out: &mut W, ack: &Value, instance_id: &str) -> Result<(), AppError> {
    writeln!(out, "\n=== QSO Started ===")?;
    writeln!(out, "{}", serde_json::to_string_pretty(ack)?)?;
    writeln!(out, "\nQSO is now running autonomously. Monitor the WSJT-X {} window for progress.", instance_id)?;
    Ok(())
}

fn candidate_line(c: &Candidate) -> String {
    format!("{:<10} {:<6} {:+3} dB - {}", c.callsign, c.grid, c.snr, c.message)
}

fn window_label(w: SnrWindow) -> String {
    format!("[{}, {}] dB", w.min, w.max)
}

fn channel_label(slices: &[Slice], channel: &str) -> String {
    match slices.iter().find(|s| s.is_channel(channel)) {
        Some(s) if !s.band.is_empty() => format!("{} ({}, {:.3} MHz)", channel, s.band, s.dial_mhz()),
        _ => channel.to_string(),
    }
}

/// Operator-facing text for a fatal error.
pub fn failure_message(err: &AppError, config: &ClientConfig) -> String {
    match err {
        AppError::Connectivity(_) => format!(
            "Error: Cannot connect to MCP server at {}\nMake sure the MCP server is running.",
            config.server_origin()
        ),
        AppError::Usage(msg) => format!("Error: {}", msg),
        other => format!("Error: {}", other),
    }
}
