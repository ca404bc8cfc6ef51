use crate::model::{Candidate, Slice};
use log::{debug, warn};

/// Substring marking a general call in a decoded message.
pub const CQ_MARKER: &str = "CQ";

/// Inclusive SNR band in dB.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnrWindow {
    pub min: i32,
    pub max: i32,
}

impl SnrWindow {
    /// Weak-but-workable stations; tried first.
    pub const NARROW: SnrWindow = SnrWindow { min: -20, max: -10 };
    /// Single fallback when the narrow window finds nothing.
    pub const WIDE: SnrWindow = SnrWindow { min: -30, max: 0 };

    pub fn contains(&self, snr: i32) -> bool {
        self.min <= snr && snr <= self.max
    }
}

pub fn is_cq(message: &str) -> bool {
    message.contains(CQ_MARKER)
}

/// Stations on `channel` calling CQ inside `window` with a decoded callsign,
/// in slice/station scan order. Duplicates are kept.
pub fn select_cq_candidates(slices: &[Slice], channel: &str, window: SnrWindow) -> Vec<Candidate> {
    slices
        .iter()
        .filter(|s| s.is_channel(channel))
        .flat_map(|s| s.stations.iter())
        .filter(|st| is_cq(&st.message) && window.contains(st.snr) && !st.callsign.is_empty())
        .map(Candidate::from)
        .collect()
}

/// Stable ascending sort by SNR: weakest first, ties keep scan order.
pub fn rank_weakest_first(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by_key(|c| c.snr);
    candidates
}

/// Weakest candidate; the earliest one wins a tie.
pub fn select_target(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates.iter().min_by_key(|c| c.snr)
}

/// Outcome of the two-tier search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Window that produced `candidates` (the wide one if the narrow came up empty).
    pub window: SnrWindow,
    pub widened: bool,
    pub candidates: Vec<Candidate>,
}

/// Narrow window first, then exactly one retry with the wide window.
pub fn select_with_fallback(slices: &[Slice], channel: &str) -> Selection {
    let narrow = select_cq_candidates(slices, channel, SnrWindow::NARROW);
    if !narrow.is_empty() {
        debug!("{} candidates in narrow window on {}", narrow.len(), channel);
        return Selection { window: SnrWindow::NARROW, widened: false, candidates: narrow };
    }
    warn!(
        "no CQ in [{}, {}] dB on {}; widening to [{}, {}] dB",
        SnrWindow::NARROW.min,
        SnrWindow::NARROW.max,
        channel,
        SnrWindow::WIDE.min,
        SnrWindow::WIDE.max
    );
    let wide = select_cq_candidates(slices, channel, SnrWindow::WIDE);
    Selection { window: SnrWindow::WIDE, widened: true, candidates: wide }
}

/// Per-slice counts shown to the operator before selection.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelActivity {
    pub channel: String,
    pub band: String,
    pub dial_mhz: f64,
    pub stations: usize,
    pub cq_calls: usize,
}

pub fn summarize_activity(slices: &[Slice]) -> Vec<ChannelActivity> {
    slices
        .iter()
        .map(|s| ChannelActivity {
            channel: s.channel().to_string(),
            band: if s.band.is_empty() { "?".into() } else { s.band.clone() },
            dial_mhz: s.dial_mhz(),
            stations: s.stations.len(),
            cq_calls: s.stations.iter().filter(|st| is_cq(&st.message)).count(),
        })
        .collect()
}
