//! Phase instrumentation and run reports.
//!
//! Every component boundary is wrapped in [`timed`], which emits a
//! `tracing` event and notifies the caller's [`PhaseHook`].

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Symbol extraction and counting.
    Frequencies,
    TreeBuild,
    CodeTable,
    /// Second extraction pass plus bit packing.
    Encode,
    ReadHeader,
    Decode,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Frequencies => "counting symbols",
            Phase::TreeBuild => "building tree",
            Phase::CodeTable => "generating codes",
            Phase::Encode => "encoding",
            Phase::ReadHeader => "reading header",
            Phase::Decode => "decoding",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Observer notified around each pipeline phase.
pub trait PhaseHook {
    fn phase_started(&mut self, _phase: Phase) {}
    fn phase_finished(&mut self, _phase: Phase, _elapsed: Duration) {}
}

/// Hook that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

impl PhaseHook for NoopHook {}

/// Records how long each phase took.
#[derive(Debug, Default, Clone)]
pub struct PhaseTimings {
    entries: Vec<(Phase, Duration)>,
}

impl PhaseTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(Phase, Duration)] {
        &self.entries
    }

    pub fn get(&self, phase: Phase) -> Option<Duration> {
        self.entries
            .iter()
            .find(|(p, _)| *p == phase)
            .map(|(_, d)| *d)
    }

    pub fn total(&self) -> Duration {
        self.entries.iter().map(|(_, d)| *d).sum()
    }

    pub fn report(&self) {
        for (phase, elapsed) in &self.entries {
            eprintln!("{:<18} {:.3}s", phase.label(), elapsed.as_secs_f64());
        }
        eprintln!("{:<18} {:.3}s", "total", self.total().as_secs_f64());
    }
}

impl PhaseHook for PhaseTimings {
    fn phase_finished(&mut self, phase: Phase, elapsed: Duration) {
        self.entries.push((phase, elapsed));
    }
}

/// Run `f` as `phase`, reporting its duration even when it fails.
pub(crate) fn timed<T>(
    hook: &mut dyn PhaseHook,
    phase: Phase,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    hook.phase_started(phase);
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    tracing::debug!(
        phase = ?phase,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        ok = result.is_ok(),
        "phase finished"
    );
    hook.phase_finished(phase, elapsed);
    result
}

/// Summary of a compression run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompressReport {
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub symbol_width: usize,
    pub distinct_symbols: usize,
    pub total_symbols: u64,
    pub total_bits: u64,
}

impl CompressReport {
    /// Output size as a fraction of input size.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.output_bytes as f64 / self.input_bytes as f64
    }

    /// Percentage of the input saved; negative when the container grew.
    pub fn savings_percent(&self) -> f64 {
        100.0 * (1.0 - self.ratio())
    }
}

/// Summary of a decompression run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecompressReport {
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub total_bits: u64,
}
