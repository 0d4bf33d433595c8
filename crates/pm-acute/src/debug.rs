//! Per-invocation debug state.
//!
//! A [`DebugContext`] is owned by the caller and threaded through one detector
//! run by `&mut`. It counts the stages executed so far and keeps their wall-clock
//! timings. The library never writes files; the mode only tells the caller what
//! to do with the trace afterwards.

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::debug;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DebugMode {
    #[default]
    Off,
    /// Dump intermediate results into the given directory.
    Print(PathBuf),
    /// Hand intermediate results to a visualisation front end.
    Plot,
}

impl DebugMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, DebugMode::Off)
    }

    pub fn output_dir(&self) -> Option<&Path> {
        match self {
            DebugMode::Print(dir) => Some(dir.as_path()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageTiming {
    pub step: u32,
    pub label: &'static str,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, Default)]
pub struct DebugContext {
    mode: DebugMode,
    step: u32,
    stages: Vec<StageTiming>,
}

impl DebugContext {
    pub fn new(mode: DebugMode) -> Self {
        Self {
            mode,
            step: 0,
            stages: Vec::new(),
        }
    }

    pub fn mode(&self) -> &DebugMode {
        &self.mode
    }

    /// Number of stages recorded so far.
    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn stages(&self) -> &[StageTiming] {
        &self.stages
    }

    /// Closes a stage that began at `started` and returns its step number.
    pub fn record(&mut self, label: &'static str, started: Instant) -> u32 {
        self.step += 1;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        if self.mode.is_enabled() {
            debug!("step {}: {label} took {elapsed_ms:.3} ms", self.step);
        }
        self.stages.push(StageTiming {
            step: self.step,
            label,
            elapsed_ms,
        });
        self.step
    }

    pub fn total_ms(&self) -> f64 {
        self.stages.iter().map(|s| s.elapsed_ms).sum()
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::time::Instant;

    use super::{DebugContext, DebugMode};

    #[test]
    fn steps_advance_per_record() {
        let mut ctx = DebugContext::default();
        assert_eq!(ctx.step(), 0);

        assert_eq!(ctx.record("first", Instant::now()), 1);
        assert_eq!(ctx.record("second", Instant::now()), 2);

        let labels: Vec<_> = ctx.stages().iter().map(|s| (s.step, s.label)).collect();
        assert_eq!(labels, vec![(1, "first"), (2, "second")]);
        assert!(ctx.total_ms() >= 0.0);
    }

    #[test]
    fn contexts_are_independent() {
        let mut a = DebugContext::new(DebugMode::Plot);
        let b = DebugContext::new(DebugMode::Off);
        a.record("only", Instant::now());

        assert_eq!(a.step(), 1);
        assert_eq!(b.step(), 0);
    }

    #[test]
    fn only_print_mode_has_an_output_dir() {
        let print = DebugMode::Print(PathBuf::from("trace"));
        assert_eq!(print.output_dir(), Some(Path::new("trace")));
        assert!(print.is_enabled());
        assert_eq!(DebugMode::Plot.output_dir(), None);
        assert!(!DebugMode::Off.is_enabled());
    }
}
