// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-sweep observers
//!
//! Observers see the state at sweep boundaries only. They never change the
//! course of a run.

use hopfield_npu_neural::{render_ascii, NetworkState};
use tracing::{debug, info};

use crate::relaxation::{RelaxationOutcome, SweepReport};

/// Callback invoked by the relaxation engine
pub trait SweepObserver {
    /// Called after every sweep with the state as it stands
    fn on_sweep(&mut self, report: &SweepReport, state: &NetworkState);

    /// Called once when the run ends
    fn on_finish(&mut self, _outcome: &RelaxationOutcome, _state: &NetworkState) {}
}

impl<F> SweepObserver for F
where
    F: FnMut(&SweepReport, &NetworkState),
{
    fn on_sweep(&mut self, report: &SweepReport, state: &NetworkState) {
        self(report, state)
    }
}

/// Observer that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SweepObserver for NoopObserver {
    #[inline]
    fn on_sweep(&mut self, _report: &SweepReport, _state: &NetworkState) {}
}

/// Largest network rendered as an ASCII grid by default
pub const DEFAULT_ASCII_MAX_NEURONS: usize = 100;

/// Logs relaxation progress through `tracing`
///
/// Networks with at most `ascii_max_neurons` neurons get their state drawn
/// as a grid after every sweep. Larger ones log energy every `interval`
/// sweeps.
#[derive(Debug, Clone)]
pub struct EnergyLogObserver {
    interval: usize,
    ascii_max_neurons: usize,
    grid_width: Option<usize>,
    logged: usize,
}

impl EnergyLogObserver {
    /// `interval` of 0 is treated as 1
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            ascii_max_neurons: DEFAULT_ASCII_MAX_NEURONS,
            grid_width: None,
            logged: 0,
        }
    }

    /// Override the ASCII threshold and the grid width (default ⌈√K⌉)
    pub fn with_ascii(mut self, max_neurons: usize, grid_width: Option<usize>) -> Self {
        self.ascii_max_neurons = max_neurons;
        self.grid_width = grid_width;
        self
    }

    /// Number of sweeps that produced a log line
    pub fn logged(&self) -> usize {
        self.logged
    }

    fn width_for(&self, size: usize) -> usize {
        self.grid_width
            .unwrap_or_else(|| (size as f64).sqrt().ceil() as usize)
            .max(1)
    }
}

impl Default for EnergyLogObserver {
    fn default() -> Self {
        Self::new(10)
    }
}

impl SweepObserver for EnergyLogObserver {
    fn on_sweep(&mut self, report: &SweepReport, state: &NetworkState) {
        if state.len() <= self.ascii_max_neurons {
            debug!(
                "[ENERGY] Sweep {}: energy {:.1}, {} flip(s)\n{}",
                report.step,
                report.energy,
                report.flips,
                render_ascii(state.as_slice(), self.width_for(state.len()))
            );
            self.logged += 1;
        } else if report.step % self.interval == 0 {
            info!(
                "[ENERGY] Sweep {}: energy {:.1}, {} flip(s)",
                report.step, report.energy, report.flips
            );
            self.logged += 1;
        }
    }

    fn on_finish(&mut self, outcome: &RelaxationOutcome, state: &NetworkState) {
        info!("[ENERGY] Run finished with {:?} (K={})", outcome, state.len());
    }
}
