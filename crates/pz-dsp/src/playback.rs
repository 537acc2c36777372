//! Real-time playback helpers
//!
//! The host drives these from its own timer: each tick filters only the new
//! samples, threading the recursive filter state between ticks.

use pz_core::{Sample, Signal};

use crate::lfilter::{FilterState, RecursiveFilter, apply_incremental};
use crate::transfer::TransferFunction;
use crate::{MonoProcessor, Processor};

/// Plays an imported signal a few points per tick, filtering as it goes.
///
/// When the cursor reaches the end of the signal the next tick starts over
/// from sample 0 with a fresh filter state.
#[derive(Debug, Clone)]
pub struct SignalPlayer {
    original: Signal,
    filtered: Vec<Sample>,
    transfer: TransferFunction,
    state: FilterState,
    points_per_tick: usize,
}

impl SignalPlayer {
    pub fn new(original: Signal, transfer: TransferFunction, points_per_tick: usize) -> Self {
        Self {
            filtered: Vec::with_capacity(original.len()),
            original,
            transfer,
            state: FilterState::new(),
            points_per_tick: points_per_tick.max(1),
        }
    }

    /// Advance by `points_per_tick` samples; returns the newly filtered chunk
    pub fn tick(&mut self) -> &[Sample] {
        if self.original.is_empty() {
            return &[];
        }

        if self.state.position() >= self.original.len() {
            log::debug!("Playback reached end of signal, restarting");
            self.restart();
        }

        let state = std::mem::take(&mut self.state);
        let (chunk, next) = apply_incremental(
            &self.transfer,
            self.original.samples(),
            state,
            self.points_per_tick,
        );
        self.state = next;

        let start = self.filtered.len();
        self.filtered.extend(chunk);
        &self.filtered[start..]
    }

    /// Rewind to sample 0
    pub fn restart(&mut self) {
        self.state.reset();
        self.filtered.clear();
    }

    /// Swap the filter; playback restarts from the beginning
    pub fn set_transfer_function(&mut self, transfer: TransferFunction) {
        self.transfer = transfer;
        self.restart();
    }

    /// Swap the signal (import); playback restarts from the beginning
    pub fn replace_signal(&mut self, original: Signal) {
        self.original = original;
        self.restart();
    }

    /// Filtration rate
    pub fn set_points_per_tick(&mut self, points: usize) {
        self.points_per_tick = points.max(1);
    }

    #[inline]
    pub fn points_per_tick(&self) -> usize {
        self.points_per_tick
    }

    /// Samples played so far
    #[inline]
    pub fn cursor(&self) -> usize {
        self.state.position()
    }

    /// Original samples up to the cursor
    pub fn played(&self) -> &[Sample] {
        &self.original.samples()[..self.cursor()]
    }

    /// Filtered samples up to the cursor
    pub fn filtered(&self) -> &[Sample] {
        &self.filtered
    }

    pub fn original(&self) -> &Signal {
        &self.original
    }

    pub fn transfer_function(&self) -> &TransferFunction {
        &self.transfer
    }
}

/// A signal captured one sample at a time and filtered as it grows
#[derive(Debug, Clone)]
pub struct LiveCapture {
    signal: Signal,
    filtered: Vec<Sample>,
    filter: RecursiveFilter,
}

impl LiveCapture {
    pub fn new(transfer: &TransferFunction) -> Self {
        Self {
            signal: Signal::new(),
            filtered: Vec::new(),
            filter: RecursiveFilter::new(transfer),
        }
    }

    /// Append a captured sample; returns its filtered value
    pub fn push(&mut self, sample: Sample) -> Sample {
        self.signal.push(sample);
        let y = self.filter.process_sample(sample);
        self.filtered.push(y);
        y
    }

    /// Swap the filter and refilter everything captured so far
    pub fn set_transfer_function(&mut self, transfer: &TransferFunction) {
        self.filter = RecursiveFilter::new(transfer);
        self.filtered = self.filter.process_slice(self.signal.samples());
    }

    pub fn clear(&mut self) {
        self.signal.clear();
        self.filtered.clear();
        self.filter.reset();
    }

    pub fn signal(&self) -> &Signal {
        &self.signal
    }

    pub fn filtered(&self) -> &[Sample] {
        &self.filtered
    }
}
