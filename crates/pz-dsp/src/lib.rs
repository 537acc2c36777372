//! pz-dsp: numeric core of the pole/zero filter designer
//!
//! Everything here is synchronous and caller-owned: mutate a design, then ask
//! for a recompute.
//!
//! ## Modules
//! - `roots` - zeros/poles with conjugate mirroring and stable handles
//! - `transfer` - polynomial expansion of roots into a transfer function
//! - `response` - frequency response on a uniform grid, dB and phase
//! - `allpass` - all-pass sections, cascades, the section library
//! - `lfilter` - TDF-II recursive filtering, whole-buffer and incremental
//! - `playback` - tick-driven playback and live capture

pub mod allpass;
pub mod lfilter;
pub mod playback;
pub mod response;
pub mod roots;
pub mod transfer;

pub use allpass::{
    AllPassLibrary, AllPassSection, FilterCascade, PREDEFINED_ALL_PASS, cascade_transfer_function,
    correct_phase, make_section, parse_all_pass,
};
pub use lfilter::{FilterState, RecursiveFilter, apply, apply_incremental};
pub use playback::{LiveCapture, SignalPlayer};
pub use response::{
    FrequencyResponse, evaluate, magnitude_db, phase_radians, phase_unwrapped, unwrap_phase,
};
pub use roots::{Root, RootId, RootSet};
pub use transfer::{TransferFunction, build, convolve, derivative, poly_from_roots, polyval};

use pz_core::Sample;

/// Trait for all sample processors
pub trait Processor: Send + Sync {
    /// Reset processor state
    fn reset(&mut self);

    /// Get latency in samples
    fn latency(&self) -> usize {
        0
    }
}

/// Mono processor trait
pub trait MonoProcessor: Processor {
    /// Process a single sample
    fn process_sample(&mut self, input: Sample) -> Sample;

    /// Process a block of samples in place
    fn process_block(&mut self, buffer: &mut [Sample]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }
}
