//! Recursive filtering using Transposed Direct Form II
//!
//! Generalises the biquad TDF-II structure to any order:
//!
//! ```text
//! y[n]   = b0·x[n] + s0
//! s_i    = b_{i+1}·x[n] - a_{i+1}·y[n] + s_{i+1}
//! s_last = b_N·x[n] - a_N·y[n]
//! ```
//!
//! with all coefficients divided by `a0`. Coefficients are complex because
//! roots placed off the real axis without their mirror give complex
//! polynomials; the output is the real part of `y[n]`.

use pz_core::{C_ONE, C_ZERO, Complex64, Sample};

use crate::transfer::TransferFunction;
use crate::{MonoProcessor, Processor};

/// State threaded between incremental calls.
///
/// Opaque to callers: pass back what the previous call returned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    delay: Vec<Complex64>,
    position: usize,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next input sample to be filtered
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn reset(&mut self) {
        self.delay.clear();
        self.position = 0;
    }
}

/// Arbitrary-order TDF-II filter
#[derive(Debug, Clone)]
pub struct RecursiveFilter {
    b: Vec<Complex64>,
    a: Vec<Complex64>,
    state: Vec<Complex64>,
}

impl RecursiveFilter {
    pub fn new(tf: &TransferFunction) -> Self {
        let n = tf.numerator().len().max(tf.denominator().len()).max(1);
        let a0 = tf.denominator().first().copied().unwrap_or(C_ONE);

        let mut b = vec![C_ZERO; n];
        let mut a = vec![C_ZERO; n];
        for (dst, &src) in b.iter_mut().zip(tf.numerator()) {
            *dst = src / a0;
        }
        for (dst, &src) in a.iter_mut().zip(tf.denominator()) {
            *dst = src / a0;
        }

        Self {
            b,
            a,
            state: vec![C_ZERO; n - 1],
        }
    }

    /// Filter order
    #[inline]
    pub fn order(&self) -> usize {
        self.state.len()
    }

    /// Restore a delay line; a line of the wrong length is replaced by zeros
    pub fn set_state(&mut self, delay: &[Complex64]) -> bool {
        if delay.len() == self.state.len() {
            self.state.copy_from_slice(delay);
            true
        } else {
            self.state.fill(C_ZERO);
            false
        }
    }

    #[inline]
    pub fn state(&self) -> &[Complex64] {
        &self.state
    }

    /// Filter one sample keeping the complex output
    #[inline(always)]
    pub fn process_complex(&mut self, input: Sample) -> Complex64 {
        let x = Complex64::new(input, 0.0);
        let y = self.b[0] * x + self.state.first().copied().unwrap_or(C_ZERO);

        let order = self.state.len();
        for i in 0..order {
            let next = if i + 1 < order { self.state[i + 1] } else { C_ZERO };
            self.state[i] = self.b[i + 1] * x - self.a[i + 1] * y + next;
        }

        y
    }

    /// Filter a slice into a new buffer
    pub fn process_slice(&mut self, input: &[Sample]) -> Vec<Sample> {
        input.iter().map(|&x| self.process_complex(x).re).collect()
    }
}

impl Processor for RecursiveFilter {
    fn reset(&mut self) {
        self.state.fill(C_ZERO);
    }
}

impl MonoProcessor for RecursiveFilter {
    #[inline(always)]
    fn process_sample(&mut self, input: Sample) -> Sample {
        self.process_complex(input).re
    }
}

/// Filter the whole buffer from a zeroed delay line
pub fn apply(tf: &TransferFunction, input: &[Sample]) -> Vec<Sample> {
    RecursiveFilter::new(tf).process_slice(input)
}

/// Filter the next `chunk_size` samples of `input`, starting at the state's
/// cursor.
///
/// Concatenating the chunks of successive calls gives the same samples as
/// [`apply`] on the whole input. A state recorded for a different filter
/// order restarts from a zeroed delay line at the same cursor.
pub fn apply_incremental(
    tf: &TransferFunction,
    input: &[Sample],
    state: FilterState,
    chunk_size: usize,
) -> (Vec<Sample>, FilterState) {
    let mut filter = RecursiveFilter::new(tf);
    let resumed = state.position > 0 || !state.delay.is_empty();
    if resumed && !filter.set_state(&state.delay) {
        log::warn!(
            "Filter order changed ({} -> {}), restarting delay line",
            state.delay.len(),
            filter.order()
        );
    }

    let start = state.position.min(input.len());
    let end = start.saturating_add(chunk_size).min(input.len());
    let output = filter.process_slice(&input[start..end]);

    let next = FilterState {
        delay: filter.state,
        position: end,
    };
    (output, next)
}
