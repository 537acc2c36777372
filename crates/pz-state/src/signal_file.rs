//! Signal file codec: one sample per row, first column

use pz_core::{PzError, PzResult, Sample, Signal};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Parse a signal.
///
/// Leading rows whose first field is not a number (headers) are skipped.
/// Once samples have started, a non-numeric row is an error. Blank rows are
/// ignored anywhere.
pub fn parse_signal(text: &str) -> PzResult<Signal> {
    let mut samples: Vec<Sample> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let first = line.split(',').next().unwrap_or("").trim();
        if first.is_empty() {
            continue;
        }

        match first.parse::<Sample>() {
            Ok(value) if value.is_finite() => samples.push(value),
            _ if samples.is_empty() => {
                log::debug!("Skipping signal header row {}: '{}'", idx + 1, line);
            }
            _ => {
                return Err(PzError::Parse(format!(
                    "line {}: '{}' is not a sample",
                    idx + 1,
                    first
                )));
            }
        }
    }

    Ok(Signal::from(samples))
}

pub fn signal_to_csv_string(signal: &[Sample]) -> String {
    let mut out = String::with_capacity(signal.len() * 8);
    for s in signal {
        let _ = writeln!(out, "{}", s);
    }
    out
}

pub fn read_signal<P: AsRef<Path>>(path: P) -> PzResult<Signal> {
    let text = fs::read_to_string(path.as_ref())?;
    let signal = parse_signal(&text)?;
    log::info!("Imported {} samples from {:?}", signal.len(), path.as_ref());
    Ok(signal)
}

pub fn write_signal<P: AsRef<Path>>(path: P, signal: &[Sample]) -> PzResult<()> {
    fs::write(path.as_ref(), signal_to_csv_string(signal))?;
    log::info!("Exported {} samples to {:?}", signal.len(), path.as_ref());
    Ok(())
}
