//! Pole/zero pipeline integration tests
//!
//! Verifies the full path used by the designer:
//! - RootSet -> transfer function -> frequency response
//! - All-pass cascade and phase correction
//! - Whole-buffer vs incremental filtering

use approx::assert_abs_diff_eq;
use pz_core::{Complex64, DEFAULT_RESPONSE_POINTS, MAGNITUDE_CEILING_DB, RootKind};
use pz_dsp::{
    AllPassLibrary, AllPassSection, FilterState, RootSet, TransferFunction, apply,
    apply_incremental, build, cascade_transfer_function, correct_phase, evaluate,
};
use std::f64::consts::PI;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// Generate test sine wave at a normalized frequency (cycles/sample)
fn generate_sine(samples: usize, freq: f64) -> Vec<f64> {
    (0..samples)
        .map(|i| (2.0 * PI * freq * i as f64).sin())
        .collect()
}

/// Calculate RMS of signal
fn rms(signal: &[f64]) -> f64 {
    let sum: f64 = signal.iter().map(|x| x * x).sum();
    (sum / signal.len() as f64).sqrt()
}

// ═══════════════════════════════════════════════════════════════════════════════
// DESIGN -> RESPONSE
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_empty_design_is_identity() {
    let roots = RootSet::new();
    let tf = build(&roots.zeros(), &roots.poles(), 1.0);
    assert!(tf.is_identity());

    let fr = evaluate(&tf, DEFAULT_RESPONSE_POINTS);
    assert_eq!(fr.len(), DEFAULT_RESPONSE_POINTS);
    assert!(fr.magnitude_db().iter().all(|db| db.abs() < 1e-12));
}

#[test]
fn test_notch_from_conjugate_zeros() {
    // zeros on the unit circle at ±π/4, poles just inside
    let mut roots = RootSet::with_conjugate_mode(true);
    roots.add_root(Complex64::from_polar(1.0, PI / 4.0), RootKind::Zero);
    roots.add_root(Complex64::from_polar(0.9, PI / 4.0), RootKind::Pole);

    let tf = build(
        &roots.with_mirrors(RootKind::Zero),
        &roots.with_mirrors(RootKind::Pole),
        1.0,
    );
    // conjugate pairs collapse to real coefficients
    assert!(tf.numerator().iter().all(|c| c.im.abs() < 1e-12));
    assert!(tf.denominator().iter().all(|c| c.im.abs() < 1e-12));

    // 1000 points: ω = π/4 is grid point 250
    let fr = evaluate(&tf, 1000);
    let mag = fr.magnitude_db();
    assert!(mag[250] < -100.0);
    assert!(mag[0].abs() < 3.0);
}

#[test]
fn test_notch_attenuates_signal() {
    let mut roots = RootSet::with_conjugate_mode(true);
    roots.add_root(Complex64::from_polar(1.0, PI / 4.0), RootKind::Zero);
    roots.add_root(Complex64::from_polar(0.95, PI / 4.0), RootKind::Pole);
    let tf = build(
        &roots.with_mirrors(RootKind::Zero),
        &roots.with_mirrors(RootKind::Pole),
        1.0,
    );

    // π/4 rad/sample = 1/8 cycles/sample
    let input = generate_sine(4000, 0.125);
    let output = apply(&tf, &input);
    let tail = &output[2000..];
    assert!(output.iter().all(|x| x.is_finite()));
    assert!(rms(tail) < 0.01 * rms(&input));
}

#[test]
fn test_pole_on_unit_circle_reads_as_ceiling() {
    let mut roots = RootSet::new();
    roots.add_root(c(1.0, 0.0), RootKind::Pole);
    let tf = build(&roots.zeros(), &roots.poles(), 1.0);

    let db = evaluate(&tf, 8).magnitude_db();
    assert_eq!(db[0], MAGNITUDE_CEILING_DB);
    // |1 / (e^{iω} - 1)| = 1 / (2 sin(ω/2)) away from ω = 0
    let w = PI / 8.0;
    assert_abs_diff_eq!(db[1], -20.0 * (2.0 * (w / 2.0).sin()).log10(), epsilon = 1e-9);
}

#[test]
fn test_unit_modulus_all_pass_is_flat() {
    let section = AllPassSection::new(c(0.0, 1.0)).unwrap();
    let fr = section.response(8);
    for m in fr.magnitude() {
        assert_abs_diff_eq!(m, 1.0, epsilon = 1e-9);
    }
    assert!(fr.magnitude_db().iter().all(|db| db.abs() < 1e-9));
}

// ═══════════════════════════════════════════════════════════════════════════════
// ALL-PASS CASCADE
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_library_cascade_is_all_pass() {
    let mut library = AllPassLibrary::with_predefined();
    for a in [c(0.7, 0.0), c(0.3, 0.2), c(-0.9, 0.0)] {
        assert!(library.choose(a));
    }

    let fr = library.cascade().response(512);
    for m in fr.magnitude() {
        assert_abs_diff_eq!(m, 1.0, epsilon = 1e-9);
    }

    // unwrapped phase has no 2π jumps
    let phase = fr.phase_unwrapped();
    for pair in phase.windows(2) {
        assert!((pair[1] - pair[0]).abs() < PI);
    }
}

#[test]
fn test_cascade_order_independent() {
    let sections: Vec<AllPassSection> = [c(0.7, 0.0), c(1.0, 2.0), c(0.0, 1.5)]
        .into_iter()
        .map(|a| AllPassSection::new(a).unwrap())
        .collect();

    let forward = cascade_transfer_function(&sections);
    let backward = cascade_transfer_function(sections.iter().rev());

    for k in 0..100 {
        let z = Complex64::from_polar(1.0, PI * k as f64 / 100.0);
        assert!((forward.eval(z) - backward.eval(z)).norm() < 1e-9);
    }
}

#[test]
fn test_phase_correction_preserves_magnitude() {
    let design = build(&[c(0.8, 0.3), c(0.8, -0.3)], &[c(0.5, 0.0)], 1.0);
    let mut library = AllPassLibrary::with_predefined();
    library.choose(c(0.2, 0.0));
    library.add_custom(c(-0.4, 0.4)).unwrap();

    let corrected = correct_phase(&design, library.cascade()).unwrap();
    let before = evaluate(&design, 256);
    let after = evaluate(&corrected, 256);
    for (b, a) in before.magnitude().iter().zip(after.magnitude()) {
        assert_abs_diff_eq!(*b, a, epsilon = 1e-9);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FILTERING
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_incremental_chunks_of_ten() {
    let tf = TransferFunction::from_real(&[1.0, -0.5], &[1.0, 0.3]).unwrap();
    let input = generate_sine(100, 0.03);
    let whole = apply(&tf, &input);

    let mut state = FilterState::new();
    let mut joined = Vec::with_capacity(100);
    while state.position() < input.len() {
        let (chunk, next) = apply_incremental(&tf, &input, state, 10);
        joined.extend(chunk);
        state = next;
    }

    assert_eq!(joined.len(), whole.len());
    for (w, j) in whole.iter().zip(&joined) {
        assert_abs_diff_eq!(*w, *j, epsilon = 1e-12);
    }
}

#[test]
fn test_incremental_high_order_with_uneven_chunks() {
    let mut roots = RootSet::with_conjugate_mode(true);
    roots.add_root(c(0.6, 0.6), RootKind::Zero);
    roots.add_root(c(-0.3, 0.8), RootKind::Zero);
    roots.add_root(c(0.7, 0.2), RootKind::Pole);
    roots.add_root(c(0.1, -0.85), RootKind::Pole);
    let tf = build(
        &roots.with_mirrors(RootKind::Zero),
        &roots.with_mirrors(RootKind::Pole),
        0.5,
    );

    let input = generate_sine(997, 0.011);
    let whole = apply(&tf, &input);

    let mut state = FilterState::new();
    let mut joined = Vec::new();
    for size in [1, 13, 64, 7, 300].into_iter().cycle() {
        if state.position() >= input.len() {
            break;
        }
        let (chunk, next) = apply_incremental(&tf, &input, state, size);
        joined.extend(chunk);
        state = next;
    }

    for (w, j) in whole.iter().zip(&joined) {
        assert_abs_diff_eq!(*w, *j, epsilon = 1e-9);
    }
}

#[test]
fn test_unmirrored_roots_take_real_part() {
    let mut roots = RootSet::new();
    roots.add_root(c(0.2, 0.5), RootKind::Zero);
    let tf = build(&roots.zeros(), &roots.poles(), 1.0);

    let output = apply(&tf, &[1.0, 0.0, 0.0]);
    assert_abs_diff_eq!(output[0], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(output[1], -0.2, epsilon = 1e-12);
    assert_abs_diff_eq!(output[2], 0.0, epsilon = 1e-12);
}
