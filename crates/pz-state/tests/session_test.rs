//! Designer session integration tests
//!
//! Drives a FilterDesigner the way a host would:
//! - place roots, read back the response
//! - export/import through files
//! - play an imported signal

use approx::assert_abs_diff_eq;
use pz_core::{Complex64, PzError, RootKind, Signal};
use pz_dsp::apply;
use pz_state::{DesignerConfig, FilterDesigner, FilterFile, read_signal, write_signal};
use tempfile::tempdir;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

// ═══════════════════════════════════════════════════════════════════════════════
// DESIGN FILES
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_export_import_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("design.csv");

    let mut designer = FilterDesigner::default();
    designer.add_root(c(0.3, 0.4), RootKind::Zero);
    designer.add_root(c(0.1, -0.2), RootKind::Pole);
    designer.export_filter_to(&path).unwrap();

    let mut restored = FilterDesigner::default();
    restored.import_filter_from(&path).unwrap();
    assert_eq!(restored.roots().zeros(), vec![c(0.3, 0.4)]);
    assert_eq!(restored.roots().poles(), vec![c(0.1, -0.2)]);
    assert_eq!(restored.transfer_function(), designer.transfer_function());
}

#[test]
fn test_round_trip_with_cascade_and_mirrors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("design.csv");

    let mut designer = FilterDesigner::default();
    designer.set_conjugate_mode(true);
    designer.add_root(c(0.6, 0.5), RootKind::Zero);
    designer.add_root(c(-0.2, 0.3), RootKind::Pole);
    assert!(designer.choose_all_pass(c(1.0, 2.0)));
    designer.add_all_pass_str("0.1-0.4j").unwrap();
    designer.export_filter_to(&path).unwrap();

    // mirrors are recomputed from the importing session's mode
    let mut restored = FilterDesigner::default();
    restored.set_conjugate_mode(true);
    restored.import_filter_from(&path).unwrap();

    assert_eq!(restored.roots().len(), 4);
    assert_eq!(restored.roots().mirrors(RootKind::Zero), vec![c(0.6, -0.5)]);
    assert_eq!(
        restored.library().cascade().poles(),
        designer.library().cascade().poles()
    );
    for (a, b) in restored
        .library()
        .cascade()
        .zeros()
        .iter()
        .zip(designer.library().cascade().zeros())
    {
        assert!((a - b).norm() < 1e-12);
    }
}

#[test]
fn test_import_rejects_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(&path, ",x,y\nzero,0.1,oops\n").unwrap();

    let mut designer = FilterDesigner::default();
    designer.add_root(c(0.5, 0.5), RootKind::Pole);
    assert!(matches!(
        designer.import_filter_from(&path),
        Err(PzError::Parse(_))
    ));
    assert_eq!(designer.roots().poles(), vec![c(0.5, 0.5)]);

    assert!(matches!(
        designer.import_filter_from(dir.path().join("missing.csv")),
        Err(PzError::Io(_))
    ));
}

#[test]
fn test_file_written_by_other_tools() {
    let text = ",x,y\nzero,0.3,0.4\n,,\npole,0.1,-0.2\n,,\nallpass zero,2,0\nallpass pole,0.5,0\n";
    let file = FilterFile::parse(text).unwrap();

    let mut designer = FilterDesigner::default();
    designer.import_filter(&file).unwrap();
    assert_eq!(designer.library().cascade().poles(), vec![c(0.5, 0.0)]);
    assert_abs_diff_eq!(designer.library().cascade().zeros()[0].re, 2.0, epsilon = 1e-12);
}

// ═══════════════════════════════════════════════════════════════════════════════
// SIGNALS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_filter_imported_signal() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("signal.csv");
    let output_path = dir.path().join("filtered.csv");

    let samples: Vec<f64> = (0..200).map(|i| ((i % 17) as f64 - 8.0) / 8.0).collect();
    write_signal(&input_path, &samples).unwrap();
    let signal = read_signal(&input_path).unwrap();
    assert_eq!(signal.samples(), samples.as_slice());

    let mut designer = FilterDesigner::default();
    designer.add_root(c(0.5, 0.0), RootKind::Zero);
    designer.add_root(c(-0.3, 0.0), RootKind::Pole);

    let filtered = designer.apply(signal.samples()).unwrap();
    write_signal(&output_path, &filtered).unwrap();
    let reread = read_signal(&output_path).unwrap();
    assert_eq!(reread.samples(), filtered.as_slice());
}

#[test]
fn test_playback_matches_apply() {
    let config = DesignerConfig::default().with_points_per_tick(10);
    let mut designer = FilterDesigner::new(config).unwrap();
    designer.add_root(c(0.5, 0.0), RootKind::Zero);
    designer.add_root(c(-0.3, 0.0), RootKind::Pole);

    let samples: Vec<f64> = (0..100).map(|i| (i as f64 * 0.2).sin()).collect();
    let expected = designer.apply(&samples).unwrap();

    let mut player = designer.start_playback(Signal::from(samples)).unwrap();
    for _ in 0..10 {
        assert_eq!(player.tick().len(), 10);
    }
    for (e, g) in expected.iter().zip(player.filtered()) {
        assert_abs_diff_eq!(*e, *g, epsilon = 1e-12);
    }

    // next tick wraps to the start
    player.tick();
    assert_eq!(player.cursor(), 10);
}

#[test]
fn test_phase_corrected_signal() {
    let mut designer = FilterDesigner::default();
    designer.add_root(c(0.4, 0.3), RootKind::Zero);
    designer.add_all_pass(c(0.5, 0.0)).unwrap();
    designer.set_phase_correction(true).unwrap();

    let samples: Vec<f64> = (0..64).map(|i| if i == 0 { 1.0 } else { 0.0 }).collect();
    let corrected = designer.correct_phase().unwrap();
    let expected = apply(&corrected, &samples);
    assert_eq!(designer.apply(&samples).unwrap(), expected);
}

#[test]
fn test_live_capture_follows_design() {
    let mut designer = FilterDesigner::default();
    let mut capture = designer.live_capture();
    assert_eq!(capture.push(0.75), 0.75);

    designer.add_root(c(1.0, 0.0), RootKind::Zero);
    capture.set_transfer_function(&designer.active_transfer_function());
    // y[n] = x[n] - x[n-1]
    assert_abs_diff_eq!(capture.push(0.25), -0.5, epsilon = 1e-12);
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONFIG
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_config_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("designer.json");

    let config = DesignerConfig::interactive().with_removal_tolerance(0.05);
    config.save(&path).unwrap();
    let loaded = DesignerConfig::load(&path).unwrap();
    assert_eq!(loaded, config);

    let designer = FilterDesigner::new(loaded).unwrap();
    assert_eq!(designer.response().len(), 1024);
}
