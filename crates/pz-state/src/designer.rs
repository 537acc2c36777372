//! Designer session
//!
//! Owns the root set, the all-pass library and the configuration. The host
//! mutates the design through this type and then asks for whatever it needs
//! to redraw: transfer function, response, filtered signal.

use pz_core::{Complex64, PzError, PzResult, RootKind, Sample, Signal};
use pz_dsp::{
    AllPassLibrary, AllPassSection, FrequencyResponse, LiveCapture, PREDEFINED_ALL_PASS, RootId,
    RootSet, SignalPlayer, TransferFunction, apply, build, correct_phase, evaluate,
};
use std::path::Path;

use crate::config::DesignerConfig;
use crate::filter_file::FilterFile;

#[derive(Debug, Clone)]
pub struct FilterDesigner {
    roots: RootSet,
    library: AllPassLibrary,
    config: DesignerConfig,
    phase_correction: bool,
}

impl Default for FilterDesigner {
    fn default() -> Self {
        Self {
            roots: RootSet::new(),
            library: AllPassLibrary::with_predefined(),
            config: DesignerConfig::default(),
            phase_correction: false,
        }
    }
}

impl FilterDesigner {
    pub fn new(config: DesignerConfig) -> PzResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    /// Replace the configuration; an invalid one leaves the session untouched
    pub fn set_config(&mut self, config: DesignerConfig) -> PzResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn roots(&self) -> &RootSet {
        &self.roots
    }

    pub fn library(&self) -> &AllPassLibrary {
        &self.library
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ROOTS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn add_root(&mut self, position: Complex64, kind: RootKind) -> RootId {
        self.roots.add_root(position, kind)
    }

    pub fn move_root(&mut self, id: RootId, position: Complex64) -> bool {
        self.roots.move_root(id, position)
    }

    pub fn remove_root(&mut self, id: RootId) -> bool {
        self.roots.remove(id)
    }

    /// Remove the root under a click, using the configured tolerance
    pub fn remove_nearest(&mut self, clicked: Complex64) -> Option<RootId> {
        self.roots.remove_nearest(clicked, self.config.removal_tolerance)
    }

    pub fn remove_all(&mut self, kind: RootKind) {
        self.roots.remove_all(kind);
    }

    /// Clear every zero and pole
    pub fn reset(&mut self) {
        self.roots.clear();
        log::info!("Design reset");
    }

    pub fn set_conjugate_mode(&mut self, enabled: bool) {
        self.roots.set_conjugate_mode(enabled);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // RESPONSE
    // ═══════════════════════════════════════════════════════════════════════

    fn design_roots(&self, kind: RootKind) -> Vec<Complex64> {
        if self.config.conjugates_in_response {
            self.roots.with_mirrors(kind)
        } else {
            self.roots.positions(kind)
        }
    }

    /// Transfer function of the placed roots, without phase correction
    pub fn transfer_function(&self) -> TransferFunction {
        build(
            &self.design_roots(RootKind::Zero),
            &self.design_roots(RootKind::Pole),
            self.config.gain,
        )
    }

    pub fn response(&self) -> FrequencyResponse {
        evaluate(&self.transfer_function(), self.config.n_points)
    }

    /// Magnitude of [`response`](Self::response) in dB, floored per config
    pub fn magnitude_db(&self) -> Vec<f64> {
        self.response().magnitude_db_floored(self.config.magnitude_floor_db)
    }

    /// Response of the chosen all-pass cascade
    pub fn cascade_response(&self) -> FrequencyResponse {
        self.library.cascade().response(self.config.n_points)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ALL-PASS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn add_all_pass(&mut self, a: Complex64) -> PzResult<&AllPassSection> {
        self.library.add_custom(a)
    }

    pub fn add_all_pass_str(&mut self, text: &str) -> PzResult<&AllPassSection> {
        self.library.add_custom_str(text)
    }

    pub fn choose_all_pass(&mut self, a: Complex64) -> bool {
        self.library.choose(a)
    }

    pub fn deselect_all_pass(&mut self, a: Complex64) -> bool {
        self.library.deselect(a)
    }

    /// Turn phase correction on or off.
    ///
    /// Turning it on with nothing chosen fails with `EmptyCascade` and leaves
    /// it off.
    pub fn set_phase_correction(&mut self, enabled: bool) -> PzResult<()> {
        if enabled && self.library.cascade().is_empty() {
            return Err(PzError::EmptyCascade);
        }
        self.phase_correction = enabled;
        log::debug!("Phase correction = {}", enabled);
        Ok(())
    }

    pub fn phase_correction(&self) -> bool {
        self.phase_correction
    }

    /// Design convolved with the chosen cascade
    pub fn correct_phase(&self) -> PzResult<TransferFunction> {
        correct_phase(&self.transfer_function(), self.library.cascade())
    }

    fn correction_active(&self) -> bool {
        self.phase_correction && !self.library.cascade().is_empty()
    }

    /// The filter applied to signals: corrected when phase correction is on
    pub fn active_transfer_function(&self) -> TransferFunction {
        let design = self.transfer_function();
        if self.correction_active() {
            design.cascade(&self.library.cascade().transfer_function())
        } else {
            design
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SIGNALS
    // ═══════════════════════════════════════════════════════════════════════

    fn require_filter(&self) -> PzResult<()> {
        if self.roots.is_empty() && !self.correction_active() {
            return Err(PzError::EmptyDesign);
        }
        Ok(())
    }

    /// Filter a whole signal with the active filter
    pub fn apply(&self, signal: &[Sample]) -> PzResult<Vec<Sample>> {
        self.require_filter()?;
        Ok(apply(&self.active_transfer_function(), signal))
    }

    /// Player for an imported signal, at the configured filtration rate
    pub fn start_playback(&self, signal: Signal) -> PzResult<SignalPlayer> {
        self.require_filter()?;
        Ok(SignalPlayer::new(
            signal,
            self.active_transfer_function(),
            self.config.points_per_tick,
        ))
    }

    /// Capture filtered with the active filter; an empty design passes
    /// samples through unchanged
    pub fn live_capture(&self) -> LiveCapture {
        LiveCapture::new(&self.active_transfer_function())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // PERSISTENCE
    // ═══════════════════════════════════════════════════════════════════════

    /// Snapshot of the design for the file codec
    pub fn export_filter(&self) -> PzResult<FilterFile> {
        let cascade = self.library.cascade();
        if self.roots.is_empty() && cascade.is_empty() {
            return Err(PzError::EmptyDesign);
        }
        Ok(FilterFile {
            zeros: self.roots.zeros(),
            poles: self.roots.poles(),
            allpass_zeros: cascade.zeros(),
            allpass_poles: cascade.poles(),
        })
    }

    pub fn export_filter_to<P: AsRef<Path>>(&self, path: P) -> PzResult<()> {
        self.export_filter()?.write(path)
    }

    /// Replace the design with the contents of a file.
    ///
    /// Sections are rebuilt from the all-pass poles. Predefined sections are
    /// chosen from the library; others are added as custom sections. Nothing
    /// changes if any section is invalid.
    pub fn import_filter(&mut self, file: &FilterFile) -> PzResult<()> {
        if file.allpass_zeros.len() != file.allpass_poles.len() {
            log::warn!(
                "Design file has {} all-pass zeros for {} poles; rebuilding from poles",
                file.allpass_zeros.len(),
                file.allpass_poles.len()
            );
        }

        let mut library = AllPassLibrary::with_predefined();
        for &a in &file.allpass_poles {
            if PREDEFINED_ALL_PASS.contains(&a) && library.choose(a) {
                continue;
            }
            library.add_custom(a)?;
        }

        let mut roots = RootSet::with_conjugate_mode(self.roots.conjugate_mode());
        for &z in &file.zeros {
            roots.add_root(z, RootKind::Zero);
        }
        for &p in &file.poles {
            roots.add_root(p, RootKind::Pole);
        }

        self.roots = roots;
        self.library = library;
        if self.library.cascade().is_empty() {
            self.phase_correction = false;
        }
        log::info!(
            "Imported design: {} zeros, {} poles, {} all-pass sections",
            file.zeros.len(),
            file.poles.len(),
            self.library.cascade().len()
        );
        Ok(())
    }

    pub fn import_filter_from<P: AsRef<Path>>(&mut self, path: P) -> PzResult<()> {
        let file = FilterFile::read(path)?;
        self.import_filter(&file)
    }
}
