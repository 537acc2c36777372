//! First-order all-pass sections and their cascade
//!
//! A section is parameterised by one complex `a`: pole at `a`, zero at the
//! conjugate-reciprocal point `(1/|a|)·e^{i·arg(a)}`. The numerator carries a
//! gain of `|a|` so the section has unit magnitude on the whole unit circle
//! and only reshapes phase.
//!
//! When `|a| = 1` the zero lands on the pole. The pair cancels and the
//! section is the constant `|a|`.

use pz_core::{C_ONE, C_ZERO, Complex64, PzError, PzResult, parse_complex};

use crate::response::{FrequencyResponse, evaluate};
use crate::transfer::{TransferFunction, build};

/// The library shipped with the designer
pub const PREDEFINED_ALL_PASS: [Complex64; 9] = [
    Complex64::new(0.7, 0.0),
    Complex64::new(1.0, 2.0),
    Complex64::new(0.3, 0.2),
    Complex64::new(0.0, 1.5),
    Complex64::new(5.0, 1.0),
    Complex64::new(-0.9, 0.0),
    Complex64::new(1.2, 0.0),
    Complex64::new(3.0, 0.0),
    Complex64::new(0.2, 0.0),
];

/// `|a|` this close to 1 puts the zero on the pole
const UNIT_MODULUS_TOLERANCE: f64 = 1e-12;

/// One all-pass section
#[derive(Debug, Clone)]
pub struct AllPassSection {
    a: Complex64,
    zero: Complex64,
    transfer: TransferFunction,
}

impl AllPassSection {
    /// Build a section, rejecting `a = 0` and `a = 1`
    pub fn new(a: Complex64) -> PzResult<Self> {
        if a == C_ZERO {
            return Err(PzError::InvalidParameter("'a' can't be 0".to_string()));
        }
        if a == C_ONE {
            return Err(PzError::InvalidParameter("'a' can't be 1".to_string()));
        }
        if !(a.re.is_finite() && a.im.is_finite()) {
            return Err(PzError::InvalidParameter(format!("'a' must be finite, got {}", a)));
        }

        let zero = Complex64::from_polar(1.0 / a.norm(), a.arg());
        let transfer = if (a.norm() - 1.0).abs() <= UNIT_MODULUS_TOLERANCE {
            build(&[], &[], a.norm())
        } else {
            build(&[zero], &[a], a.norm())
        };

        Ok(Self { a, zero, transfer })
    }

    #[inline]
    pub fn a(&self) -> Complex64 {
        self.a
    }

    #[inline]
    pub fn pole(&self) -> Complex64 {
        self.a
    }

    #[inline]
    pub fn zero(&self) -> Complex64 {
        self.zero
    }

    #[inline]
    pub fn transfer_function(&self) -> &TransferFunction {
        &self.transfer
    }

    /// Response of this section alone; plot its unwrapped phase
    pub fn response(&self, n_points: usize) -> FrequencyResponse {
        evaluate(&self.transfer, n_points)
    }

    /// Display label, e.g. `a = 0.3+0.2i`
    pub fn label(&self) -> String {
        format!("a = {}", self.a)
    }
}

impl PartialEq for AllPassSection {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a
    }
}

/// Validate `a` against the sections already known and build the section
pub fn make_section(a: Complex64, existing: &[&AllPassSection]) -> PzResult<AllPassSection> {
    let section = AllPassSection::new(a)?;
    if existing.iter().any(|s| s.a == a) {
        return Err(PzError::DuplicateParameter(format!(
            "Filter already exists ({})",
            section.label()
        )));
    }
    Ok(section)
}

/// Parse a user-typed `a` (`0.3+0.2j`, `1.5j`, ...).
///
/// Malformed text is a validation failure here, not a file error.
pub fn parse_all_pass(text: &str) -> PzResult<Complex64> {
    parse_complex(text).map_err(|e| match e {
        PzError::Parse(msg) => PzError::InvalidParameter(msg),
        other => other,
    })
}

/// Running product of section transfer functions, seeded at `[1]/[1]`
pub fn cascade_transfer_function<'a, I>(sections: I) -> TransferFunction
where
    I: IntoIterator<Item = &'a AllPassSection>,
{
    sections
        .into_iter()
        .fold(TransferFunction::identity(), |acc, s| acc.cascade(&s.transfer))
}

/// Convolve a design with the chosen cascade
pub fn correct_phase(
    design: &TransferFunction,
    cascade: &FilterCascade,
) -> PzResult<TransferFunction> {
    if cascade.is_empty() {
        return Err(PzError::EmptyCascade);
    }
    Ok(design.cascade(&cascade.transfer_function()))
}

/// Ordered sections composed in series
#[derive(Debug, Clone, Default)]
pub struct FilterCascade {
    sections: Vec<AllPassSection>,
}

impl FilterCascade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, section: AllPassSection) {
        self.sections.push(section);
    }

    /// Remove the section with parameter `a`
    pub fn remove(&mut self, a: Complex64) -> Option<AllPassSection> {
        let idx = self.sections.iter().position(|s| s.a == a)?;
        Some(self.sections.remove(idx))
    }

    pub fn contains(&self, a: Complex64) -> bool {
        self.sections.iter().any(|s| s.a == a)
    }

    pub fn sections(&self) -> &[AllPassSection] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }

    pub fn transfer_function(&self) -> TransferFunction {
        cascade_transfer_function(&self.sections)
    }

    /// Response of the whole cascade; plot its unwrapped phase
    pub fn response(&self, n_points: usize) -> FrequencyResponse {
        evaluate(&self.transfer_function(), n_points)
    }

    /// Section zeros, for plotting on the z-plane
    pub fn zeros(&self) -> Vec<Complex64> {
        self.sections.iter().map(|s| s.zero).collect()
    }

    /// Section poles, for plotting on the z-plane
    pub fn poles(&self) -> Vec<Complex64> {
        self.sections.iter().map(|s| s.a).collect()
    }
}

/// Sections the user can pick from, and the ones picked for the cascade
#[derive(Debug, Clone, Default)]
pub struct AllPassLibrary {
    available: Vec<AllPassSection>,
    cascade: FilterCascade,
}

impl AllPassLibrary {
    /// Empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Library seeded with [`PREDEFINED_ALL_PASS`]
    pub fn with_predefined() -> Self {
        let available = PREDEFINED_ALL_PASS
            .iter()
            .filter_map(|&a| AllPassSection::new(a).ok())
            .collect();
        Self {
            available,
            cascade: FilterCascade::new(),
        }
    }

    fn known(&self) -> Vec<&AllPassSection> {
        self.available
            .iter()
            .chain(self.cascade.sections())
            .collect()
    }

    /// Validate and add a user section; it goes straight into the cascade
    pub fn add_custom(&mut self, a: Complex64) -> PzResult<&AllPassSection> {
        let section = make_section(a, &self.known())?;
        log::info!("Adding all-pass section {}", section.label());
        self.cascade.push(section);
        let last = self.cascade.len() - 1;
        Ok(&self.cascade.sections()[last])
    }

    /// [`add_custom`](Self::add_custom) from user text
    pub fn add_custom_str(&mut self, text: &str) -> PzResult<&AllPassSection> {
        let a = parse_all_pass(text)?;
        self.add_custom(a)
    }

    /// Move a section from the library into the cascade
    pub fn choose(&mut self, a: Complex64) -> bool {
        match self.available.iter().position(|s| s.a == a) {
            Some(idx) => {
                let section = self.available.remove(idx);
                log::debug!("Chose {}", section.label());
                self.cascade.push(section);
                true
            }
            None => false,
        }
    }

    /// Move a section from the cascade back to the library
    pub fn deselect(&mut self, a: Complex64) -> bool {
        match self.cascade.remove(a) {
            Some(section) => {
                log::debug!("Deselected {}", section.label());
                self.available.push(section);
                true
            }
            None => false,
        }
    }

    /// Put every chosen section back in the library
    pub fn deselect_all(&mut self) {
        let chosen = std::mem::take(&mut self.cascade);
        self.available.extend(chosen.sections);
    }

    pub fn contains(&self, a: Complex64) -> bool {
        self.available.iter().any(|s| s.a == a) || self.cascade.contains(a)
    }

    pub fn available(&self) -> &[AllPassSection] {
        &self.available
    }

    pub fn cascade(&self) -> &FilterCascade {
        &self.cascade
    }
}
