//! Rational transfer functions built from zeros and poles
//!
//! Coefficients are stored in descending powers of z:
//! `[c0, c1, .., cn]` represents `c0·z^n + c1·z^(n-1) + .. + cn`.
//!
//! Expansion is the plain running product of `(z - r)` factors. Many closely
//! spaced roots make the coefficients ill-conditioned; no safeguard is applied.

use pz_core::{C_ONE, C_ZERO, Complex64, PzError, PzResult};

/// `H(z) = numerator(z) / denominator(z)`
///
/// Always holds a non-empty numerator and a denominator with a non-zero
/// leading coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    numerator: Vec<Complex64>,
    denominator: Vec<Complex64>,
}

impl TransferFunction {
    /// `H(z) = 1`
    pub fn identity() -> Self {
        Self {
            numerator: vec![C_ONE],
            denominator: vec![C_ONE],
        }
    }

    /// Build from raw coefficients.
    ///
    /// The numerator must be non-empty and the denominator must have a
    /// non-zero leading coefficient.
    pub fn new(numerator: Vec<Complex64>, denominator: Vec<Complex64>) -> PzResult<Self> {
        if numerator.is_empty() {
            return Err(PzError::InvalidParameter("numerator is empty".to_string()));
        }
        match denominator.first() {
            None => Err(PzError::InvalidParameter("denominator is empty".to_string())),
            Some(a0) if *a0 == C_ZERO => Err(PzError::InvalidParameter(
                "leading denominator coefficient is zero".to_string(),
            )),
            Some(_) => Ok(Self {
                numerator,
                denominator,
            }),
        }
    }

    /// Build from real coefficients
    pub fn from_real(numerator: &[f64], denominator: &[f64]) -> PzResult<Self> {
        Self::new(
            numerator.iter().map(|&c| Complex64::new(c, 0.0)).collect(),
            denominator.iter().map(|&c| Complex64::new(c, 0.0)).collect(),
        )
    }

    /// Expand zeros, poles and gain into coefficients
    pub fn from_roots(zeros: &[Complex64], poles: &[Complex64], gain: f64) -> Self {
        let numerator = poly_from_roots(zeros)
            .into_iter()
            .map(|c| c * gain)
            .collect();
        Self {
            numerator,
            denominator: poly_from_roots(poles),
        }
    }

    /// Series connection: numerators and denominators are convolved separately
    pub fn cascade(&self, other: &TransferFunction) -> TransferFunction {
        TransferFunction {
            numerator: convolve(&self.numerator, &other.numerator),
            denominator: convolve(&self.denominator, &other.denominator),
        }
    }

    /// Numerator coefficients, descending powers
    #[inline]
    pub fn numerator(&self) -> &[Complex64] {
        &self.numerator
    }

    /// Denominator coefficients, descending powers
    #[inline]
    pub fn denominator(&self) -> &[Complex64] {
        &self.denominator
    }

    /// Evaluate `H(z)` at a single point.
    ///
    /// A root shared by numerator and denominator at `z` is cancelled by
    /// differentiating both sides until one no longer vanishes. An
    /// uncancelled pole gives `+inf` on the real axis instead of NaN.
    pub fn eval(&self, z: Complex64) -> Complex64 {
        let num = polyval(&self.numerator, z);
        let den = polyval(&self.denominator, z);
        if den != C_ZERO {
            return num / den;
        }
        self.eval_at_pole(z, num)
    }

    #[cold]
    fn eval_at_pole(&self, z: Complex64, mut num: Complex64) -> Complex64 {
        let mut num_poly = self.numerator.clone();
        let mut den_poly = self.denominator.clone();
        let mut den = C_ZERO;

        while num == C_ZERO && den == C_ZERO && den_poly.len() > 1 {
            num_poly = derivative(&num_poly);
            den_poly = derivative(&den_poly);
            num = polyval(&num_poly, z);
            den = polyval(&den_poly, z);
        }

        if den == C_ZERO {
            Complex64::new(f64::INFINITY, 0.0)
        } else {
            num / den
        }
    }

    /// Filter order (`max(len) - 1`)
    pub fn order(&self) -> usize {
        self.numerator
            .len()
            .max(self.denominator.len())
            .saturating_sub(1)
    }

    pub fn is_identity(&self) -> bool {
        self.numerator == [C_ONE] && self.denominator == [C_ONE]
    }

    /// Real parts of the numerator
    pub fn numerator_re(&self) -> Vec<f64> {
        self.numerator.iter().map(|c| c.re).collect()
    }

    /// Real parts of the denominator
    pub fn denominator_re(&self) -> Vec<f64> {
        self.denominator.iter().map(|c| c.re).collect()
    }
}

impl Default for TransferFunction {
    fn default() -> Self {
        Self::identity()
    }
}

/// `build(zeros, poles, gain)`: numerator `gain·Π(z - zero)`, monic
/// denominator `Π(z - pole)`; empty lists give `[1]`
pub fn build(zeros: &[Complex64], poles: &[Complex64], gain: f64) -> TransferFunction {
    TransferFunction::from_roots(zeros, poles, gain)
}

/// Monic polynomial with the given roots
pub fn poly_from_roots(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = Vec::with_capacity(roots.len() + 1);
    coeffs.push(C_ONE);

    for &root in roots {
        // multiply by (z - root) in place
        coeffs.push(C_ZERO);
        for i in (1..coeffs.len()).rev() {
            let prev = coeffs[i - 1];
            coeffs[i] -= root * prev;
        }
    }

    coeffs
}

/// Polynomial product (full linear convolution)
pub fn convolve(a: &[Complex64], b: &[Complex64]) -> Vec<Complex64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut out = vec![C_ZERO; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// First derivative of descending-power coefficients
pub fn derivative(coeffs: &[Complex64]) -> Vec<Complex64> {
    let degree = coeffs.len().saturating_sub(1);
    coeffs[..degree]
        .iter()
        .enumerate()
        .map(|(k, &c)| c * (degree - k) as f64)
        .collect()
}

/// Horner evaluation of descending-power coefficients
#[inline]
pub fn polyval(coeffs: &[Complex64], z: Complex64) -> Complex64 {
    coeffs.iter().fold(C_ZERO, |acc, &c| acc * z + c)
}
