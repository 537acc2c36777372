//! Design file codec
//!
//! ```text
//! ,x,y
//! zero,0.3,0.4
//!
//! pole,0.1,-0.2
//!
//! allpass_zero,2,0
//!
//! allpass_pole,0.5,0
//! ```
//!
//! Groups are separated by a blank row and empty groups are left out.

use pz_core::{Complex64, PzError, PzResult};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const HEADER: &str = ",x,y";

/// Row role in a design file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Zero,
    Pole,
    AllPassZero,
    AllPassPole,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Pole => "pole",
            Self::AllPassZero => "allpass_zero",
            Self::AllPassPole => "allpass_pole",
        }
    }

    /// Accepts the written labels plus the spaced `allpass zero` spelling
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "zero" => Some(Self::Zero),
            "pole" => Some(Self::Pole),
            "allpass_zero" | "allpass zero" => Some(Self::AllPassZero),
            "allpass_pole" | "allpass pole" => Some(Self::AllPassPole),
            _ => None,
        }
    }
}

/// Positions stored in a design file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterFile {
    pub zeros: Vec<Complex64>,
    pub poles: Vec<Complex64>,
    pub allpass_zeros: Vec<Complex64>,
    pub allpass_poles: Vec<Complex64>,
}

impl FilterFile {
    pub fn is_empty(&self) -> bool {
        self.zeros.is_empty()
            && self.poles.is_empty()
            && self.allpass_zeros.is_empty()
            && self.allpass_poles.is_empty()
    }

    fn group(&self, role: Role) -> &[Complex64] {
        match role {
            Role::Zero => &self.zeros,
            Role::Pole => &self.poles,
            Role::AllPassZero => &self.allpass_zeros,
            Role::AllPassPole => &self.allpass_poles,
        }
    }

    fn group_mut(&mut self, role: Role) -> &mut Vec<Complex64> {
        match role {
            Role::Zero => &mut self.zeros,
            Role::Pole => &mut self.poles,
            Role::AllPassZero => &mut self.allpass_zeros,
            Role::AllPassPole => &mut self.allpass_poles,
        }
    }

    pub fn to_csv_string(&self) -> String {
        let mut out = String::from(HEADER);
        out.push('\n');

        let mut first = true;
        for role in [Role::Zero, Role::Pole, Role::AllPassZero, Role::AllPassPole] {
            let rows = self.group(role);
            if rows.is_empty() {
                continue;
            }
            if !first {
                out.push('\n');
            }
            first = false;
            for p in rows {
                // infallible for String
                let _ = writeln!(out, "{},{},{}", role.label(), p.re, p.im);
            }
        }
        out
    }

    pub fn parse(text: &str) -> PzResult<Self> {
        let mut file = Self::default();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.split(',').all(|f| f.trim().is_empty()) {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields[0].is_empty() {
                // header
                continue;
            }
            if fields.len() < 3 {
                return Err(PzError::Parse(format!(
                    "line {}: expected role,x,y but got '{}'",
                    idx + 1,
                    line
                )));
            }

            let role = Role::from_label(fields[0]).ok_or_else(|| {
                PzError::Parse(format!("line {}: unknown role '{}'", idx + 1, fields[0]))
            })?;
            let x = parse_coordinate(fields[1], idx)?;
            let y = parse_coordinate(fields[2], idx)?;
            file.group_mut(role).push(Complex64::new(x, y));
        }

        Ok(file)
    }

    pub fn read<P: AsRef<Path>>(path: P) -> PzResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let file = Self::parse(&text)?;
        log::info!(
            "Imported design from {:?}: {} zeros, {} poles, {} all-pass sections",
            path.as_ref(),
            file.zeros.len(),
            file.poles.len(),
            file.allpass_poles.len()
        );
        Ok(file)
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> PzResult<()> {
        fs::write(path.as_ref(), self.to_csv_string())?;
        log::info!("Exported design to {:?}", path.as_ref());
        Ok(())
    }
}

fn parse_coordinate(field: &str, idx: usize) -> PzResult<f64> {
    let value: f64 = field.parse().map_err(|_| {
        PzError::Parse(format!("line {}: '{}' is not a number", idx + 1, field))
    })?;
    if !value.is_finite() {
        return Err(PzError::Parse(format!(
            "line {}: '{}' is not finite",
            idx + 1,
            field
        )));
    }
    Ok(value)
}
