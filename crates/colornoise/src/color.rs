//! Named noise colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NoiseError;

/// Conventional names for common spectral exponents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseColor {
    /// White noise - equal power at all frequencies (β = 0).
    White,
    /// Pink noise - 1/f spectrum, equal power per octave (β = 1).
    Pink,
    /// Brown/Brownian noise - 1/f² spectrum (β = 2).
    Brown,
    /// Blue noise - power rising with frequency (β = -1).
    Blue,
    /// Violet noise - f² spectrum (β = -2).
    Violet,
}

impl NoiseColor {
    /// All colors, in order of decreasing low-frequency weight.
    pub const ALL: [NoiseColor; 5] = [
        NoiseColor::Brown,
        NoiseColor::Pink,
        NoiseColor::White,
        NoiseColor::Blue,
        NoiseColor::Violet,
    ];

    /// The exponent β in S(f) ∝ f^(-β).
    pub fn exponent(self) -> f64 {
        match self {
            NoiseColor::White => 0.0,
            NoiseColor::Pink => 1.0,
            NoiseColor::Brown => 2.0,
            NoiseColor::Blue => -1.0,
            NoiseColor::Violet => -2.0,
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            NoiseColor::White => "white",
            NoiseColor::Pink => "pink",
            NoiseColor::Brown => "brown",
            NoiseColor::Blue => "blue",
            NoiseColor::Violet => "violet",
        }
    }
}

impl fmt::Display for NoiseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoiseColor {
    type Err = NoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" => Ok(NoiseColor::White),
            "pink" | "flicker" => Ok(NoiseColor::Pink),
            "brown" | "brownian" | "red" => Ok(NoiseColor::Brown),
            "blue" => Ok(NoiseColor::Blue),
            "violet" | "purple" => Ok(NoiseColor::Violet),
            other => Err(NoiseError::invalid_param(
                "color",
                format!(
                    "unknown noise color '{}', expected one of white, pink, brown, blue, violet",
                    other
                ),
            )),
        }
    }
}
