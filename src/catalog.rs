//! The fixed menu of functions the visualizer offers
//!
//! Free-form expressions are never accepted: every function the engine
//! renders is one of these entries.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grouping used by the "available functions" help listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Polynomial,
    Transcendental,
}

/// One entry of the function menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum FunctionChoice {
    #[default]
    Square,
    Cube,
    Sine,
    Cosine,
    Exponential,
    NaturalLog,
    SquareRoot,
    Reciprocal,
    CubicMinusLinear,
    ShiftedSquare,
    Linear,
    Quartic,
}

impl FunctionChoice {
    /// Menu order
    pub const ALL: [FunctionChoice; 12] = [
        FunctionChoice::Square,
        FunctionChoice::Cube,
        FunctionChoice::Sine,
        FunctionChoice::Cosine,
        FunctionChoice::Exponential,
        FunctionChoice::NaturalLog,
        FunctionChoice::SquareRoot,
        FunctionChoice::Reciprocal,
        FunctionChoice::CubicMinusLinear,
        FunctionChoice::ShiftedSquare,
        FunctionChoice::Linear,
        FunctionChoice::Quartic,
    ];

    /// Canonical source text handed to the parser
    pub fn source(self) -> &'static str {
        match self {
            FunctionChoice::Square => "x^2",
            FunctionChoice::Cube => "x^3",
            FunctionChoice::Sine => "sin(x)",
            FunctionChoice::Cosine => "cos(x)",
            FunctionChoice::Exponential => "exp(x)",
            FunctionChoice::NaturalLog => "log(x)",
            FunctionChoice::SquareRoot => "sqrt(x)",
            FunctionChoice::Reciprocal => "1/x",
            FunctionChoice::CubicMinusLinear => "x^3 - 2*x",
            FunctionChoice::ShiftedSquare => "x^2 - 4",
            FunctionChoice::Linear => "2*x + 1",
            FunctionChoice::Quartic => "x^4 - x^2",
        }
    }

    /// Human-facing label shown in menus and legends
    pub fn label(self) -> &'static str {
        match self {
            FunctionChoice::Square => "x²",
            FunctionChoice::Cube => "x³",
            FunctionChoice::Sine => "sin(x)",
            FunctionChoice::Cosine => "cos(x)",
            FunctionChoice::Exponential => "eˣ",
            FunctionChoice::NaturalLog => "ln(x)",
            FunctionChoice::SquareRoot => "√x",
            FunctionChoice::Reciprocal => "1/x",
            FunctionChoice::CubicMinusLinear => "x³ - 2x",
            FunctionChoice::ShiftedSquare => "x² - 4",
            FunctionChoice::Linear => "2x + 1",
            FunctionChoice::Quartic => "x⁴ - x²",
        }
    }

    pub fn family(self) -> Family {
        match self {
            FunctionChoice::Sine
            | FunctionChoice::Cosine
            | FunctionChoice::Exponential
            | FunctionChoice::NaturalLog
            | FunctionChoice::SquareRoot
            | FunctionChoice::Reciprocal => Family::Transcendental,
            _ => Family::Polynomial,
        }
    }

    /// Short description used by the help listing, e.g. "quadratic"
    pub fn description(self) -> &'static str {
        match self {
            FunctionChoice::Square => "quadratic",
            FunctionChoice::Cube => "cubic",
            FunctionChoice::Sine => "sine wave",
            FunctionChoice::Cosine => "cosine wave",
            FunctionChoice::Exponential => "exponential",
            FunctionChoice::NaturalLog => "natural logarithm",
            FunctionChoice::SquareRoot => "square root",
            FunctionChoice::Reciprocal => "reciprocal/hyperbola",
            FunctionChoice::CubicMinusLinear => "cubic with linear term",
            FunctionChoice::ShiftedSquare => "shifted parabola",
            FunctionChoice::Linear => "linear",
            FunctionChoice::Quartic => "quartic",
        }
    }

    /// Look up an entry by canonical source, `**` spelling or label
    ///
    /// Matching is textual (surrounding whitespace ignored); use
    /// [`crate::SymbolicFunction::parse`] to also accept equivalent spellings
    /// such as `2x + 1`.
    pub fn from_key(key: &str) -> Option<FunctionChoice> {
        let key = key.trim();
        let pythonic = key.replace("**", "^");
        Self::ALL
            .into_iter()
            .find(|c| c.source() == key || c.source() == pythonic || c.label() == key)
    }

    /// Help text listing every entry grouped by family
    pub fn help_listing() -> String {
        let mut out = String::new();
        for (family, heading) in [
            (Family::Polynomial, "Polynomial Functions:"),
            (Family::Transcendental, "Transcendental Functions:"),
        ] {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(heading);
            out.push('\n');
            for choice in Self::ALL.into_iter().filter(|c| c.family() == family) {
                out.push_str(&format!("- {} ({})\n", choice.label(), choice.description()));
            }
        }
        out
    }
}

impl fmt::Display for FunctionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source())
    }
}

impl From<FunctionChoice> for &'static str {
    fn from(choice: FunctionChoice) -> Self {
        choice.source()
    }
}

impl TryFrom<String> for FunctionChoice {
    type Error = ParseError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        FunctionChoice::from_key(&text).ok_or(ParseError::NotWhitelisted { text })
    }
}
