//! Per-section verdicts and their presentation.
//!
//! Scoring only ever produces a `Verdict`; symbols and display strings live here
//! so the rubric stays free of formatting.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Good,
    Improve,
    Missing,
    PresentButIrrelevant,
}

/// Colour class a front end can map to green / orange / red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Good,
    Warning,
    Bad,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Good => "Good",
            Verdict::Improve => "Improve",
            Verdict::Missing => "Missing",
            Verdict::PresentButIrrelevant => "Present but not relevant",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Verdict::Good => "✅",
            Verdict::Improve => "⚠️",
            Verdict::Missing | Verdict::PresentButIrrelevant => "❌",
        }
    }

    /// The exported status string, e.g. `"⚠️ Improve"`.
    pub fn status_line(self) -> String {
        format!("{} {}", self.symbol(), self.label())
    }

    pub fn tone(self) -> Tone {
        match self {
            Verdict::Good => Tone::Good,
            Verdict::Improve => Tone::Warning,
            Verdict::Missing | Verdict::PresentButIrrelevant => Tone::Bad,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
