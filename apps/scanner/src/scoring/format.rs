//! Score formatting: pure mappings from a 0–10 score to display values.
//!
//! Nothing here is persisted; these are only ever used to render results.

use serde::Serialize;

/// Color bucket for a score. Ordered best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTier {
    Success,
    Warning,
    Caution,
    Critical,
}

impl ColorTier {
    pub fn hex(self) -> &'static str {
        match self {
            ColorTier::Success => "#10b981",
            ColorTier::Warning => "#f59e0b",
            ColorTier::Caution => "#f97316",
            ColorTier::Critical => "#ef4444",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorTier::Success => "success",
            ColorTier::Warning => "warning",
            ColorTier::Caution => "caution",
            ColorTier::Critical => "critical",
        }
    }
}

/// Letter grade for a score. Ordered best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    C,
    D,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower bounds are inclusive. Anything below 4, including NaN, is critical;
/// anything above 10 is still success.
pub fn color_for(score: f64) -> ColorTier {
    if score >= 8.0 {
        ColorTier::Success
    } else if score >= 6.0 {
        ColorTier::Warning
    } else if score >= 4.0 {
        ColorTier::Caution
    } else {
        ColorTier::Critical
    }
}

pub fn grade_for(score: f64) -> Grade {
    if score >= 9.0 {
        Grade::APlus
    } else if score >= 8.0 {
        Grade::A
    } else if score >= 7.0 {
        Grade::BPlus
    } else if score >= 6.0 {
        Grade::B
    } else if score >= 5.0 {
        Grade::C
    } else {
        Grade::D
    }
}

/// Width of a breakdown bar as a percentage of its track.
pub fn bar_width_percent(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    (score * 10.0).clamp(0.0, 100.0)
}

/// `skills_match` -> `skills match`
pub fn humanize_key(key: &str) -> String {
    key.replace('_', " ")
}
