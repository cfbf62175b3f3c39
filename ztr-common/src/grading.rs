//! Grade evaluation
//!
//! Maps obtained/total marks onto a letter grade using an ordered band table.
//! Bands are evaluated from the highest minimum percentage down; the first
//! band whose minimum is met wins.
//!
//! The band table is data, not code: [`GradeTable::default`] carries the
//! standard A–F bands and a table can also be loaded from the `[[grade_bands]]`
//! section of the config file (see [`crate::config`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const EXCELLENT_MESSAGE: &str = "Excellent performance! Keep shining 🌟";
const IMPROVING_MESSAGE: &str = "You are improving. Stay consistent and push harder 💪";
const HOPE_MESSAGE: &str = "Do not lose hope. This is just a phase — stronger days are coming ❤️";

/// Letter grades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grade evaluation errors
#[derive(Debug, Error, PartialEq)]
pub enum GradeError {
    #[error("Total marks must be positive, got {0}")]
    NonPositiveTotal(i64),

    #[error("Grade table is empty")]
    EmptyTable,

    #[error("Grade bands must be in strictly descending order (band {index} has minimum {min} after {previous})")]
    UnorderedBands { index: usize, min: f64, previous: f64 },

    #[error("Lowest grade band must start at or below 0%, got {0}")]
    UncoveredFloor(f64),

    #[error("Grade band {index} has a non-finite minimum percentage")]
    NonFiniteMinimum { index: usize },
}

/// One row of the percentage-to-grade table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBand {
    /// Inclusive lower bound, in percent
    pub min_percentage: f64,
    pub grade: Grade,
    pub message: String,
    /// Whether the result page plays the celebration animation
    #[serde(default)]
    pub show_confetti: bool,
}

impl GradeBand {
    fn new(min_percentage: f64, grade: Grade, message: &str, show_confetti: bool) -> Self {
        Self {
            min_percentage,
            grade,
            message: message.to_string(),
            show_confetti,
        }
    }
}

/// Derived grade for a single result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeInfo {
    pub grade: Grade,
    pub message: String,
    pub show_confetti: bool,
    pub percentage: f64,
}

/// Ordered grade band table
#[derive(Debug, Clone, PartialEq)]
pub struct GradeTable {
    bands: Vec<GradeBand>,
}

impl Default for GradeTable {
    fn default() -> Self {
        Self {
            bands: vec![
                GradeBand::new(80.0, Grade::A, EXCELLENT_MESSAGE, true),
                GradeBand::new(70.0, Grade::B, EXCELLENT_MESSAGE, true),
                GradeBand::new(60.0, Grade::C, IMPROVING_MESSAGE, false),
                GradeBand::new(20.0, Grade::D, IMPROVING_MESSAGE, false),
                GradeBand::new(0.0, Grade::F, HOPE_MESSAGE, false),
            ],
        }
    }
}

impl GradeTable {
    /// Build a table from bands, validating ordering and coverage
    ///
    /// Bands must be listed highest minimum first, strictly descending, and the
    /// last band must start at or below 0% so every result lands somewhere.
    /// Every minimum must be a finite number.
    pub fn new(bands: Vec<GradeBand>) -> Result<Self, GradeError> {
        if let Some(index) = bands.iter().position(|band| !band.min_percentage.is_finite()) {
            return Err(GradeError::NonFiniteMinimum { index });
        }

        let last = bands.last().ok_or(GradeError::EmptyTable)?;
        if last.min_percentage > 0.0 {
            return Err(GradeError::UncoveredFloor(last.min_percentage));
        }

        for (index, pair) in bands.windows(2).enumerate() {
            if pair[1].min_percentage >= pair[0].min_percentage {
                return Err(GradeError::UnorderedBands {
                    index: index + 1,
                    min: pair[1].min_percentage,
                    previous: pair[0].min_percentage,
                });
            }
        }

        Ok(Self { bands })
    }

    pub fn bands(&self) -> &[GradeBand] {
        &self.bands
    }

    /// Classify obtained/total marks
    pub fn evaluate(&self, obtained: i64, total: i64) -> Result<GradeInfo, GradeError> {
        if total <= 0 {
            return Err(GradeError::NonPositiveTotal(total));
        }

        let percentage = obtained as f64 / total as f64 * 100.0;

        // Construction guarantees the last band catches anything >= its minimum;
        // a negative percentage (negative obtained marks) still falls to the last band.
        let band = self
            .bands
            .iter()
            .find(|band| percentage >= band.min_percentage)
            .or_else(|| self.bands.last())
            .ok_or(GradeError::EmptyTable)?;

        Ok(GradeInfo {
            grade: band.grade,
            message: band.message.clone(),
            show_confetti: band.show_confetti,
            percentage,
        })
    }
}
