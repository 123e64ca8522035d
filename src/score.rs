//! Nutrition and ecology score normalization
//!
//! Nutri-Score and Eco-Score are letter grades (A best, E worst); the Nova
//! classification is a 1..4 processing group (1 best). Both map onto a numeric
//! scale where a higher number is better, so scores can be averaged and the
//! average mapped back to a grade.
//!
//! A missing score is never defaulted to a grade: it stays `None` and renders
//! with the neutral [`UNKNOWN_STYLE`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Letter grade used by Nutri-Score and Eco-Score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
}

impl Grade {
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::E];

    /// Numeric value on the 1..5 scale (A = 5)
    pub fn to_number(self) -> f64 {
        match self {
            Self::A => 5.0,
            Self::B => 4.0,
            Self::C => 3.0,
            Self::D => 2.0,
            Self::E => 1.0,
        }
    }

    /// Bucket a value from the 1..5 scale back to a grade
    pub fn from_number(value: f64) -> Self {
        if value >= 4.5 {
            Self::A
        } else if value >= 3.5 {
            Self::B
        } else if value >= 2.5 {
            Self::C
        } else if value >= 1.5 {
            Self::D
        } else {
            Self::E
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Grade {
    type Err = ScoreParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "E" => Ok(Self::E),
            _ => Err(ScoreParseError::InvalidGrade(s.trim().to_string())),
        }
    }
}

/// Nova food processing group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NovaGroup {
    #[serde(rename = "GROUP_1")]
    Group1,
    #[serde(rename = "GROUP_2")]
    Group2,
    #[serde(rename = "GROUP_3")]
    Group3,
    #[serde(rename = "GROUP_4")]
    Group4,
}

impl NovaGroup {
    pub const ALL: [NovaGroup; 4] = [
        NovaGroup::Group1,
        NovaGroup::Group2,
        NovaGroup::Group3,
        NovaGroup::Group4,
    ];

    /// Numeric value on the 1..4 scale (group 1 = 4)
    pub fn to_number(self) -> f64 {
        match self {
            Self::Group1 => 4.0,
            Self::Group2 => 3.0,
            Self::Group3 => 2.0,
            Self::Group4 => 1.0,
        }
    }

    /// Bucket a value from the 1..4 scale back to a group
    pub fn from_number(value: f64) -> Self {
        if value >= 3.5 {
            Self::Group1
        } else if value >= 2.5 {
            Self::Group2
        } else if value >= 1.5 {
            Self::Group3
        } else {
            Self::Group4
        }
    }

    /// The group number as printed on packaging (1..4)
    pub fn group_number(self) -> u8 {
        match self {
            Self::Group1 => 1,
            Self::Group2 => 2,
            Self::Group3 => 3,
            Self::Group4 => 4,
        }
    }
}

impl fmt::Display for NovaGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NOVA {}", self.group_number())
    }
}

impl FromStr for NovaGroup {
    type Err = ScoreParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const SEPARATORS: [char; 3] = ['_', '-', ' '];

        // Optional "nova", then an optional "group" or "g", then the digit
        let normalized = s.trim().to_ascii_lowercase();
        let rest = normalized.strip_prefix("nova").unwrap_or(&normalized);
        let rest = rest.trim_start_matches(SEPARATORS);
        let rest = rest
            .strip_prefix("group")
            .or_else(|| rest.strip_prefix('g'))
            .unwrap_or(rest);
        let digit = rest.trim_start_matches(SEPARATORS);
        match digit {
            "1" => Ok(Self::Group1),
            "2" => Ok(Self::Group2),
            "3" => Ok(Self::Group3),
            "4" => Ok(Self::Group4),
            _ => Err(ScoreParseError::InvalidNovaGroup(s.trim().to_string())),
        }
    }
}

/// Error type for score parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreParseError {
    InvalidGrade(String),
    InvalidNovaGroup(String),
}

impl fmt::Display for ScoreParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGrade(s) => write!(f, "Invalid grade (expected A-E): {}", s),
            Self::InvalidNovaGroup(s) => write!(f, "Invalid Nova group (expected 1-4): {}", s),
        }
    }
}

impl std::error::Error for ScoreParseError {}

/// A score from either family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Score {
    Letter(Grade),
    Nova(NovaGroup),
}

impl Score {
    pub fn to_number(self) -> f64 {
        match self {
            Self::Letter(grade) => grade.to_number(),
            Self::Nova(group) => group.to_number(),
        }
    }
}

impl From<Grade> for Score {
    fn from(grade: Grade) -> Self {
        Self::Letter(grade)
    }
}

impl From<NovaGroup> for Score {
    fn from(group: NovaGroup) -> Self {
        Self::Nova(group)
    }
}

/// 24-bit display color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Text color to put on top of a badge background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextContrast {
    Light,
    Dark,
}

/// Presentation of a score badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreStyle {
    pub background: Rgb,
    pub text: TextContrast,
    pub glyph: &'static str,
}

/// Badge for a missing score
pub const UNKNOWN_STYLE: ScoreStyle = ScoreStyle {
    background: Rgb(0x9C, 0xA3, 0xAF),
    text: TextContrast::Dark,
    glyph: "?",
};

fn grade_style(grade: Grade) -> ScoreStyle {
    let (background, text) = match grade {
        Grade::A => (Rgb(0x03, 0x81, 0x41), TextContrast::Light),
        Grade::B => (Rgb(0x85, 0xBB, 0x2F), TextContrast::Dark),
        Grade::C => (Rgb(0xFE, 0xCB, 0x02), TextContrast::Dark),
        Grade::D => (Rgb(0xEE, 0x81, 0x00), TextContrast::Light),
        Grade::E => (Rgb(0xE6, 0x3E, 0x11), TextContrast::Light),
    };
    ScoreStyle {
        background,
        text,
        glyph: grade.letter(),
    }
}

fn nova_style(group: NovaGroup) -> ScoreStyle {
    let (background, text, glyph) = match group {
        NovaGroup::Group1 => (Rgb(0x00, 0xAA, 0x00), TextContrast::Light, "1"),
        NovaGroup::Group2 => (Rgb(0xFF, 0xCC, 0x00), TextContrast::Dark, "2"),
        NovaGroup::Group3 => (Rgb(0xFF, 0x66, 0x00), TextContrast::Light, "3"),
        NovaGroup::Group4 => (Rgb(0xFF, 0x00, 0x00), TextContrast::Light, "4"),
    };
    ScoreStyle {
        background,
        text,
        glyph,
    }
}

/// Badge style for a score, or the unknown badge when there is none
pub fn style_for(score: Option<Score>) -> ScoreStyle {
    match score {
        Some(Score::Letter(grade)) => grade_style(grade),
        Some(Score::Nova(group)) => nova_style(group),
        None => UNKNOWN_STYLE,
    }
}

/// Mean of the present scores; `None` when no score is present
pub fn average<I>(scores: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<Score>>,
{
    let (sum, count) = scores
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), score| {
            (sum + score.to_number(), count + 1)
        });

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Relative change in percent from `previous` to `current`
///
/// Returns `None` when `previous` is zero: there is no baseline to compare to.
pub fn variation(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

/// Direction of a score variation (higher scores are better)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Improving,
    Worsening,
    Stable,
}

impl Trend {
    pub fn from_variation(variation: f64) -> Self {
        if variation > 0.0 {
            Self::Improving
        } else if variation < 0.0 {
            Self::Worsening
        } else {
            Self::Stable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Improving => "en amélioration",
            Self::Worsening => "en baisse",
            Self::Stable => "stable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_table() {
        assert_eq!(Grade::A.to_number(), 5.0);
        assert_eq!(Grade::C.to_number(), 3.0);
        assert_eq!(Grade::E.to_number(), 1.0);
    }

    #[test]
    fn test_grade_round_trip_exact() {
        for grade in Grade::ALL {
            assert_eq!(Grade::from_number(grade.to_number()), grade);
        }
        for group in NovaGroup::ALL {
            assert_eq!(NovaGroup::from_number(group.to_number()), group);
        }
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_number(4.5), Grade::A);
        assert_eq!(Grade::from_number(4.49), Grade::B);
        assert_eq!(Grade::from_number(3.5), Grade::B);
        assert_eq!(Grade::from_number(2.5), Grade::C);
        assert_eq!(Grade::from_number(1.5), Grade::D);
        assert_eq!(Grade::from_number(1.49), Grade::E);
        assert_eq!(Grade::from_number(0.0), Grade::E);
    }

    #[test]
    fn test_nova_thresholds() {
        assert_eq!(NovaGroup::from_number(3.5), NovaGroup::Group1);
        assert_eq!(NovaGroup::from_number(3.0), NovaGroup::Group2);
        assert_eq!(NovaGroup::from_number(2.5), NovaGroup::Group2);
        assert_eq!(NovaGroup::from_number(1.5), NovaGroup::Group3);
        assert_eq!(NovaGroup::from_number(1.0), NovaGroup::Group4);
    }

    #[test]
    fn test_parse() {
        assert_eq!("b".parse::<Grade>().unwrap(), Grade::B);
        assert!("F".parse::<Grade>().is_err());
        assert_eq!("1".parse::<NovaGroup>().unwrap(), NovaGroup::Group1);
        assert_eq!("GROUP_3".parse::<NovaGroup>().unwrap(), NovaGroup::Group3);
        assert_eq!("nova 4".parse::<NovaGroup>().unwrap(), NovaGroup::Group4);
        assert!("5".parse::<NovaGroup>().is_err());

        assert_eq!("nova_group_1".parse::<NovaGroup>().unwrap(), NovaGroup::Group1);
        assert_eq!("NOVA-G1".parse::<NovaGroup>().unwrap(), NovaGroup::Group1);
        assert_eq!("g2".parse::<NovaGroup>().unwrap(), NovaGroup::Group2);
        assert_eq!("Nova Group 3".parse::<NovaGroup>().unwrap(), NovaGroup::Group3);
        assert!("gg1".parse::<NovaGroup>().is_err());
        assert!("nova".parse::<NovaGroup>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Grade::A).unwrap(), "\"A\"");
        assert_eq!(
            serde_json::to_string(&NovaGroup::Group2).unwrap(),
            "\"GROUP_2\""
        );
        let group: NovaGroup = serde_json::from_str("\"GROUP_4\"").unwrap();
        assert_eq!(group, NovaGroup::Group4);
    }

    #[test]
    fn test_styles_are_total_and_distinct_from_unknown() {
        for grade in Grade::ALL {
            let style = style_for(Some(grade.into()));
            assert_eq!(style.glyph, grade.letter());
            assert_ne!(style.background, UNKNOWN_STYLE.background);
        }
        for group in NovaGroup::ALL {
            let style = style_for(Some(group.into()));
            assert_ne!(style.glyph, "?");
        }
        assert_eq!(style_for(None).glyph, "?");
        assert_eq!(style_for(Some(Grade::A.into())).background.hex(), "#038141");
    }

    #[test]
    fn test_average_skips_missing() {
        let scores = vec![Some(Score::Letter(Grade::A)), None, Some(Grade::C.into())];
        assert_eq!(average(scores), Some(4.0));
    }

    #[test]
    fn test_average_empty_is_no_data() {
        assert_eq!(average(Vec::<Option<Score>>::new()), None);
        assert_eq!(average(vec![None, None]), None);
    }

    #[test]
    fn test_variation() {
        assert_eq!(variation(4.0, 3.2).map(|v| (v * 10.0).round() / 10.0), Some(25.0));
        assert_eq!(variation(3.0, 4.0), Some(-25.0));
        assert_eq!(variation(3.0, 0.0), None);
        assert_eq!(Trend::from_variation(-25.0), Trend::Worsening);
        assert_eq!(Trend::from_variation(0.0), Trend::Stable);
    }
}
