//! Branding answers shared by the manifest and the setup guide.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnswerError {
    #[error("`{0}` must not be empty")]
    Empty(&'static str),

    #[error("`{value}` is not a valid {field}, expected `#` followed by 6 hex digits")]
    InvalidColor { field: &'static str, value: String },

    #[error("missing required answer `{0}`, pass it as a flag or run interactively")]
    Missing(&'static str),
}

/// A `#rrggbb` color, kept exactly as the operator typed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(field: &'static str, value: &str) -> Result<Self, AnswerError> {
        let value = value.trim();
        if HEX_COLOR.is_match(value) {
            Ok(HexColor(value.to_string()))
        } else {
            Err(AnswerError::InvalidColor {
                field,
                value: value.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reject blank text answers, returning the trimmed value
pub fn non_empty(field: &'static str, value: &str) -> Result<String, AnswerError> {
    let value = value.trim();
    if value.is_empty() {
        Err(AnswerError::Empty(field))
    } else {
        Ok(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandingAnswers {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub theme_color: HexColor,
    pub background_color: HexColor,
}

impl BrandingAnswers {
    /// Validate raw answers into a branding record
    pub fn new(
        name: &str,
        short_name: &str,
        description: &str,
        theme_color: &str,
        background_color: &str,
    ) -> Result<Self, AnswerError> {
        Ok(Self {
            name: non_empty("name", name)?,
            short_name: non_empty("short name", short_name)?,
            description: non_empty("description", description)?,
            theme_color: HexColor::parse("theme color", theme_color)?,
            background_color: HexColor::parse("background color", background_color)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_accepts_both_cases() {
        assert_eq!(HexColor::parse("c", "#112233").unwrap().as_str(), "#112233");
        assert_eq!(HexColor::parse("c", "#aBcDeF").unwrap().as_str(), "#aBcDeF");
    }

    #[test]
    fn test_hex_color_rejects_other_forms() {
        for bad in ["#fff", "112233", "#1122334", "#12345g", "rgb(0,0,0)", ""] {
            assert!(HexColor::parse("theme color", bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_branding_validation() {
        let branding = BrandingAnswers::new(" Acme ", "Acme", "d", "#112233", "#ffffff").unwrap();
        assert_eq!(branding.name, "Acme");

        assert_eq!(
            BrandingAnswers::new("Acme", "  ", "d", "#112233", "#ffffff"),
            Err(AnswerError::Empty("short name"))
        );
        assert!(matches!(
            BrandingAnswers::new("Acme", "Acme", "d", "#112233", "white"),
            Err(AnswerError::InvalidColor {
                field: "background color",
                ..
            })
        ));
    }

    #[test]
    fn test_hex_color_serializes_as_plain_string() {
        let color = HexColor::parse("c", "#ffffff").unwrap();
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#ffffff\"");
    }
}
