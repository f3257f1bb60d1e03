//! Text normalization shared by the site strategies.

use crate::error::{Error, Result};
use regex::Regex;

/// Strips everything except ASCII letters, digits, spaces and underscores,
/// then lowercases.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    dirty: Regex,
}

impl TextCleaner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dirty: Regex::new(r"[^a-zA-Z0-9 _]+").map_err(|e| Error::Extraction(e.to_string()))?,
        })
    }

    pub fn clean(&self, text: &str) -> String {
        self.dirty.replace_all(text, "").to_lowercase()
    }

    pub fn clean_all(&self, texts: Vec<String>) -> Vec<String> {
        texts.iter().map(|t| self.clean(t)).collect()
    }

    /// Clean a counter such as `"1,234"` and read it as a number.
    pub fn clean_number(&self, field: &str, text: &str) -> Result<f64> {
        let cleaned = self.clean(text);
        cleaned.trim().parse::<f64>().map_err(|_| {
            Error::Extraction(format!("Field '{}' is not a number: {:?}", field, text))
        })
    }
}

/// Convert a duration such as `"1h - 30 sec"` or `"12 min"` to minutes.
///
/// Hours are written `<n>h` or `<n> h`, minutes `<n> min` and seconds
/// `<n> sec`; lone `-` tokens separate the parts.
pub fn parse_duration_minutes(text: &str) -> Result<f64> {
    let mut minutes = 0.0;
    let mut tokens = text.split_whitespace().filter(|t| *t != "-");

    while let Some(token) = tokens.next() {
        if let Some(hours) = token.strip_suffix('h').filter(|h| !h.is_empty()) {
            minutes += duration_number(hours, text)? * 60.0;
            continue;
        }

        let value = duration_number(token, text)?;
        match tokens.next() {
            Some("h") => minutes += value * 60.0,
            Some("min") => minutes += value,
            Some("sec") => minutes += value / 60.0,
            Some(unit) => {
                return Err(Error::Extraction(format!(
                    "Unknown duration unit '{}' in {:?}",
                    unit, text
                )));
            }
            None => {
                return Err(Error::Extraction(format!("Duration {:?} ends without a unit", text)));
            }
        }
    }

    Ok(minutes)
}

fn duration_number(token: &str, text: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| Error::Extraction(format!("Bad duration segment '{}' in {:?}", token, text)))
}
