//! Parsed HTML documents and the selector expressions evaluated against them.
//!
//! A selector expression is a CSS selector optionally followed by an
//! accessor: `div.video a @href`, `h2.title @text`, `div.desc @html`.
//! Without an accessor the trimmed text content is returned.

use crate::error::{Error, Result};
use scraper::{ElementRef, Html, Selector};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    Text,
    Html,
    Attr(String),
}

/// A compiled selector expression.
#[derive(Debug, Clone)]
pub struct FieldSelector {
    expression: String,
    selector: Selector,
    accessor: Accessor,
}

impl FieldSelector {
    pub fn parse(expression: &str) -> std::result::Result<Self, String> {
        let expression = expression.trim();

        let (css, accessor) = match expression.rfind(" @") {
            Some(at_pos) => {
                let name = expression[at_pos + 2..].trim();
                let accessor = match name {
                    "" => return Err(format!("empty accessor in '{}'", expression)),
                    "text" => Accessor::Text,
                    "html" => Accessor::Html,
                    attr => Accessor::Attr(attr.to_string()),
                };
                (expression[..at_pos].trim(), accessor)
            }
            None => (expression, Accessor::Text),
        };

        if css.is_empty() {
            return Err(format!("empty selector in '{}'", expression));
        }

        let selector = Selector::parse(css)
            .map_err(|e| format!("invalid selector '{}': {}", css, e))?;

        Ok(Self {
            expression: expression.to_string(),
            selector,
            accessor,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    fn value_of(&self, element: ElementRef<'_>) -> Option<String> {
        match &self.accessor {
            Accessor::Text => Some(element.text().collect::<String>().trim().to_string()),
            Accessor::Html => Some(element.inner_html()),
            Accessor::Attr(name) => element.value().attr(name).map(String::from),
        }
    }
}

#[derive(Debug)]
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// All values produced by the selector, in document order.
    pub fn select_values(&self, selector: &FieldSelector) -> Vec<String> {
        self.html
            .select(&selector.selector)
            .filter_map(|el| selector.value_of(el))
            .collect()
    }

    pub fn first_value(&self, selector: &FieldSelector) -> Option<String> {
        self.html
            .select(&selector.selector)
            .find_map(|el| selector.value_of(el))
    }

    /// First value of a field that must be present on the page.
    pub fn require_value(&self, field: &str, selector: &FieldSelector) -> Result<String> {
        self.first_value(selector).ok_or_else(|| {
            Error::Extraction(format!(
                "No element for field '{}' matches '{}'",
                field,
                selector.expression()
            ))
        })
    }
}
