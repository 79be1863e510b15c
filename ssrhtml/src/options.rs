use std::borrow::Cow;
use std::collections::BTreeSet;

/// Which childless elements are written as a single self-closing tag (`<br />`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum SelfClosing {
    /// All childless elements when `true`, none when `false`.
    All(bool),
    /// Only childless elements with one of these tag names.
    Tags(BTreeSet<String>),
}
impl SelfClosing {
    /// Whether a childless element named `name` self-closes.
    pub fn applies_to(&self, name: &str) -> bool {
        match self {
            SelfClosing::All(enabled) => *enabled,
            SelfClosing::Tags(tags) => tags.contains(name),
        }
    }
}
impl Default for SelfClosing {
    fn default() -> Self {
        SelfClosing::All(true)
    }
}
impl From<bool> for SelfClosing {
    fn from(enabled: bool) -> Self {
        SelfClosing::All(enabled)
    }
}
impl<const N: usize> From<[&str; N]> for SelfClosing {
    fn from(tags: [&str; N]) -> Self {
        tags.into_iter().collect()
    }
}
impl<'a> FromIterator<&'a str> for SelfClosing {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        SelfClosing::Tags(iter.into_iter().map(str::to_string).collect())
    }
}

/// Formatting policy for [`crate::render`].
///
/// With the `serde` feature this can be loaded from JSON using camelCase keys
/// (`indent`, `indentUnit`, `indentWidth`, `selfClosing`, `escape`); missing keys
/// take their default.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(default, rename_all = "camelCase", deny_unknown_fields)
)]
pub struct FormatOptions {
    /// Put every node on its own indented line. When `false` the output is a single line.
    pub indent: bool,
    /// The literal string repeated per indentation level. Takes precedence over
    /// [`FormatOptions::indent_width`] when non-empty.
    pub indent_unit: String,
    /// The number of spaces per indentation level when no unit is set.
    pub indent_width: usize,
    /// Which childless elements self-close.
    pub self_closing: SelfClosing,
    /// HTML-escape text and attribute values.
    ///
    /// Off by default: content is written verbatim and must be trusted.
    pub escape: bool,
}
impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: false,
            indent_unit: String::new(),
            indent_width: 4,
            self_closing: SelfClosing::default(),
            escape: false,
        }
    }
}
impl FormatOptions {
    /// Set whether to indent the output.
    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Set the literal indentation unit.
    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    /// Set the number of spaces per indentation level.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set which childless elements self-close.
    pub fn with_self_closing(mut self, self_closing: impl Into<SelfClosing>) -> Self {
        self.self_closing = self_closing.into();
        self
    }

    /// Set whether to escape text and attribute values.
    pub fn with_escape(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    /// The string written once per indentation level.
    pub fn unit(&self) -> Cow<'_, str> {
        if self.indent_unit.is_empty() {
            Cow::Owned(" ".repeat(self.indent_width))
        } else {
            Cow::Borrowed(&self.indent_unit)
        }
    }

    /// Parse options from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Error type for loading [FormatOptions].
#[cfg(feature = "serde")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON was malformed or did not describe valid options.
    #[error("invalid format options: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = FormatOptions::default();
        assert!(!options.indent);
        assert_eq!(options.unit(), "    ");
        assert_eq!(options.self_closing, SelfClosing::All(true));
        assert!(!options.escape);
    }

    #[test]
    fn unit_takes_precedence_over_width() {
        let options = FormatOptions::default()
            .with_indent_width(2)
            .with_indent_unit("\t");
        assert_eq!(options.unit(), "\t");
        assert_eq!(options.with_indent_unit("").unit(), "  ");
    }

    #[test]
    fn self_closing_tag_sets() {
        let tags = SelfClosing::from(["img", "br"]);
        assert!(tags.applies_to("img"));
        assert!(!tags.applies_to("div"));
        assert!(!SelfClosing::All(false).applies_to("img"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn loads_from_json() {
        let options = FormatOptions::from_json(
            r#"{ "indent": true, "indentWidth": 2, "selfClosing": ["img"] }"#,
        )
        .unwrap();
        assert_eq!(
            options,
            FormatOptions::default()
                .with_indent(true)
                .with_indent_width(2)
                .with_self_closing(["img"])
        );

        let options = FormatOptions::from_json(r#"{ "selfClosing": false }"#).unwrap();
        assert_eq!(options.self_closing, SelfClosing::All(false));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn rejects_unknown_keys() {
        let err = FormatOptions::from_json(r#"{ "indnet": true }"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid format options"));
    }
}
