use std::fmt;

use bumpalo::collections::String as BumpString;
use bumpalo::Bump;

/// Represents a typed attribute value.
///
/// Values compare with exact typed equality: `Int(1)`, `Float(1.0)` and
/// `String("1")` are all distinct. This is what [`crate::switch`] relies on.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value"))]
pub enum AttributeValue<'bump> {
    /// A string value.
    String(BumpString<'bump>),
    /// An integer value.
    Int(i128),
    /// A floating-point value.
    Float(f64),
    /// A boolean value.
    Bool(bool),
}

impl<'bump> AttributeValue<'bump> {
    /// Create a string value.
    pub fn string(bump: &'bump Bump, value: &str) -> Self {
        AttributeValue::String(BumpString::from_str_in(value, bump))
    }

    /// Returns the value as a string slice if this is a String variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the integer value if this is an Int variant.
    pub fn as_int(&self) -> Option<i128> {
        match self {
            AttributeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float value if this is a Float variant.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean value if this is a Bool variant.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Formats the value as it appears between the quotes of an attribute.
impl fmt::Display for AttributeValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => f.write_str(s.as_str()),
            AttributeValue::Int(i) => write!(f, "{i}"),
            AttributeValue::Float(v) => write!(f, "{v}"),
            AttributeValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Trait for types that can be converted into an [AttributeValue] with a bump allocator.
pub trait IntoAttributeValue<'bump> {
    /// Convert this value into an [AttributeValue] using the given bump allocator.
    fn into_attribute_value(self, bump: &'bump Bump) -> AttributeValue<'bump>;
}
impl<'bump> IntoAttributeValue<'bump> for AttributeValue<'bump> {
    fn into_attribute_value(self, _bump: &'bump Bump) -> AttributeValue<'bump> {
        self
    }
}
impl<'bump> IntoAttributeValue<'bump> for &str {
    fn into_attribute_value(self, bump: &'bump Bump) -> AttributeValue<'bump> {
        AttributeValue::string(bump, self)
    }
}
impl<'bump> IntoAttributeValue<'bump> for String {
    fn into_attribute_value(self, bump: &'bump Bump) -> AttributeValue<'bump> {
        AttributeValue::string(bump, &self)
    }
}
impl<'bump> IntoAttributeValue<'bump> for &String {
    fn into_attribute_value(self, bump: &'bump Bump) -> AttributeValue<'bump> {
        AttributeValue::string(bump, self)
    }
}
impl<'bump> IntoAttributeValue<'bump> for bool {
    fn into_attribute_value(self, _bump: &'bump Bump) -> AttributeValue<'bump> {
        AttributeValue::Bool(self)
    }
}
impl<'bump> IntoAttributeValue<'bump> for f64 {
    fn into_attribute_value(self, _bump: &'bump Bump) -> AttributeValue<'bump> {
        AttributeValue::Float(self)
    }
}
impl<'bump> IntoAttributeValue<'bump> for f32 {
    fn into_attribute_value(self, _bump: &'bump Bump) -> AttributeValue<'bump> {
        AttributeValue::Float(self.into())
    }
}

macro_rules! int_attribute_values {
    ($($int:ty),*) => {
        $(
            impl<'bump> IntoAttributeValue<'bump> for $int {
                fn into_attribute_value(self, _bump: &'bump Bump) -> AttributeValue<'bump> {
                    AttributeValue::Int(self as i128)
                }
            }
        )*
    };
}
int_attribute_values!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
/// A key-value pair for an HTML attribute.
pub struct Attribute<'bump> {
    /// The key of the attribute.
    pub key: BumpString<'bump>,
    /// The value of the attribute. Attributes without a value render as just their key.
    pub value: Option<AttributeValue<'bump>>,
}

impl<'bump> Attribute<'bump> {
    /// Create a new attribute with a string key and value.
    pub fn new(bump: &'bump Bump, key: &str, value: &str) -> Self {
        Self::with_value(bump, key, value)
    }

    /// Create a new attribute with any value that implements [IntoAttributeValue].
    pub fn with_value(bump: &'bump Bump, key: &str, value: impl IntoAttributeValue<'bump>) -> Self {
        Attribute {
            key: BumpString::from_str_in(key, bump),
            value: Some(value.into_attribute_value(bump)),
        }
    }

    /// Create a boolean attribute (no value).
    pub fn boolean(bump: &'bump Bump, key: &str) -> Self {
        Attribute {
            key: BumpString::from_str_in(key, bump),
            value: None,
        }
    }

    /// Get the value as a string slice, if present and is a String variant.
    pub fn value_as_str(&self) -> Option<&str> {
        self.value.as_ref().and_then(|v| v.as_str())
    }
}

/// Trait for types that can be converted into an Attribute with a bump allocator.
pub trait IntoAttribute<'bump> {
    /// Convert this value into an Attribute using the given bump allocator.
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump>;
}
impl<'bump> IntoAttribute<'bump> for Attribute<'bump> {
    fn into_attribute(self, _bump: &'bump Bump) -> Attribute<'bump> {
        self
    }
}
impl<'bump> IntoAttribute<'bump> for &str {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::boolean(bump, self)
    }
}
impl<'bump, V: IntoAttributeValue<'bump>> IntoAttribute<'bump> for (&str, V) {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::with_value(bump, self.0, self.1)
    }
}
impl<'bump, V: IntoAttributeValue<'bump>> IntoAttribute<'bump> for (String, V) {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::with_value(bump, &self.0, self.1)
    }
}

/// Create an attribute from a value that implements [IntoAttribute].
pub fn attr<'bump>(bump: &'bump Bump, value: impl IntoAttribute<'bump>) -> Attribute<'bump> {
    value.into_attribute(bump)
}

/// The attributes of an element as they are written out.
///
/// `className` is an alias for `class`: it is emitted as `class` in its own position
/// when no `class` attribute exists, and dropped otherwise. `className` itself is
/// never yielded.
pub fn output_attributes<'a, 'bump>(
    attributes: &'a [Attribute<'bump>],
) -> impl Iterator<Item = (&'a str, Option<&'a AttributeValue<'bump>>)> + 'a {
    let has_class = attributes.iter().any(|a| a.key.as_str() == "class");
    attributes
        .iter()
        .filter_map(move |a| match a.key.as_str() {
            "className" if has_class => None,
            "className" => Some(("class", a.value.as_ref())),
            key => Some((key, a.value.as_ref())),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_and_values(attributes: &[Attribute<'_>]) -> Vec<(String, Option<String>)> {
        output_attributes(attributes)
            .map(|(k, v)| (k.to_string(), v.map(|v| v.to_string())))
            .collect()
    }

    #[test]
    fn class_name_becomes_class() {
        let bump = Bump::new();
        let attributes = [
            attr(&bump, ("id", "main")),
            attr(&bump, ("className", "x")),
        ];
        assert_eq!(
            keys_and_values(&attributes),
            vec![
                ("id".to_string(), Some("main".to_string())),
                ("class".to_string(), Some("x".to_string())),
            ]
        );
    }

    #[test]
    fn explicit_class_wins_over_class_name() {
        let bump = Bump::new();
        let attributes = [
            attr(&bump, ("className", "alias")),
            attr(&bump, ("class", "original")),
        ];
        assert_eq!(
            keys_and_values(&attributes),
            vec![("class".to_string(), Some("original".to_string()))]
        );
    }

    #[test]
    fn typed_values_compare_without_coercion() {
        let bump = Bump::new();
        assert_eq!(1i32.into_attribute_value(&bump), AttributeValue::Int(1));
        assert_eq!(1u8.into_attribute_value(&bump), 1i64.into_attribute_value(&bump));
        assert_ne!(1i32.into_attribute_value(&bump), 1.0f64.into_attribute_value(&bump));
        assert_ne!(1i32.into_attribute_value(&bump), "1".into_attribute_value(&bump));
        assert_ne!(true.into_attribute_value(&bump), "true".into_attribute_value(&bump));
    }

    #[test]
    fn values_display_as_attribute_text() {
        let bump = Bump::new();
        assert_eq!(AttributeValue::string(&bump, "a b").to_string(), "a b");
        assert_eq!(AttributeValue::Int(-4).to_string(), "-4");
        assert_eq!(AttributeValue::Float(1.5).to_string(), "1.5");
        assert_eq!(AttributeValue::Bool(false).to_string(), "false");
    }
}
