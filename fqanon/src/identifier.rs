use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::template::{Template, TemplateToken};

/// Error occurring when matching a read identifier against a [`Template`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum IdentifierError {
    /// The separator following a field could not be found in the remaining
    /// part of the identifier.
    SeparatorNotFound { field: String, separator: String },
    /// The identifier does not start with the literal text the template starts
    /// with.
    PrefixNotFound { prefix: String },
    /// The template was fully matched, but the identifier has more text left.
    TrailingInput { remainder: String },
    /// The same field name was matched twice.
    DuplicateFieldName { name: String },
}

impl Display for IdentifierError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierError::SeparatorNotFound { field, separator } => write!(
                f,
                "Separator `{}` after field `{}` not found",
                separator, field
            ),
            IdentifierError::PrefixNotFound { prefix } => {
                write!(f, "Identifier does not start with `{}`", prefix)
            }
            IdentifierError::TrailingInput { remainder } => {
                write!(f, "Unexpected text at the end of identifier: `{}`", remainder)
            }
            IdentifierError::DuplicateFieldName { name } => {
                write!(f, "Field `{}` matched more than once", name)
            }
        }
    }
}

impl Error for IdentifierError {}

/// The result of an identifier parsing operation.
pub type IdentifierResult<T> = Result<T, IdentifierError>;

/// Field values extracted from a single identifier.
///
/// Names borrow from the [`Template`], values borrow from the identifier.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct FieldMap<'t, 'i> {
    fields: HashMap<&'t str, &'i str>,
}

impl<'t, 'i> FieldMap<'t, 'i> {
    fn insert(&mut self, name: &'t str, value: &'i str) -> IdentifierResult<()> {
        if self.fields.insert(name, value).is_some() {
            return Err(IdentifierError::DuplicateFieldName {
                name: name.to_owned(),
            });
        }

        Ok(())
    }

    /// Returns the value of a field, or `None` if the field does not exist.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'i str> {
        self.fields.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Rebuilds the identifier these fields were parsed from by laying the
    /// values out according to `template`.
    ///
    /// Returns `None` if a field of the template is missing.
    #[must_use]
    pub fn reconstruct(&self, template: &Template) -> Option<String> {
        let mut identifier = String::new();
        for token in template.tokens() {
            match token {
                TemplateToken::Field(name) => identifier.push_str(self.get(name)?),
                TemplateToken::Literal(text) => identifier.push_str(text),
            }
        }

        Some(identifier)
    }
}

impl Template {
    /// Splits `identifier` into named fields according to this template.
    ///
    /// Each field extends up to the *first* occurrence of the literal that
    /// follows it; a field at the very end of the template takes the rest of
    /// the identifier.
    ///
    /// # Examples
    /// ```
    /// use fqanon::template::Template;
    ///
    /// let template = Template::parse("<instrument>:<run>/<sense>").unwrap();
    /// let fields = template.parse_identifier("HWI-D00119:50/1").unwrap();
    /// assert_eq!(fields.get("instrument"), Some("HWI-D00119"));
    /// assert_eq!(fields.get("run"), Some("50"));
    /// assert_eq!(fields.get("sense"), Some("1"));
    /// ```
    pub fn parse_identifier<'t, 'i>(
        &'t self,
        identifier: &'i str,
    ) -> IdentifierResult<FieldMap<'t, 'i>> {
        let mut fields = FieldMap::default();
        let mut rest = identifier;

        let prefix = self.prefix();
        rest = rest
            .strip_prefix(prefix)
            .ok_or_else(|| IdentifierError::PrefixNotFound {
                prefix: prefix.to_owned(),
            })?;

        for entry in self.entries() {
            let separator = entry.trailing_separator;
            let value_end = if separator.is_empty() && self.is_last(entry.field_name) {
                rest.len()
            } else {
                rest.find(separator)
                    .ok_or_else(|| IdentifierError::SeparatorNotFound {
                        field: entry.field_name.to_owned(),
                        separator: separator.to_owned(),
                    })?
            };

            fields.insert(entry.field_name, &rest[..value_end])?;
            rest = &rest[value_end + separator.len()..];
        }

        // A template ending with a literal must end the identifier as well
        if !rest.is_empty() {
            return Err(IdentifierError::TrailingInput {
                remainder: rest.to_owned(),
            });
        }

        Ok(fields)
    }

    fn is_last(&self, field_name: &str) -> bool {
        matches!(
            self.tokens().last(),
            Some(TemplateToken::Field(name)) if name == field_name
        )
    }
}

/// Splits `identifier` into named fields according to `template`.
///
/// Shorthand for [`Template::parse_identifier`].
pub fn parse_identifier<'t, 'i>(
    identifier: &'i str,
    template: &'t Template,
) -> IdentifierResult<FieldMap<'t, 'i>> {
    template.parse_identifier(identifier)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::_internal_test_data::{SIMPLE_IDENTIFIER, SIMPLE_IDENTIFIER_FIELDS};
    use crate::identifier::{parse_identifier, IdentifierError};
    use crate::template::Template;

    #[test]
    fn test_parse_default_template() {
        let template = Template::default();
        let fields = template.parse_identifier(SIMPLE_IDENTIFIER).unwrap();

        assert_eq!(fields.len(), SIMPLE_IDENTIFIER_FIELDS.len());
        for (name, value) in SIMPLE_IDENTIFIER_FIELDS {
            assert_eq!(fields.get(name), Some(value), "field `{}`", name);
        }
    }

    #[test]
    fn test_separator_not_found() {
        let template = Template::parse("<x>:<y>").unwrap();

        assert_eq!(
            parse_identifier("AB", &template).unwrap_err(),
            IdentifierError::SeparatorNotFound {
                field: "x".to_owned(),
                separator: ":".to_owned()
            }
        );
    }

    #[test]
    fn test_first_separator_occurrence_wins() {
        let template = Template::parse("<a>:<b>").unwrap();
        let fields = template.parse_identifier("1:2:3").unwrap();

        assert_eq!(fields.get("a"), Some("1"));
        assert_eq!(fields.get("b"), Some("2:3"));
    }

    #[test]
    fn test_empty_values() {
        let template = Template::parse("<a>:<b>:<c>").unwrap();
        let fields = template.parse_identifier("::").unwrap();

        assert_eq!(fields.get("a"), Some(""));
        assert_eq!(fields.get("b"), Some(""));
        assert_eq!(fields.get("c"), Some(""));
    }

    #[test]
    fn test_multi_char_separator() {
        let template = Template::parse("<a>--<b>").unwrap();
        let fields = template.parse_identifier("x-y--z").unwrap();

        assert_eq!(fields.get("a"), Some("x-y"));
        assert_eq!(fields.get("b"), Some("z"));
    }

    #[test]
    fn test_whitespace_not_trimmed() {
        let template = Template::parse("<a>:<b>").unwrap();
        let fields = template.parse_identifier(" 1 : 2 ").unwrap();

        assert_eq!(fields.get("a"), Some(" 1 "));
        assert_eq!(fields.get("b"), Some(" 2 "));
    }

    #[test]
    fn test_adjacent_fields() {
        let template = Template::parse("<a><b>").unwrap();
        let fields = template.parse_identifier("xyz").unwrap();

        assert_eq!(fields.get("a"), Some(""));
        assert_eq!(fields.get("b"), Some("xyz"));
    }

    #[test]
    fn test_prefix() {
        let template = Template::parse("SRR<run>.<spot>").unwrap();
        let fields = template.parse_identifier("SRR123.45").unwrap();

        assert_eq!(fields.get("run"), Some("123"));
        assert_eq!(fields.get("spot"), Some("45"));

        assert_eq!(
            template.parse_identifier("ERR123.45").unwrap_err(),
            IdentifierError::PrefixNotFound {
                prefix: "SRR".to_owned()
            }
        );
    }

    #[test]
    fn test_trailing_literal() {
        let template = Template::parse("<a>/1").unwrap();

        assert_eq!(template.parse_identifier("x/1").unwrap().get("a"), Some("x"));
        assert_eq!(
            template.parse_identifier("x/1/1").unwrap_err(),
            IdentifierError::TrailingInput {
                remainder: "/1".to_owned()
            }
        );
    }

    #[test]
    fn test_no_fields() {
        let template = Template::parse("constant").unwrap();

        assert!(template.parse_identifier("constant").unwrap().is_empty());
        assert!(matches!(
            template.parse_identifier("constant2").unwrap_err(),
            IdentifierError::TrailingInput { .. }
        ));
    }

    #[test]
    fn test_idempotent() {
        let template = Template::default();

        assert_eq!(
            template.parse_identifier(SIMPLE_IDENTIFIER).unwrap(),
            template.parse_identifier(SIMPLE_IDENTIFIER).unwrap()
        );
    }

    #[test]
    fn test_reconstruct() {
        let template = Template::default();
        let fields = template.parse_identifier(SIMPLE_IDENTIFIER).unwrap();

        assert_eq!(
            fields.reconstruct(&template).as_deref(),
            Some(SIMPLE_IDENTIFIER)
        );
    }

    #[test]
    fn test_round_trip_formatted_values() {
        let template = Template::parse("<a>:<b>_<c>/<d>").unwrap();
        let value_sets = [
            ["HWI", "50", "x", "1"],
            ["", "", "", ""],
            ["a/b_", "c:d/", "e:f_g", "h_i:j/"],
            ["long value with spaces", "0", "-", "2"],
        ];

        for values in value_sets {
            let identifier = format!("{}:{}_{}/{}", values[0], values[1], values[2], values[3]);
            let fields = template.parse_identifier(&identifier).unwrap();
            let parsed = ["a", "b", "c", "d"]
                .iter()
                .map(|name| fields.get(name).unwrap())
                .collect_vec();

            assert_eq!(parsed, values, "identifier `{}`", identifier);
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!(
                "{}",
                IdentifierError::SeparatorNotFound {
                    field: "x".to_owned(),
                    separator: ":".to_owned()
                }
            ),
            "Separator `:` after field `x` not found"
        );
        assert_eq!(
            format!(
                "{}",
                IdentifierError::PrefixNotFound {
                    prefix: "SRR".to_owned()
                }
            ),
            "Identifier does not start with `SRR`"
        );
        assert_eq!(
            format!(
                "{}",
                IdentifierError::TrailingInput {
                    remainder: "/2".to_owned()
                }
            ),
            "Unexpected text at the end of identifier: `/2`"
        );
        assert_eq!(
            format!(
                "{}",
                IdentifierError::DuplicateFieldName {
                    name: "a".to_owned()
                }
            ),
            "Field `a` matched more than once"
        );
    }
}
