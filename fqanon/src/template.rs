use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::debug;

const FIELD_START: char = '<';
const FIELD_END: char = '>';

/// Default template, matching the identifiers produced by older Illumina
/// pipelines (e.g. `HWI-D00119:50:H7AP8ADXX:1:1101:1318:44446/1`).
pub const DEFAULT_TEMPLATE: &str =
    "<instrument>:<run number>:<flowcell ID>:<lane>:<tile>:<x-pos>:<y-pos>/<sense>";

/// Error occurring when parsing a template string.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TemplateError {
    /// Brackets in the template are not balanced.
    Malformed {
        template: String,
        position: usize,
        reason: &'static str,
    },
    /// The same field name was used more than once.
    DuplicateFieldName { name: String },
}

impl Display for TemplateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::Malformed {
                template,
                position,
                reason,
            } => write!(
                f,
                "Malformed template `{}` at position {}: {}",
                template, position, reason
            ),
            TemplateError::DuplicateFieldName { name } => {
                write!(f, "Repeated field name in template: `{}`", name)
            }
        }
    }
}

impl Error for TemplateError {}

/// The result of a template parsing operation.
pub type TemplateResult<T> = Result<T, TemplateError>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum TemplateToken {
    Field(String),
    Literal(String),
}

/// A single field of a [`Template`] together with the literal text that
/// follows it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TemplateEntry<'a> {
    /// Name of the field.
    pub field_name: &'a str,
    /// Literal text after the field; empty if the field extends to the end of
    /// the identifier, or if it is directly followed by another field.
    pub trailing_separator: &'a str,
}

/// Parsed description of how fields are laid out inside a read identifier.
///
/// A template is a sequence of literal separators interleaved with field names
/// enclosed in angle brackets, for instance `<instrument>:<run>/<sense>`.
///
/// # Examples
/// ```
/// use fqanon::template::Template;
///
/// let template = Template::parse("<instrument>:<run>/<sense>").unwrap();
/// assert_eq!(
///     template.field_names().collect::<Vec<_>>(),
///     ["instrument", "run", "sense"]
/// );
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Template {
    tokens: Vec<TemplateToken>,
}

impl Template {
    /// Parses a template string.
    ///
    /// Fails with [`TemplateError::Malformed`] on unbalanced or nested
    /// brackets, and with [`TemplateError::DuplicateFieldName`] if a field
    /// name occurs more than once.
    pub fn parse(template: &str) -> TemplateResult<Self> {
        let mut tokens = Vec::new();
        let mut seen = HashSet::new();
        let mut current = String::new();
        let mut field_start: Option<usize> = None;

        for (position, ch) in template.char_indices() {
            match (ch, field_start) {
                (FIELD_START, None) => {
                    if !current.is_empty() {
                        tokens.push(TemplateToken::Literal(std::mem::take(&mut current)));
                    }
                    field_start = Some(position);
                }
                (FIELD_START, Some(_)) => {
                    return Err(Self::malformed(template, position, "nested `<`"));
                }
                (FIELD_END, None) => {
                    return Err(Self::malformed(template, position, "unmatched `>`"));
                }
                (FIELD_END, Some(_)) => {
                    let name = std::mem::take(&mut current);
                    if !seen.insert(name.clone()) {
                        return Err(TemplateError::DuplicateFieldName { name });
                    }
                    tokens.push(TemplateToken::Field(name));
                    field_start = None;
                }
                _ => current.push(ch),
            }
        }

        if let Some(position) = field_start {
            return Err(Self::malformed(template, position, "unmatched `<`"));
        }
        if !current.is_empty() {
            tokens.push(TemplateToken::Literal(current));
        }

        let template = Self { tokens };
        debug!(
            "Parsed template `{}` with {} fields",
            template,
            template.len()
        );
        Ok(template)
    }

    fn malformed(template: &str, position: usize, reason: &'static str) -> TemplateError {
        TemplateError::Malformed {
            template: template.to_owned(),
            position,
            reason,
        }
    }

    pub(crate) fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    /// Returns the literal text preceding the first field, if any.
    #[must_use]
    pub fn prefix(&self) -> &str {
        match self.tokens.first() {
            Some(TemplateToken::Literal(text)) => text,
            _ => "",
        }
    }

    /// Returns the field entries of this template, in order.
    pub fn entries(&self) -> impl Iterator<Item = TemplateEntry<'_>> {
        self.tokens
            .iter()
            .enumerate()
            .filter_map(move |(index, token)| match token {
                TemplateToken::Field(name) => {
                    let trailing_separator = match self.tokens.get(index + 1) {
                        Some(TemplateToken::Literal(text)) => text.as_str(),
                        _ => "",
                    };
                    Some(TemplateEntry {
                        field_name: name,
                        trailing_separator,
                    })
                }
                TemplateToken::Literal(_) => None,
            })
    }

    /// Returns the names of all fields, in template order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.entries().map(|entry| entry.field_name)
    }

    /// Returns `true` if the template defines a field with given name.
    #[must_use]
    pub fn contains_field(&self, name: &str) -> bool {
        self.field_names().any(|field_name| field_name == name)
    }

    /// Returns the number of fields in this template.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    /// Returns `true` if the template has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::parse(DEFAULT_TEMPLATE).expect("Default template must be valid")
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Template {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for token in &self.tokens {
            match token {
                TemplateToken::Field(name) => write!(f, "{}{}{}", FIELD_START, name, FIELD_END)?,
                TemplateToken::Literal(text) => write!(f, "{}", text)?,
            }
        }
        Ok(())
    }
}
