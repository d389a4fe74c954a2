use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

use log::debug;
use rand::{Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use sha3::{Digest, Sha3_256};

use crate::identifier::{FieldMap, IdentifierError};
use crate::template::Template;

/// Default character placed between the token and each retained field value.
pub const DEFAULT_SEPARATOR: char = ':';

const SALT_LEN: usize = 16;
const TOKEN_HASH_LEN: usize = 8;
const TOKEN_RANDOM_RANGE: RangeInclusive<u32> = 1..=10_000_000;
const TOKEN_RANDOM_SEPARATOR: char = '_';

/// Error occurring when building an anonymized identifier.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AnonymizeError {
    /// The identifier could not be matched against the template.
    Identifier(IdentifierError),
    /// A field requested to be retained does not exist.
    UnknownRetainedField { field: String },
}

impl From<IdentifierError> for AnonymizeError {
    fn from(e: IdentifierError) -> Self {
        Self::Identifier(e)
    }
}

impl Display for AnonymizeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AnonymizeError::Identifier(e) => write!(f, "Could not parse identifier: {}", e),
            AnonymizeError::UnknownRetainedField { field } => {
                write!(f, "Retained field `{}` not found in the template", field)
            }
        }
    }
}

impl Error for AnonymizeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AnonymizeError::Identifier(e) => Some(e),
            _ => None,
        }
    }
}

/// The result of an anonymization operation.
pub type AnonymizeResult<T> = Result<T, AnonymizeError>;

/// Fields allowed to survive anonymization, in output order, together with
/// the character used to join them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RetentionPolicy {
    fields: Vec<String>,
    separator: char,
}

impl RetentionPolicy {
    /// Creates a new instance of `RetentionPolicy`.
    ///
    /// # Examples
    /// ```
    /// use fqanon::anonymizer::RetentionPolicy;
    ///
    /// let policy = RetentionPolicy::new(["sense"], '_');
    /// assert_eq!(policy.fields(), ["sense"]);
    /// assert_eq!(policy.separator(), '_');
    /// ```
    #[must_use]
    pub fn new<I, S>(fields: I, separator: char) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            separator,
        }
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Returns `true` if no fields are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::new(Vec::<String>::new(), DEFAULT_SEPARATOR)
    }
}

/// Truncated, salted hash of an identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
struct TokenHash([u8; TOKEN_HASH_LEN]);

impl Display for TokenHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for val in &self.0 {
            write!(f, "{:02x}", val)?;
        }
        Ok(())
    }
}

/// Replaces read identifiers with pseudonymous tokens, keeping only the
/// fields listed in a [`RetentionPolicy`].
///
/// A token has the form `HASH_RAND`: `HASH` is the beginning of the SHA3-256
/// hash of the identifier, salted with a value drawn once per anonymizer, and
/// `RAND` is a number drawn for every identifier. Hence the same identifier
/// never produces the same token twice, and the hash part cannot be recomputed
/// without knowing the salt.
///
/// # Examples
/// ```
/// use fqanon::anonymizer::{Anonymizer, RetentionPolicy};
/// use fqanon::template::Template;
///
/// let template = Template::parse("<instrument>:<run>/<sense>").unwrap();
/// let mut anonymizer = Anonymizer::with_seed(RetentionPolicy::new(["sense"], ':'), 42);
///
/// let anonymized = anonymizer
///     .anonymize_identifier("HWI-D00119:50/2", &template)
///     .unwrap();
/// assert!(anonymized.ends_with(":2"));
/// assert!(!anonymized.contains("HWI-D00119"));
/// ```
#[derive(Debug)]
pub struct Anonymizer<R = Xoshiro256PlusPlus> {
    policy: RetentionPolicy,
    salt: [u8; SALT_LEN],
    rng: R,
}

impl Anonymizer<Xoshiro256PlusPlus> {
    /// Creates an anonymizer with a randomness source seeded from the
    /// operating system.
    #[must_use]
    pub fn from_entropy(policy: RetentionPolicy) -> Self {
        Self::new(policy, Xoshiro256PlusPlus::from_entropy())
    }

    /// Creates an anonymizer producing the same output for the same seed and
    /// input.
    #[must_use]
    pub fn with_seed(policy: RetentionPolicy, seed: u64) -> Self {
        Self::new(policy, Xoshiro256PlusPlus::seed_from_u64(seed))
    }
}

impl<R: RngCore> Anonymizer<R> {
    /// Creates an anonymizer drawing its salt and per-identifier random values
    /// from `rng`.
    #[must_use]
    pub fn new(policy: RetentionPolicy, mut rng: R) -> Self {
        let mut salt = [0; SALT_LEN];
        rng.fill_bytes(&mut salt);
        debug!(
            "Retaining fields {:?} joined with `{}`",
            policy.fields(),
            policy.separator()
        );

        Self { policy, salt, rng }
    }

    /// Verifies that every retained field exists in `template`.
    pub fn check_policy(&self, template: &Template) -> AnonymizeResult<()> {
        match self
            .policy
            .fields()
            .iter()
            .find(|field| !template.contains_field(field))
        {
            Some(field) => Err(AnonymizeError::UnknownRetainedField {
                field: field.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Builds the replacement for `identifier`, given the fields already
    /// extracted from it.
    pub fn anonymize(&mut self, identifier: &str, fields: &FieldMap) -> AnonymizeResult<String> {
        let separator = self.policy.separator;

        let mut retained = String::new();
        for field in self.policy.fields() {
            let value = fields
                .get(field)
                .ok_or_else(|| AnonymizeError::UnknownRetainedField {
                    field: field.clone(),
                })?;
            retained.push(separator);
            retained.push_str(value);
        }

        let mut anonymized = self.token(identifier);
        anonymized.push_str(&retained);
        Ok(anonymized)
    }

    /// Parses `identifier` with `template` and builds its replacement.
    pub fn anonymize_identifier(
        &mut self,
        identifier: &str,
        template: &Template,
    ) -> AnonymizeResult<String> {
        let fields = template.parse_identifier(identifier)?;
        self.anonymize(identifier, &fields)
    }

    /// Returns a new pseudonymous token for `identifier`.
    pub fn token(&mut self, identifier: &str) -> String {
        let random = self.rng.gen_range(TOKEN_RANDOM_RANGE);
        format!(
            "{}{}{}",
            self.hash(identifier),
            TOKEN_RANDOM_SEPARATOR,
            random
        )
    }

    fn hash(&self, identifier: &str) -> TokenHash {
        let mut hasher = Sha3_256::new();
        hasher.update(self.salt);
        hasher.update(identifier.as_bytes());
        let digest = hasher.finalize();

        let mut hash = [0; TOKEN_HASH_LEN];
        hash.copy_from_slice(&digest[..TOKEN_HASH_LEN]);
        TokenHash(hash)
    }
}
