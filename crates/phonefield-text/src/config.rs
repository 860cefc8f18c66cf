//! Format configuration: prefix, insertion table, and digit limits.
//!
//! A [`FormatConfig`] is an immutable value. Controllers replace it
//! wholesale rather than editing it, so a formatting pass in flight always
//! sees one consistent configuration.
//!
//! # Construction
//!
//! ```
//! use phonefield_text::{FormatConfig, InsertionTable};
//!
//! let config = FormatConfig::builder()
//!     .prefix("+7 ")
//!     .insertions(InsertionTable::braces_and_dashes())
//!     .max_digits(10)
//!     .required_digits(10)
//!     .build()?;
//! assert_eq!(config.prefix(), Some("+7 "));
//! # Ok::<(), phonefield_text::ConfigError>(())
//! ```
//!
//! # Policy files
//!
//! With the `policy-config` feature a configuration can be loaded from TOML
//! or JSON. Both run the same validation as the builder:
//!
//! ```toml
//! prefix = "+7 "
//! max_digits = 10
//! required_digits = 10
//! insertions = [
//!     { position = 0, text = "(" },
//!     { position = 3, text = ") " },
//! ]
//! ```

use crate::digits::char_len;
use crate::error::ConfigError;
#[cfg(feature = "serde")]
use crate::insertion::InsertionRule;
use crate::insertion::InsertionTable;

/// Digit count of a full national number in the default configuration.
pub const FULL_NUMBER_DIGITS_COUNT: usize = 10;

/// Country-code prefix used by [`FormatConfig::ru`].
pub const COUNTRY_CODE_PREFIX_RU: &str = "+7 ";

/// Immutable formatting configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawFormatConfig", into = "RawFormatConfig"))]
pub struct FormatConfig {
    prefix: Option<String>,
    insertions: InsertionTable,
    max_digits: usize,
    required_digits: usize,
}

impl FormatConfig {
    /// Start building a configuration. Unset fields take the
    /// [`Default`] values.
    #[must_use]
    pub fn builder() -> FormatConfigBuilder {
        FormatConfigBuilder::default()
    }

    /// `+7 (916) 123 45 67`: Russian country code, braces, ten digits.
    #[must_use]
    pub fn ru() -> Self {
        Self {
            prefix: Some(COUNTRY_CODE_PREFIX_RU.to_owned()),
            insertions: InsertionTable::braces(),
            max_digits: FULL_NUMBER_DIGITS_COUNT,
            required_digits: FULL_NUMBER_DIGITS_COUNT,
        }
    }

    /// The fixed prefix, if any. Never `Some("")`.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Length of the prefix in chars (0 when absent).
    #[must_use]
    pub fn prefix_len(&self) -> usize {
        self.prefix.as_deref().map_or(0, char_len)
    }

    /// The insertion table.
    #[must_use]
    pub fn insertions(&self) -> &InsertionTable {
        &self.insertions
    }

    /// Maximum number of digits accepted while typing.
    #[must_use]
    pub fn max_digits(&self) -> usize {
        self.max_digits
    }

    /// Digit count a number must have to be valid.
    #[must_use]
    pub fn required_digits(&self) -> usize {
        self.required_digits
    }

    /// Copy with a different prefix. An empty prefix means none.
    #[must_use]
    pub fn with_prefix(&self, prefix: Option<&str>) -> Self {
        Self {
            prefix: normalize_prefix(prefix.map(str::to_owned)),
            ..self.clone()
        }
    }

    /// Copy with a different insertion table.
    #[must_use]
    pub fn with_insertions(&self, insertions: InsertionTable) -> Self {
        Self {
            insertions,
            ..self.clone()
        }
    }

    /// Copy with a different digit cap.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroMaxDigits`] when `max_digits == 0`.
    pub fn with_max_digits(&self, max_digits: usize) -> Result<Self, ConfigError> {
        Self::builder()
            .from_config(self)
            .max_digits(max_digits)
            .build()
    }

    /// Copy with a different required digit count.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroRequiredDigits`] when `required_digits == 0`.
    pub fn with_required_digits(&self, required_digits: usize) -> Result<Self, ConfigError> {
        Self::builder()
            .from_config(self)
            .required_digits(required_digits)
            .build()
    }

    /// Parse a TOML policy document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on syntax errors, or the validation
    /// error for a well-formed but invalid policy.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let raw: RawFormatConfig = toml::from_str(s).map_err(|e| ConfigError::Toml(e.to_string()))?;
        Self::try_from(raw)
    }

    /// Parse a JSON policy document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] on syntax errors, or the validation
    /// error for a well-formed but invalid policy.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let raw: RawFormatConfig =
            serde_json::from_str(s).map_err(|e| ConfigError::Json(e.to_string()))?;
        Self::try_from(raw)
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::ru()
    }
}

fn normalize_prefix(prefix: Option<String>) -> Option<String> {
    prefix.filter(|p| !p.is_empty())
}

/// Builder for [`FormatConfig`].
#[derive(Debug, Clone)]
pub struct FormatConfigBuilder {
    prefix: Option<String>,
    insertions: InsertionTable,
    max_digits: usize,
    required_digits: usize,
}

impl Default for FormatConfigBuilder {
    fn default() -> Self {
        Self::new().from_config(&FormatConfig::default())
    }
}

impl FormatConfigBuilder {
    fn new() -> Self {
        Self {
            prefix: None,
            insertions: InsertionTable::empty(),
            max_digits: FULL_NUMBER_DIGITS_COUNT,
            required_digits: FULL_NUMBER_DIGITS_COUNT,
        }
    }

    fn from_config(mut self, config: &FormatConfig) -> Self {
        self.prefix.clone_from(&config.prefix);
        self.insertions = config.insertions.clone();
        self.max_digits = config.max_digits;
        self.required_digits = config.required_digits;
        self
    }

    /// Set the fixed prefix. An empty string clears it.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Remove the fixed prefix.
    #[must_use]
    pub fn no_prefix(mut self) -> Self {
        self.prefix = None;
        self
    }

    /// Set the insertion table.
    #[must_use]
    pub fn insertions(mut self, insertions: InsertionTable) -> Self {
        self.insertions = insertions;
        self
    }

    /// Set the digit cap.
    #[must_use]
    pub fn max_digits(mut self, max_digits: usize) -> Self {
        self.max_digits = max_digits;
        self
    }

    /// Set the digit count required for validity.
    #[must_use]
    pub fn required_digits(mut self, required_digits: usize) -> Self {
        self.required_digits = required_digits;
        self
    }

    /// Validate and build.
    ///
    /// A configuration whose `required_digits` exceeds `max_digits` can
    /// never validate; it is accepted but logged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroMaxDigits`] or
    /// [`ConfigError::ZeroRequiredDigits`] for zero limits.
    pub fn build(self) -> Result<FormatConfig, ConfigError> {
        if self.max_digits == 0 {
            return Err(ConfigError::ZeroMaxDigits);
        }
        if self.required_digits == 0 {
            return Err(ConfigError::ZeroRequiredDigits);
        }
        if self.required_digits > self.max_digits {
            tracing::warn!(
                required = self.required_digits,
                max = self.max_digits,
                "format config can never validate: required digits exceed max digits"
            );
        }
        Ok(FormatConfig {
            prefix: normalize_prefix(self.prefix),
            insertions: self.insertions,
            max_digits: self.max_digits,
            required_digits: self.required_digits,
        })
    }
}

// ---------------------------------------------------------------------------
// Serde shape
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawInsertion {
    position: usize,
    text: String,
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFormatConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
    #[serde(default)]
    insertions: Vec<RawInsertion>,
    #[serde(default = "default_digits")]
    max_digits: usize,
    #[serde(default = "default_digits")]
    required_digits: usize,
}

#[cfg(feature = "serde")]
fn default_digits() -> usize {
    FULL_NUMBER_DIGITS_COUNT
}

#[cfg(feature = "serde")]
impl TryFrom<RawFormatConfig> for FormatConfig {
    type Error = ConfigError;

    fn try_from(raw: RawFormatConfig) -> Result<Self, Self::Error> {
        let insertions = raw
            .insertions
            .into_iter()
            .map(|r| InsertionRule::new(r.position, r.text))
            .collect::<Result<Vec<_>, _>>()?;
        let mut builder = FormatConfigBuilder::new()
            .insertions(InsertionTable::new(insertions))
            .max_digits(raw.max_digits)
            .required_digits(raw.required_digits);
        if let Some(prefix) = raw.prefix {
            builder = builder.prefix(prefix);
        }
        builder.build()
    }
}

#[cfg(feature = "serde")]
impl From<FormatConfig> for RawFormatConfig {
    fn from(config: FormatConfig) -> Self {
        Self {
            insertions: config
                .insertions
                .rules()
                .iter()
                .map(|r: &InsertionRule| RawInsertion {
                    position: r.position(),
                    text: r.text().to_owned(),
                })
                .collect(),
            prefix: config.prefix,
            max_digits: config.max_digits,
            required_digits: config.required_digits,
        }
    }
}
