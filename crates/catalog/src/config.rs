use serde::Deserialize;

use crate::classify::Vocabulary;
use crate::error::CatalogError;
use crate::model::Role;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Settings loaded from `pricelens.toml`. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub source: SourceConfig,
    pub numbers: NumberConfig,
    pub vocabulary: VocabularyConfig,
    pub report: ReportConfig,
}

// ---------------------------------------------------------------------------
// Source discovery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub directory: String,
    /// Case-sensitive token a file name must contain.
    pub name_contains: String,
    /// File extension without the dot, compared case-sensitively.
    pub extension: String,
    pub delimiter: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            directory: ".".into(),
            name_contains: "price".into(),
            extension: "csv".into(),
            delimiter: ",".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// How price and weight cells are parsed after `,` → `.` substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberPolicy {
    /// Full decimal parsing: `12,5` is 12.5.
    #[default]
    Fractional,
    /// Whole numbers only: `12,5` is rejected.
    Whole,
}

impl std::fmt::Display for NumberPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fractional => write!(f, "fractional"),
            Self::Whole => write!(f, "whole"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NumberConfig {
    pub policy: NumberPolicy,
}

// ---------------------------------------------------------------------------
// Vocabulary + Report
// ---------------------------------------------------------------------------

/// Per-role keyword overrides. A present list replaces that role's defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VocabularyConfig {
    pub product: Option<Vec<String>>,
    pub price: Option<Vec<String>>,
    pub weight: Option<Vec<String>>,
}

impl VocabularyConfig {
    fn get(&self, role: Role) -> Option<&Vec<String>> {
        match role {
            Role::Product => self.product.as_ref(),
            Role::Price => self.price.as_ref(),
            Role::Weight => self.weight.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub output: String,
    pub title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: "output.html".into(),
            title: "Product prices".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Ingest view
// ---------------------------------------------------------------------------

/// What the catalog builder needs, resolved from [`Settings`].
#[derive(Debug, Clone)]
pub struct IngestSettings {
    pub name_contains: String,
    pub extension: String,
    pub delimiter: u8,
    pub policy: NumberPolicy,
    pub vocabulary: Vocabulary,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            name_contains: "price".into(),
            extension: "csv".into(),
            delimiter: b',',
            policy: NumberPolicy::Fractional,
            vocabulary: Vocabulary::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl Settings {
    pub fn from_toml(input: &str) -> Result<Self, CatalogError> {
        let settings: Settings =
            toml::from_str(input).map_err(|e| CatalogError::ConfigParse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.source.name_contains.is_empty() {
            return Err(CatalogError::ConfigValidation(
                "source.name_contains must not be empty".into(),
            ));
        }
        if self.source.extension.is_empty() {
            return Err(CatalogError::ConfigValidation(
                "source.extension must not be empty".into(),
            ));
        }
        parse_delimiter(&self.source.delimiter)?;

        for role in Role::ALL {
            if let Some(keywords) = self.vocabulary.get(role) {
                if keywords.is_empty() {
                    return Err(CatalogError::ConfigValidation(format!(
                        "vocabulary.{role}: keyword list must not be empty"
                    )));
                }
                if keywords.iter().any(|k| k.trim().is_empty()) {
                    return Err(CatalogError::ConfigValidation(format!(
                        "vocabulary.{role}: keywords must not be blank"
                    )));
                }
            }
        }

        if self.report.output.is_empty() {
            return Err(CatalogError::ConfigValidation(
                "report.output must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Keyword table with config overrides applied over the defaults.
    pub fn vocabulary(&self) -> Vocabulary {
        let defaults = Vocabulary::default();
        let pick = |role: Role| -> Vec<String> {
            match self.vocabulary.get(role) {
                Some(keywords) => keywords.clone(),
                None => defaults.keywords(role).to_vec(),
            }
        };
        Vocabulary::new(pick(Role::Product), pick(Role::Price), pick(Role::Weight))
    }

    pub fn ingest_settings(&self) -> Result<IngestSettings, CatalogError> {
        Ok(IngestSettings {
            name_contains: self.source.name_contains.clone(),
            extension: self.source.extension.clone(),
            delimiter: parse_delimiter(&self.source.delimiter)?,
            policy: self.numbers.policy,
            vocabulary: self.vocabulary(),
        })
    }
}

fn parse_delimiter(value: &str) -> Result<u8, CatalogError> {
    match value.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(CatalogError::ConfigValidation(format!(
            "source.delimiter must be a single ASCII character, got {value:?}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
