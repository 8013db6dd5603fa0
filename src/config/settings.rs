//! TOML-based configuration for sieve.
//!
//! Supports a config file (sieve.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [where]
//! dialect = "${SIEVE_DIALECT}"
//! bind_mode = "parameterized"
//! timezone = "+02:00"
//! table_prefix = "User"
//!
//! [[where.attributes]]
//! name = "metaData"
//! field = "meta_data"
//! type = "jsonb"
//!
//! [[where.attributes]]
//! name = "reservedSeats"
//! type = "range(integer)"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};

use crate::compile::CompileOptions;
use crate::sql::attribute::{AttributeMeta, ModelAttributes};
use crate::sql::dialect::Dialect;
use crate::sql::token::BindMode;
use crate::sql::types::DataType;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),

    #[error("Invalid timezone offset: {0}")]
    InvalidTimezone(String),

    #[error("Invalid type for attribute {attribute}: {ty}")]
    InvalidType { attribute: String, ty: String },
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// WHERE compilation defaults.
    #[serde(rename = "where")]
    pub where_clause: WhereSettings,
}

/// `[where]` table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WhereSettings {
    /// Target dialect name (supports ${ENV_VAR} expansion).
    pub dialect: String,

    /// `inline` or `parameterized`.
    pub bind_mode: BindMode,

    /// Offset for date literals: `+HH:MM`, `-HH:MM`, `Z` or `UTC`.
    pub timezone: String,

    /// Table qualifier for attribute keys.
    pub table_prefix: Option<String>,

    /// Pre-quoted qualifier, written verbatim. Wins over `table_prefix`.
    pub raw_prefix: Option<String>,

    /// Declared attributes. When non-empty, unknown keys are rejected.
    pub attributes: Vec<AttributeSettings>,
}

impl Default for WhereSettings {
    fn default() -> Self {
        Self {
            dialect: "postgres".to_string(),
            bind_mode: BindMode::Inline,
            timezone: "+00:00".to_string(),
            table_prefix: None,
            raw_prefix: None,
            attributes: Vec::new(),
        }
    }
}

/// One declared attribute.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AttributeSettings {
    pub name: String,

    /// Physical column name, when it differs from `name`.
    #[serde(default)]
    pub field: Option<String>,

    /// Type name as accepted by `DataType::parse` (`jsonb`, `integer[]`, `range(date)`).
    #[serde(default, rename = "type")]
    pub ty: Option<String>,

    /// Table qualifier for this attribute when used as an operand.
    #[serde(default)]
    pub table: Option<String>,
}

impl AttributeSettings {
    pub fn to_meta(&self) -> Result<AttributeMeta, SettingsError> {
        let mut meta = AttributeMeta::new(self.name.clone());
        if let Some(field) = &self.field {
            meta = meta.with_field(field.clone());
        }
        if let Some(table) = &self.table {
            meta = meta.with_table(table.clone());
        }
        if let Some(ty) = &self.ty {
            let parsed = DataType::parse(ty).ok_or_else(|| SettingsError::InvalidType {
                attribute: self.name.clone(),
                ty: ty.clone(),
            })?;
            meta = meta.with_type(parsed);
        }
        Ok(meta)
    }
}

impl WhereSettings {
    /// Get the dialect with environment variables expanded.
    pub fn dialect(&self) -> Result<Dialect, SettingsError> {
        let name = expand_env_vars(&self.dialect)?;
        Dialect::from_str(&name).map_err(|_| SettingsError::UnsupportedDialect(name))
    }

    /// Parse the configured offset.
    pub fn timezone(&self) -> Result<FixedOffset, SettingsError> {
        let text = expand_env_vars(&self.timezone)?;
        match text.trim() {
            "Z" | "z" | "UTC" | "utc" => Ok(Utc.fix()),
            other => {
                FixedOffset::from_str(other).map_err(|_| SettingsError::InvalidTimezone(text.clone()))
            }
        }
    }

    /// Declared attributes as a lookup, or `None` when none are declared.
    pub fn model(&self) -> Result<Option<ModelAttributes>, SettingsError> {
        if self.attributes.is_empty() {
            return Ok(None);
        }
        let mut model = ModelAttributes::new();
        for attribute in &self.attributes {
            model.insert(attribute.to_meta()?);
        }
        Ok(Some(model))
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        content.parse()
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SIEVE_CONFIG`
    /// 2. `./sieve.toml`
    /// 3. `~/.config/sieve/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        // Check environment variable first
        if let Ok(path) = env::var("SIEVE_CONFIG") {
            return Self::from_file(&path);
        }

        // Check local directory
        let local_config = PathBuf::from("sieve.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        // Check user config directory
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("sieve").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Return defaults if no config file found
        Ok(Settings::default())
    }

    /// Build compile options from the `[where]` table.
    pub fn to_options(&self) -> Result<CompileOptions, SettingsError> {
        let settings = &self.where_clause;
        let mut opts = CompileOptions::new(settings.dialect()?).with_timezone(settings.timezone()?);
        opts.bind_mode = settings.bind_mode;

        if let Some(raw) = &settings.raw_prefix {
            opts = opts.with_raw_prefix(expand_env_vars(raw)?);
        } else if let Some(table) = &settings.table_prefix {
            opts = opts.with_table_prefix(expand_env_vars(table)?);
        }

        if let Some(model) = settings.model()? {
            opts = opts.with_model(Arc::new(model));
        }
        Ok(opts)
    }
}

impl FromStr for Settings {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            // $VAR ends at the first non-alphanumeric, non-underscore char
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                var_name.push(ch);
            }
            if var_name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
