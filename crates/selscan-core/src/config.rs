use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration from `.selscan.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Source discovery settings for directory walks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_exclude_patterns")]
    pub exclude: Vec<String>,
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "**/node_modules/**".to_string(),
        "**/vendor/**".to_string(),
        "**/*.min.css".to_string(),
    ]
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            exclude: default_exclude_patterns(),
        }
    }
}

/// Report shaping settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Absent, a single include name, or a list of names.
    #[serde(default)]
    pub include: IncludeArg,
    #[serde(default)]
    pub format: OutputFormat,
}

/// The include option as users write it: nothing, one name, or a list.
/// Normalized to a plain list exactly once, at the API boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IncludeArg {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl IncludeArg {
    pub fn normalize(&self) -> Vec<String> {
        match self {
            IncludeArg::None => Vec::new(),
            IncludeArg::One(name) => vec![name.clone()],
            IncludeArg::Many(names) => names.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow::anyhow!("unknown output format: {s}")),
        }
    }
}

impl Config {
    /// Load configuration from a `.selscan.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "failed to parse '{}'. Run `selscan init` to create a valid config file",
                path.display()
            )
        })?;
        Ok(config)
    }

    /// Load from `.selscan.toml` in the given directory or any ancestor, or
    /// return defaults.
    pub fn load_or_default(dir: &Path) -> Self {
        let start = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        let mut current = start.as_path();
        loop {
            let config_path = current.join(".selscan.toml");
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!(
                            "Warning: failed to load config from '{}': {e:#}. Using defaults.",
                            config_path.display()
                        );
                        Self::default()
                    }
                };
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        Self::default()
    }

    /// Generate default TOML content for `selscan init`.
    pub fn default_toml() -> String {
        r#"# selscan - Selector Inventory Configuration

[sources]
# Glob patterns excluded when a directory is walked for stylesheets
exclude = ["**/node_modules/**", "**/vendor/**", "**/*.min.css"]

[report]
# Narrow the report to named views. Accepts one name or a list drawn from:
# selectors, simpleSelectors, simple, classes, ids, attributes, types
# include = ["classes", "ids"]

# Output format: "text" or "json"
format = "text"
"#
        .to_string()
    }
}
