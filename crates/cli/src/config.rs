//! CLI runtime configuration.
//!
//! Resolved once at startup from the environment (after `.env` is loaded) and command-line
//! flags, then passed into the command handlers. Handlers never read the environment
//! themselves.

use anyhow::bail;
use std::fmt;
use std::str::FromStr;

/// Environment variable selecting the output format.
pub const OUTPUT_FORMAT_ENV: &str = "CASESIM_OUTPUT_FORMAT";

/// How snapshots and change logs are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => bail!("unsupported output format '{other}' (expected yaml or json)"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => f.write_str("yaml"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// CLI configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CliConfig {
    output_format: OutputFormat,
}

impl CliConfig {
    pub fn new(output_format: OutputFormat) -> Self {
        Self { output_format }
    }

    /// Resolve configuration from an explicit flag and the raw environment value.
    ///
    /// The flag wins over the environment. An empty or whitespace environment value counts as
    /// unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment value is set but not a known format.
    pub fn resolve(flag: Option<OutputFormat>, env_value: Option<String>) -> anyhow::Result<Self> {
        if let Some(format) = flag {
            return Ok(Self::new(format));
        }

        let env_value = env_value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let format = env_value
            .map(|v| v.parse::<OutputFormat>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self::new(format))
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }
}
