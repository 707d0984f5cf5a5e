use crate::{error::GeneratorError, lower_bound::ThresholdSearch, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Seed draws allowed per group before placement gives up.
pub const DEFAULT_MAX_RETRIES: u64 = 1_000_000;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Picat,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Picat => "pi",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "picat" => Ok(Self::Picat),
            "json" => Ok(Self::Json),
            _ => Err(GeneratorError::Config(format!(
                "Unknown output format '{}', expected 'picat' or 'json'",
                s
            ))),
        }
    }
}

fn default_maps_dir() -> PathBuf {
    PathBuf::from("maps")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("instances")
}

fn default_max_retries() -> Option<u64> {
    Some(DEFAULT_MAX_RETRIES)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// File name of the map inside `maps_dir`
    pub map: String,
    pub teams: usize,
    pub agents_per_team: usize,
    pub instances: usize,
    pub seed: u64,
    #[serde(default = "default_maps_dir")]
    pub maps_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub search: ThresholdSearch,
    /// `None` retries forever
    #[serde(default = "default_max_retries")]
    pub max_retries: Option<u64>,
    #[serde(default)]
    pub format: OutputFormat,
}

impl GeneratorSettings {
    pub fn new(map: &str, teams: usize, agents_per_team: usize, instances: usize, seed: u64) -> Self {
        Self {
            map: map.to_string(),
            teams,
            agents_per_team,
            instances,
            seed,
            maps_dir: default_maps_dir(),
            output_dir: default_output_dir(),
            search: ThresholdSearch::default(),
            max_retries: default_max_retries(),
            format: OutputFormat::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.map.is_empty() {
            return Err(GeneratorError::Config("Map name must not be empty".to_string()));
        }
        if self.teams == 0 {
            return Err(GeneratorError::Config("Number of teams must be at least 1".to_string()));
        }
        if self.agents_per_team == 0 {
            return Err(GeneratorError::Config(
                "Agents per team must be at least 1".to_string(),
            ));
        }
        if self.instances == 0 {
            return Err(GeneratorError::Config(
                "Number of instances must be at least 1".to_string(),
            ));
        }
        if self.max_retries == Some(0) {
            return Err(GeneratorError::Config("Max retries must be at least 1".to_string()));
        }
        Ok(())
    }

    /// `<map>_<teams>_<agents>_<index>.<ext>`, counts zero-padded to two digits.
    pub fn instance_file_name(&self, index: usize) -> String {
        format!(
            "{}_{:02}_{:02}_{}.{}",
            self.map,
            self.teams,
            self.agents_per_team,
            index,
            self.format.extension()
        )
    }

    pub fn instance_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(self.instance_file_name(index))
    }
}
