//! Scenario configuration: the framework, sampling parameters, and pinned
//! weights, loaded from a TOML file. A missing file is replaced by a written
//! template so a first run always has something to edit.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::framework::{ArgumentSet, Attack};
use crate::core::sampler::SampleParams;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkConfig {
    #[serde(default = "FrameworkConfig::default_arguments")]
    pub arguments: Vec<String>,
    /// Attack relation in `(attacker,target)` pair syntax, e.g. "(B,A),(C,B)".
    #[serde(default = "FrameworkConfig::default_relations")]
    pub relations: String,
}

impl FrameworkConfig {
    fn default_arguments() -> Vec<String> {
        vec!["A".into(), "B".into(), "C".into()]
    }
    fn default_relations() -> String {
        "(B,A),(C,B)".into()
    }
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            arguments: Self::default_arguments(),
            relations: Self::default_relations(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    #[serde(default = "SamplingConfig::default_n_samples")]
    pub n_samples: usize,
    #[serde(default = "SamplingConfig::default_seed")]
    pub seed: u64,
    #[serde(default = "SamplingConfig::default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "SamplingConfig::default_max_iter")]
    pub max_iter: u32,
    /// Worker threads for the solve phase; 1 = sequential.
    #[serde(default = "SamplingConfig::default_workers")]
    pub workers: usize,
}

impl SamplingConfig {
    fn default_n_samples() -> usize {
        10_000
    }
    fn default_seed() -> u64 {
        42
    }
    fn default_epsilon() -> f64 {
        1e-4
    }
    fn default_max_iter() -> u32 {
        1000
    }
    fn default_workers() -> usize {
        1
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            n_samples: Self::default_n_samples(),
            seed: Self::default_seed(),
            epsilon: Self::default_epsilon(),
            max_iter: Self::default_max_iter(),
            workers: Self::default_workers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunConfig {
    #[serde(default)]
    pub framework: FrameworkConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    /// Pinned weights, label -> value in [0, 1].
    #[serde(default)]
    pub controlled: BTreeMap<String, f64>,
}

impl RunConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a scenario, falling back to (and writing) defaults when the file
    /// is missing. Parse failures fall back without overwriting the file.
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match Self::from_toml_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        eprintln!("Failed to parse scenario {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    eprintln!("Failed to read scenario {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write a template and return the defaults.
        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                if let Err(err) = fs::write(path_obj, text) {
                    eprintln!("Failed to write default scenario to {path}: {err}");
                }
            }
            Err(err) => {
                eprintln!("Failed to serialize default scenario: {err}");
            }
        }
        default_cfg
    }

    pub fn argument_set(&self) -> Result<ArgumentSet> {
        ArgumentSet::new(self.framework.arguments.iter().cloned())
    }

    /// Parse the relation string and keep only pairs with both endpoints in
    /// the argument set, like the reference front end does. Dropped pairs are
    /// logged, not fatal.
    pub fn attacks(&self, set: &ArgumentSet) -> Result<Vec<Attack>> {
        let parsed = parse_relations(&self.framework.relations)?;
        let mut attacks = Vec::with_capacity(parsed.len());
        for attack in parsed {
            if set.contains(&attack.attacker) && set.contains(&attack.target) {
                attacks.push(attack);
            } else {
                warn!(
                    attacker = %attack.attacker,
                    target = %attack.target,
                    "dropping attack with endpoint outside the argument set"
                );
            }
        }
        Ok(attacks)
    }

    pub fn sample_params(&self) -> SampleParams {
        SampleParams {
            epsilon: self.sampling.epsilon,
            max_iter: self.sampling.max_iter,
            n_samples: self.sampling.n_samples,
            seed: self.sampling.seed,
        }
    }

    pub fn controlled_map(&self) -> HashMap<String, f64> {
        self.controlled
            .iter()
            .map(|(k, &v)| (k.clone(), v))
            .collect()
    }
}

/// Parse `"(B,A),(C,B)"` into attack pairs. Whitespace around labels and
/// separators is tolerated; anything else is a parse error.
pub fn parse_relations(s: &str) -> Result<Vec<Attack>> {
    let mut attacks = Vec::new();
    for chunk in s.split(')') {
        let chunk = chunk
            .trim()
            .trim_start_matches(',')
            .trim()
            .trim_start_matches('(')
            .trim();
        if chunk.is_empty() {
            continue;
        }
        let mut parts = chunk.split(',');
        let attacker = parts.next().map(str::trim).filter(|p| !p.is_empty());
        let target = parts.next().map(str::trim).filter(|p| !p.is_empty());
        match (attacker, target, parts.next()) {
            (Some(a), Some(t), None) => attacks.push(Attack::new(a, t)),
            _ => {
                return Err(Error::ParseRelations(format!(
                    "bad pair {chunk:?} in {s:?}"
                )))
            }
        }
    }
    Ok(attacks)
}
