// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::load_config::{find_in_parent, resolve_config_path};
use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use sg_fhe_params::SecurityLevel;
use sg_genotype::VariantPanel;
use std::{env, path::PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "securegenomics.config.yaml";
pub const ENV_PREFIX: &str = "SECUREGENOMICS_";

/// Settings for one aggregation run.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AppConfig {
    /// The two target variants, in slot order
    #[serde(default)]
    pub variants: VariantPanel,
    #[serde(default)]
    pub security: SecurityLevel,
    /// Multiplications the evaluated circuit needs. Summation needs none.
    #[serde(default)]
    pub multiplicative_depth: usize,
    /// Largest plausible number of samples across all parties. Decrypted
    /// counts above it are treated as corruption.
    #[serde(default = "default_max_plausible_samples")]
    pub max_plausible_samples: u64,
    #[serde(default = "default_max_parties")]
    pub max_parties: usize,
    #[serde(default)]
    pub parallel_aggregation: bool,
    /// File the configuration was read from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

fn default_max_plausible_samples() -> u64 {
    100_000
}

fn default_max_parties() -> usize {
    1024
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            variants: VariantPanel::default(),
            security: SecurityLevel::default(),
            multiplicative_depth: 0,
            max_plausible_samples: default_max_plausible_samples(),
            max_parties: default_max_parties(),
            parallel_aggregation: false,
            config_file: None,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_plausible_samples == 0 {
            bail!("max_plausible_samples must be greater than zero");
        }
        if self.max_parties == 0 {
            bail!("max_parties must be greater than zero");
        }
        for variant in self.variants.iter() {
            variant
                .validate()
                .with_context(|| format!("Invalid variant '{}' in configuration", variant.name))?;
        }
        Ok(())
    }
}

/// Loads defaults, then the YAML file, then `SECUREGENOMICS_*` environment variables.
pub fn load_config(config_file: Option<String>) -> Result<AppConfig> {
    let resolved = resolve_config_path(
        find_in_parent,
        env::current_dir()?,
        DEFAULT_CONFIG_NAME,
        config_file.map(PathBuf::from),
    );

    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
    if let Some(path) = &resolved {
        if !path.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Configuration file not found: {}", path.display()),
            )
            .into());
        }
        debug!(path = %path.display(), "Loading configuration file");
        figment = figment
            .merge(Yaml::file(path))
            .merge(Serialized::default("config_file", path));
    }

    let config: AppConfig = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("Could not parse configuration")?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_| {
            let config = load_config(None).map_err(|e| e.to_string())?;
            assert_eq!(config.variants, VariantPanel::brca());
            assert_eq!(config.security, SecurityLevel::Bits128);
            assert_eq!(config.multiplicative_depth, 0);
            assert_eq!(config.max_plausible_samples, 100_000);
            assert_eq!(config.max_parties, 1024);
            assert!(!config.parallel_aggregation);
            assert_eq!(config.config_file, None);
            Ok(())
        });
    }

    #[test]
    fn test_yaml_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_NAME,
                r#"
security: insecure
max_plausible_samples: 5000
parallel_aggregation: true
"#,
            )?;
            jail.create_dir("nested")?;
            jail.change_dir("nested")?;

            let config = load_config(None).map_err(|e| e.to_string())?;
            assert_eq!(config.security, SecurityLevel::Insecure);
            assert_eq!(config.max_plausible_samples, 5000);
            assert!(config.parallel_aggregation);
            assert!(config.config_file.is_some());

            jail.set_env("SECUREGENOMICS_MAX_PLAUSIBLE_SAMPLES", "250");
            let config = load_config(None).map_err(|e| e.to_string())?;
            assert_eq!(config.max_plausible_samples, 250);
            assert_eq!(config.security, SecurityLevel::Insecure);
            Ok(())
        });
    }

    #[test]
    fn test_custom_variants() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "panel.yaml",
                r#"
variants:
  - name: rs80357382
    gene: BRCA1
    locus: { chromosome: "17", position: 43106487 }
    reference: A
    alternate: C
  - name: rs80357906
    gene: BRCA1
    locus: { chromosome: "17", position: 43057063 }
    reference: C
    alternate: CG
"#,
            )?;
            let config = load_config(Some("panel.yaml".into())).map_err(|e| e.to_string())?;
            assert_eq!(config.variants.variants()[1].name, "rs80357906");
            Ok(())
        });
    }

    #[test]
    fn test_duplicate_variants_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "dup.yaml",
                r#"
variants:
  - { name: rs80357382, gene: BRCA1, locus: { chromosome: "17", position: 43106487 }, reference: A, alternate: C }
  - { name: rs80357382, gene: BRCA1, locus: { chromosome: "17", position: 43106487 }, reference: A, alternate: C }
"#,
            )?;
            assert!(load_config(Some("dup.yaml".into())).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_zero_ceiling_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("SECUREGENOMICS_MAX_PLAUSIBLE_SAMPLES", "0");
            assert!(load_config(None).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_file_not_found() -> Result<()> {
        let Err(err) = load_config(Some("/nope/securegenomics.yaml".to_string())) else {
            bail!("error expected");
        };
        let Some(e) = err.downcast_ref::<std::io::Error>() else {
            bail!("io error expected");
        };
        assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
        Ok(())
    }
}
