// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::builder::build_bfv_params_from_set_arc;
use crate::constants::{insecure_512, secure_4096, secure_8192, MAX_LOG_Q_128, PLAINTEXT_MODULUS};
use crate::errors::ParamsError;
use crate::noise::NoiseEstimate;
use fhe::bfv::BfvParameters;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Security level requested for a protocol run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    /// Small ring for tests and local experiments - DO NOT USE IN PRODUCTION
    Insecure,
    /// 128-bit classical security per the HomomorphicEncryption.org standard
    #[default]
    Bits128,
}

impl SecurityLevel {
    pub fn name(&self) -> &'static str {
        match self {
            SecurityLevel::Insecure => "insecure",
            SecurityLevel::Bits128 => "bits128",
        }
    }

    /// Presets offered at this level, smallest ring first.
    pub fn presets(&self) -> &'static [BfvPreset] {
        match self {
            SecurityLevel::Insecure => &[BfvPreset::InsecureBfv512],
            SecurityLevel::Bits128 => &[BfvPreset::SecureBfv4096, BfvPreset::SecureBfv8192],
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SecurityLevel {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insecure" => Ok(SecurityLevel::Insecure),
            "bits128" | "128" => Ok(SecurityLevel::Bits128),
            _ => Err(ParamsError::UnknownSecurityLevel(s.to_string())),
        }
    }
}

/// BFV preset configurations for carrier-count aggregation.
///
/// Every preset uses the same plaintext modulus so that the sanity ceiling on
/// decrypted counts does not depend on the ring size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BfvPreset {
    /// Degree 512 - DO NOT USE IN PRODUCTION
    InsecureBfv512,
    /// Degree 4096, 90-bit ciphertext modulus
    SecureBfv4096,
    /// Degree 8192, 207-bit ciphertext modulus
    SecureBfv8192,
}

/// Metadata describing a BFV preset configuration
#[derive(Debug, Clone, Copy)]
pub struct PresetMetadata {
    /// The canonical name of the preset (e.g., "SECURE_BFV_4096")
    pub name: &'static str,
    pub security_level: SecurityLevel,
    /// Degree of the polynomial ring R_q = Z_q[X]/(X^d + 1)
    pub degree: usize,
    pub plaintext_modulus: u64,
    pub noise: NoiseEstimate,
}

/// A complete BFV parameter set definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BfvParamSet {
    /// Degree of the polynomial ring, a power of 2
    pub degree: usize,
    /// Modulus of the plaintext space Z_t
    pub plaintext_modulus: u64,
    /// NTT-friendly ciphertext moduli q_i; q = ∏q_i
    pub moduli: &'static [u64],
}

impl BfvParamSet {
    pub fn build_arc(self) -> Result<Arc<BfvParameters>, ParamsError> {
        build_bfv_params_from_set_arc(self)
    }

    /// Largest count that decodes unambiguously in centered form.
    pub fn max_decodable_count(&self) -> u64 {
        (self.plaintext_modulus - 1) / 2
    }
}

impl BfvPreset {
    pub const ALL: [BfvPreset; 3] = [
        BfvPreset::InsecureBfv512,
        BfvPreset::SecureBfv4096,
        BfvPreset::SecureBfv8192,
    ];

    pub fn from_name(name: &str) -> Result<Self, ParamsError> {
        let normalized = name.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "INSECURE_BFV_512" => Ok(Self::InsecureBfv512),
            "SECURE_BFV_4096" => Ok(Self::SecureBfv4096),
            "SECURE_BFV_8192" => Ok(Self::SecureBfv8192),
            _ => Err(ParamsError::UnknownPreset(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BfvPreset::InsecureBfv512 => "INSECURE_BFV_512",
            BfvPreset::SecureBfv4096 => "SECURE_BFV_4096",
            BfvPreset::SecureBfv8192 => "SECURE_BFV_8192",
        }
    }

    pub fn list() -> Vec<&'static str> {
        Self::ALL.iter().map(BfvPreset::name).collect()
    }

    pub fn security_level(&self) -> SecurityLevel {
        match self {
            BfvPreset::InsecureBfv512 => SecurityLevel::Insecure,
            BfvPreset::SecureBfv4096 | BfvPreset::SecureBfv8192 => SecurityLevel::Bits128,
        }
    }

    pub fn param_set(&self) -> BfvParamSet {
        (*self).into()
    }

    pub fn noise_estimate(&self) -> NoiseEstimate {
        NoiseEstimate::for_param_set(&self.param_set())
    }

    pub fn metadata(&self) -> PresetMetadata {
        let set = self.param_set();
        PresetMetadata {
            name: self.name(),
            security_level: self.security_level(),
            degree: set.degree,
            plaintext_modulus: set.plaintext_modulus,
            noise: self.noise_estimate(),
        }
    }

    /// Checks the ciphertext modulus against the 128-bit bound for the ring degree.
    /// Insecure presets are not checked.
    pub fn check_security(&self) -> Result<(), ParamsError> {
        if self.security_level() == SecurityLevel::Insecure {
            return Ok(());
        }
        let set = self.param_set();
        let log_q = self.noise_estimate().log_q;
        let limit = MAX_LOG_Q_128
            .iter()
            .find(|(degree, _)| *degree == set.degree)
            .map(|(_, limit)| *limit)
            .unwrap_or(0.0);
        if log_q > limit {
            return Err(ParamsError::InsecureModulus {
                preset: self.name(),
                degree: set.degree,
                log_q,
                limit,
            });
        }
        Ok(())
    }

    pub fn build_arc(&self) -> Result<Arc<BfvParameters>, ParamsError> {
        self.param_set().build_arc()
    }
}

impl fmt::Display for BfvPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<BfvPreset> for BfvParamSet {
    fn from(value: BfvPreset) -> Self {
        match value {
            BfvPreset::InsecureBfv512 => BfvParamSet {
                degree: insecure_512::DEGREE,
                plaintext_modulus: PLAINTEXT_MODULUS,
                moduli: insecure_512::MODULI,
            },
            BfvPreset::SecureBfv4096 => BfvParamSet {
                degree: secure_4096::DEGREE,
                plaintext_modulus: PLAINTEXT_MODULUS,
                moduli: secure_4096::MODULI,
            },
            BfvPreset::SecureBfv8192 => BfvParamSet {
                degree: secure_8192::DEGREE,
                plaintext_modulus: PLAINTEXT_MODULUS,
                moduli: secure_8192::MODULI,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_accepts_all_presets() {
        for preset in BfvPreset::ALL {
            let parsed = BfvPreset::from_name(preset.name()).expect("preset should parse");
            assert_eq!(parsed, preset);
        }
        assert!(BfvPreset::from_name("SECURE_BFV_2048").is_err());
    }

    #[test]
    fn security_level_parses_and_serializes() {
        assert_eq!("insecure".parse::<SecurityLevel>().unwrap(), SecurityLevel::Insecure);
        assert_eq!("BITS128".parse::<SecurityLevel>().unwrap(), SecurityLevel::Bits128);
        assert!("bits80".parse::<SecurityLevel>().is_err());
        assert_eq!(
            serde_json::to_string(&SecurityLevel::Bits128).unwrap(),
            "\"bits128\""
        );
    }

    #[test]
    fn secure_presets_pass_the_modulus_bound() {
        for preset in BfvPreset::ALL {
            preset.check_security().unwrap();
        }
    }

    #[test]
    fn test_metadata_values() {
        let metadata = BfvPreset::SecureBfv8192.metadata();
        assert_eq!(metadata.degree, secure_8192::DEGREE);
        assert_eq!(metadata.plaintext_modulus, PLAINTEXT_MODULUS);
        assert_eq!(metadata.security_level, SecurityLevel::Bits128);
        assert!((metadata.noise.log_q - 207.0).abs() < 0.01);
    }

    #[test]
    fn test_max_decodable_count() {
        let set = BfvPreset::InsecureBfv512.param_set();
        assert_eq!(set.max_decodable_count(), 516096);
    }
}
