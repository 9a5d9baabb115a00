// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::ParamsError;
use crate::presets::{BfvParamSet, BfvPreset, SecurityLevel};
use fhe::bfv::{BfvParameters, BfvParametersBuilder};
use std::sync::Arc;
use tracing::debug;

pub fn build_bfv_params_from_set_arc(
    param_set: BfvParamSet,
) -> Result<Arc<BfvParameters>, ParamsError> {
    build_bfv_params_arc(
        param_set.degree,
        param_set.plaintext_modulus,
        param_set.moduli,
    )
}

pub fn build_bfv_params_arc(
    degree: usize,
    plaintext_modulus: u64,
    moduli: &[u64],
) -> Result<Arc<BfvParameters>, ParamsError> {
    let params = BfvParametersBuilder::new()
        .set_degree(degree)
        .set_plaintext_modulus(plaintext_modulus)
        .set_moduli(moduli)
        .build_arc()?;
    Ok(params)
}

/// Picks the smallest preset of `level` that supports `depth` multiplications.
///
/// The aggregation circuit only adds, so depth 0 is what a run asks for; larger
/// depths are accepted for circuits that extend it.
pub fn select_preset(level: SecurityLevel, depth: usize) -> Result<BfvPreset, ParamsError> {
    let candidates = level.presets();
    for preset in candidates {
        preset.check_security()?;
        if preset.noise_estimate().supports_depth(depth) {
            debug!(preset = %preset, depth, "Selected BFV preset");
            return Ok(*preset);
        }
    }

    let supported = candidates
        .iter()
        .filter_map(|p| p.noise_estimate().max_depth)
        .max();
    Err(ParamsError::UnsupportedDepth {
        level,
        requested: depth,
        supported,
    })
}

/// Checks that a sanity ceiling on decrypted counts fits the plaintext space,
/// so that any wrapped or negative value stays distinguishable from a valid count.
pub fn check_sanity_ceiling(param_set: &BfvParamSet, ceiling: u64) -> Result<(), ParamsError> {
    if ceiling == 0 {
        return Err(ParamsError::ZeroCeiling);
    }
    let limit = param_set.max_decodable_count();
    if ceiling > limit {
        return Err(ParamsError::CeilingTooLarge { ceiling, limit });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{insecure_512, PLAINTEXT_MODULUS};

    #[test]
    fn test_build_insecure_params_arc() {
        let params = BfvPreset::InsecureBfv512.build_arc().unwrap();
        assert_eq!(params.degree(), insecure_512::DEGREE);
        assert_eq!(params.plaintext(), PLAINTEXT_MODULUS);
        assert_eq!(params.moduli(), insecure_512::MODULI);
    }

    #[test]
    fn test_build_rejects_invalid_degree() {
        let result = build_bfv_params_arc(100, PLAINTEXT_MODULUS, insecure_512::MODULI);
        assert!(matches!(result, Err(ParamsError::Build(_))));
    }

    #[test]
    fn test_select_preset_for_addition_circuit() {
        assert_eq!(
            select_preset(SecurityLevel::Insecure, 0).unwrap(),
            BfvPreset::InsecureBfv512
        );
        assert_eq!(
            select_preset(SecurityLevel::Bits128, 0).unwrap(),
            BfvPreset::SecureBfv4096
        );
    }

    #[test]
    fn test_select_preset_grows_ring_with_depth() {
        assert_eq!(
            select_preset(SecurityLevel::Bits128, 1).unwrap(),
            BfvPreset::SecureBfv4096
        );
        assert_eq!(
            select_preset(SecurityLevel::Bits128, 2).unwrap(),
            BfvPreset::SecureBfv8192
        );
    }

    #[test]
    fn test_select_preset_rejects_unsupportable_depth() {
        let err = select_preset(SecurityLevel::Insecure, 1).unwrap_err();
        assert!(matches!(
            err,
            ParamsError::UnsupportedDepth {
                requested: 1,
                supported: Some(0),
                ..
            }
        ));

        let err = select_preset(SecurityLevel::Bits128, 5).unwrap_err();
        assert!(matches!(
            err,
            ParamsError::UnsupportedDepth {
                supported: Some(4),
                ..
            }
        ));
    }

    #[test]
    fn test_sanity_ceiling() {
        let set = BfvPreset::InsecureBfv512.param_set();
        assert!(check_sanity_ceiling(&set, 100_000).is_ok());
        assert!(check_sanity_ceiling(&set, set.max_decodable_count()).is_ok());
        assert!(matches!(
            check_sanity_ceiling(&set, set.max_decodable_count() + 1),
            Err(ParamsError::CeilingTooLarge { .. })
        ));
        assert!(matches!(
            check_sanity_ceiling(&set, 0),
            Err(ParamsError::ZeroCeiling)
        ));
    }
}
