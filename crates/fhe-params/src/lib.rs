// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Preset definitions, builders and noise estimates for BFV FHE parameters.

pub mod builder;
pub mod constants;
pub mod errors;
pub mod noise;
pub mod presets;

pub use builder::{
    build_bfv_params_arc, build_bfv_params_from_set_arc, check_sanity_ceiling, select_preset,
};
pub use errors::ParamsError;
pub use noise::{NoiseBudget, NoiseEstimate};
pub use presets::{BfvParamSet, BfvPreset, PresetMetadata, SecurityLevel};
