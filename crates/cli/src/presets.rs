// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use sg_fhe_params::BfvPreset;

pub fn execute() {
    println!(
        "{:<18} {:<9} {:>6} {:>9} {:>11} {:>10}",
        "preset", "security", "degree", "t", "fresh bits", "max depth"
    );
    for preset in BfvPreset::ALL {
        let meta = preset.metadata();
        let depth = meta
            .noise
            .max_depth
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<18} {:<9} {:>6} {:>9} {:>11.1} {:>10}",
            meta.name,
            meta.security_level.to_string(),
            meta.degree,
            meta.plaintext_modulus,
            meta.noise.fresh_budget_bits,
            depth
        );
    }
}
