// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::ZeroDenominatorError;
use crate::variant::{Locus, Variant};
use num::rational::Ratio;
use serde::{Serialize, Serializer};
use std::fmt;

/// Carrier frequency of one variant.
///
/// `Undefined` is a valid outcome (no party observed the variant) and is kept
/// apart from a computed frequency of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Computed(Ratio<u64>),
    Undefined,
}

impl Frequency {
    pub fn from_counts(carriers: u64, total: u64) -> Self {
        if total == 0 {
            Frequency::Undefined
        } else {
            Frequency::Computed(Ratio::new(carriers, total))
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Frequency::Computed(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Frequency::Computed(ratio) => Some(*ratio.numer() as f64 / *ratio.denom() as f64),
            Frequency::Undefined => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_f64() {
            Some(value) => write!(f, "{value:.4}"),
            None => f.write_str("undefined"),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum FrequencyRepr {
    Computed {
        numerator: u64,
        denominator: u64,
        value: f64,
    },
    Undefined,
}

impl Serialize for Frequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = match self {
            Frequency::Computed(ratio) => FrequencyRepr::Computed {
                numerator: *ratio.numer(),
                denominator: *ratio.denom(),
                value: self.as_f64().unwrap_or_default(),
            },
            Frequency::Undefined => FrequencyRepr::Undefined,
        };
        repr.serialize(serializer)
    }
}

/// Aggregate counts and frequency for one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantFrequency {
    pub variant_name: String,
    pub gene: String,
    pub locus: Locus,
    pub carrier_sum: u64,
    pub total_sum: u64,
    pub frequency: Frequency,
}

impl VariantFrequency {
    pub fn new(variant: &Variant, carrier_sum: u64, total_sum: u64) -> Self {
        Self {
            variant_name: variant.name.clone(),
            gene: variant.gene.clone(),
            locus: variant.locus.clone(),
            carrier_sum,
            total_sum,
            frequency: Frequency::from_counts(carrier_sum, total_sum),
        }
    }

    /// The frequency as a float, or the reason it is undefined.
    pub fn frequency_value(&self) -> Result<f64, ZeroDenominatorError> {
        self.frequency.as_f64().ok_or_else(|| ZeroDenominatorError {
            variant: self.variant_name.clone(),
        })
    }
}

/// Terminal artifact of a protocol run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    /// Number of datasets that went into the aggregate
    pub contributors: usize,
    pub variants: Vec<VariantFrequency>,
}

impl AggregateResult {
    pub fn variant(&self, name: &str) -> Option<&VariantFrequency> {
        self.variants.iter().find(|v| v.variant_name == name)
    }
}
