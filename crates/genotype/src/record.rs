// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::GenotypeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Call state of one sample at one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Zygosity {
    /// No copy of the alternate allele
    Absent,
    Heterozygous,
    Homozygous,
    /// No call
    Missing,
}

impl Zygosity {
    pub fn is_carrier(&self) -> bool {
        matches!(self, Zygosity::Heterozygous | Zygosity::Homozygous)
    }

    pub fn is_observed(&self) -> bool {
        !matches!(self, Zygosity::Missing)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Zygosity::Absent => "absent",
            Zygosity::Heterozygous => "heterozygous",
            Zygosity::Homozygous => "homozygous",
            Zygosity::Missing => "missing",
        }
    }

    /// Parses a VCF `GT` value such as `0/1`, `1|1`, `./.` or haploid `1`.
    ///
    /// A partially missing call (`./1`) counts as missing. Allele indices above 1
    /// belong to multi-allelic sites and are rejected.
    pub fn from_gt(gt: &str) -> Result<Self, GenotypeError> {
        let invalid = || GenotypeError::InvalidGenotype(gt.to_string());
        let alleles: Vec<&str> = gt.trim().split(['/', '|']).collect();
        if alleles.iter().any(|a| a.is_empty()) {
            return Err(invalid());
        }
        if alleles.iter().any(|a| *a == ".") {
            return Ok(Zygosity::Missing);
        }

        let mut alt_count = 0;
        for allele in &alleles {
            match allele.parse::<u8>().map_err(|_| invalid())? {
                0 => {}
                1 => alt_count += 1,
                _ => return Err(invalid()),
            }
        }

        Ok(match alt_count {
            0 => Zygosity::Absent,
            n if n == alleles.len() => Zygosity::Homozygous,
            _ => Zygosity::Heterozygous,
        })
    }
}

impl fmt::Display for Zygosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Zygosity {
    type Err = GenotypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "absent" | "hom_ref" => Ok(Zygosity::Absent),
            "heterozygous" | "het" => Ok(Zygosity::Heterozygous),
            "homozygous" | "hom_alt" => Ok(Zygosity::Homozygous),
            "missing" => Ok(Zygosity::Missing),
            _ => Zygosity::from_gt(s),
        }
    }
}

impl TryFrom<String> for Zygosity {
    type Error = GenotypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Zygosity> for String {
    fn from(value: Zygosity) -> Self {
        value.name().to_string()
    }
}

/// One sample's call at one variant, as produced by a variant-call parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenotypeRecord {
    pub sample_id: String,
    /// Name of the variant the call belongs to (e.g. `rs80357382`)
    pub variant: String,
    #[serde(rename = "genotype")]
    pub zygosity: Zygosity,
}

impl GenotypeRecord {
    pub fn new(
        sample_id: impl Into<String>,
        variant: impl Into<String>,
        zygosity: Zygosity,
    ) -> Self {
        Self {
            sample_id: sample_id.into(),
            variant: variant.into(),
            zygosity,
        }
    }
}
