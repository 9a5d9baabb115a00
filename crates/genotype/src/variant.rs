// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::GenotypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of variants in a panel. The protocol targets exactly two loci.
pub const PANEL_SIZE: usize = 2;

/// Plaintext/ciphertext slots per variant: carrier count, then total observed.
pub const SLOTS_PER_VARIANT: usize = 2;

/// Genomic position of a variant (GRCh38, 1-based).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locus {
    pub chromosome: String,
    pub position: u64,
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chromosome, self.position)
    }
}

/// A biallelic target variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    /// Stable identifier, e.g. `rs80357382`
    pub name: String,
    pub gene: String,
    pub locus: Locus,
    pub reference: String,
    pub alternate: String,
}

impl Variant {
    pub fn new(
        name: impl Into<String>,
        gene: impl Into<String>,
        chromosome: impl Into<String>,
        position: u64,
        reference: impl Into<String>,
        alternate: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            gene: gene.into(),
            locus: Locus {
                chromosome: chromosome.into(),
                position,
            },
            reference: reference.into(),
            alternate: alternate.into(),
        }
    }

    /// BRCA1 c.181T>G (p.Cys61Gly)
    pub fn brca1() -> Self {
        Variant::new("rs80357382", "BRCA1", "17", 43106487, "A", "C")
    }

    /// BRCA2 c.5946delT (6174delT)
    pub fn brca2() -> Self {
        Variant::new("rs80359550", "BRCA2", "13", 32340300, "GT", "G")
    }

    pub fn validate(&self) -> Result<(), GenotypeError> {
        let invalid = |reason: &str| GenotypeError::InvalidVariant {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("empty name"));
        }
        if self.locus.chromosome.trim().is_empty() || self.locus.position == 0 {
            return Err(invalid("incomplete locus"));
        }
        for allele in [&self.reference, &self.alternate] {
            if allele.is_empty() {
                return Err(invalid("empty allele"));
            }
            if allele.contains(',') {
                return Err(invalid("multi-allelic sites are not supported"));
            }
            if !allele
                .chars()
                .all(|c| matches!(c.to_ascii_uppercase(), 'A' | 'C' | 'G' | 'T' | 'N'))
            {
                return Err(invalid("alleles must be plain nucleotide sequences"));
            }
        }
        if self.reference.eq_ignore_ascii_case(&self.alternate) {
            return Err(invalid("reference and alternate alleles are identical"));
        }
        Ok(())
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}>{}",
            self.gene, self.name, self.locus, self.reference, self.alternate
        )
    }
}

/// The fixed pair of variants a run aggregates over.
///
/// The panel order defines the slot layout of plaintext and ciphertext vectors:
/// variant `i` owns slots `2i` (carriers) and `2i + 1` (total observed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[Variant; PANEL_SIZE]", into = "[Variant; PANEL_SIZE]")]
pub struct VariantPanel {
    variants: [Variant; PANEL_SIZE],
}

impl VariantPanel {
    pub fn new(first: Variant, second: Variant) -> Result<Self, GenotypeError> {
        Self::try_from([first, second])
    }

    /// BRCA1 rs80357382 and BRCA2 rs80359550
    pub fn brca() -> Self {
        Self {
            variants: [Variant::brca1(), Variant::brca2()],
        }
    }

    pub fn variants(&self) -> &[Variant; PANEL_SIZE] {
        &self.variants
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.name == name)
    }

    /// Length of the plaintext and ciphertext vectors for this panel.
    pub fn slot_count(&self) -> usize {
        PANEL_SIZE * SLOTS_PER_VARIANT
    }
}

impl Default for VariantPanel {
    fn default() -> Self {
        Self::brca()
    }
}

impl TryFrom<[Variant; PANEL_SIZE]> for VariantPanel {
    type Error = GenotypeError;

    fn try_from(variants: [Variant; PANEL_SIZE]) -> Result<Self, Self::Error> {
        for variant in &variants {
            variant.validate()?;
        }
        if variants[0].name == variants[1].name {
            return Err(GenotypeError::DuplicateVariant(variants[0].name.clone()));
        }
        Ok(Self { variants })
    }
}

impl From<VariantPanel> for [Variant; PANEL_SIZE] {
    fn from(panel: VariantPanel) -> Self {
        panel.variants
    }
}
