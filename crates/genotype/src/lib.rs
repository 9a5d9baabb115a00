// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Genotype data model and the deterministic encoding of a party's calls into
//! the count vector that gets encrypted.

mod encoder;
mod errors;
mod local;
mod record;
mod result;
mod variant;
mod vector;

pub use encoder::encode;
pub use errors::{GenotypeError, ZeroDenominatorError};
pub use local::local_frequencies;
pub use record::{GenotypeRecord, Zygosity};
pub use result::{AggregateResult, Frequency, VariantFrequency};
pub use variant::{Locus, Variant, VariantPanel, PANEL_SIZE, SLOTS_PER_VARIANT};
pub use vector::{PlaintextVector, SlotPair};
