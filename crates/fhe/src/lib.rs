// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod ciphertext;
mod encryptor;
mod errors;
mod keys;
mod party;
mod utils;

pub use ciphertext::{CiphertextVector, EncryptedSlots};
pub use encryptor::Encryptor;
pub use errors::FheError;
pub use keys::{DecryptionKey, KeySet, PublicBundle};
pub use party::PartyTag;
pub use utils::{create_shared_rng_from_entropy, create_shared_rng_from_seed, SharedRng};

// Re-exported so dependents need not depend on the params crate for the common types.
pub use sg_fhe_params::{BfvPreset, SecurityLevel};
