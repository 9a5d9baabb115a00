// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProtocolPhase {
    KeysGenerated,
    PartiesEncoding,
    PartiesEncrypting,
    Aggregating,
    Decrypting,
    Resulted,
}

impl ProtocolPhase {
    pub fn get_name(&self) -> &'static str {
        match self {
            ProtocolPhase::KeysGenerated => "KeysGenerated",
            ProtocolPhase::PartiesEncoding => "PartiesEncoding",
            ProtocolPhase::PartiesEncrypting => "PartiesEncrypting",
            ProtocolPhase::Aggregating => "Aggregating",
            ProtocolPhase::Decrypting => "Decrypting",
            ProtocolPhase::Resulted => "Resulted",
        }
    }

    /// Phases only move forward. Aggregating may be re-entered while
    /// contributions keep arriving; late parties encode and encrypt without
    /// leaving it.
    pub fn can_transition_to(&self, next: ProtocolPhase) -> bool {
        use ProtocolPhase::*;
        match (self, next) {
            (Resulted, _) => false,
            (Aggregating, Aggregating) => true,
            (current, next) => next > *current,
        }
    }
}

impl fmt::Display for ProtocolPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get_name())
    }
}
