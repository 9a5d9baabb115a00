// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod errors;
mod phase;
mod run;

pub use errors::ProtocolError;
pub use phase::ProtocolPhase;
pub use run::{PartyInput, ProtocolRun};
