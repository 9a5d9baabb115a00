// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod circuit;
mod errors;
mod streaming;
#[cfg(test)]
mod test_utils;

pub use circuit::{combine, AggregateCiphertext, AggregationCircuit};
pub use errors::AggregateError;
pub use streaming::{Aggregator, AggregatorState};
