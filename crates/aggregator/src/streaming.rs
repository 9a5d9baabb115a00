// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::circuit::{AggregateCiphertext, AggregationCircuit};
use crate::AggregateError;
use sg_fhe::CiphertextVector;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub enum AggregatorState {
    Collecting { acc: AggregateCiphertext },
    Sealed { contributors: usize },
}

impl AggregatorState {
    pub fn get_name(&self) -> String {
        match self {
            AggregatorState::Collecting { .. } => "Collecting",
            AggregatorState::Sealed { .. } => "Sealed",
        }
        .to_string()
    }
}

/// Running accumulator that folds contributions in as they arrive.
///
/// Produces the same aggregate as [`AggregationCircuit::aggregate`] over the
/// accepted contributions, whatever their arrival order.
pub struct Aggregator {
    circuit: AggregationCircuit,
    state: AggregatorState,
    parallel: bool,
}

impl Aggregator {
    pub fn new(circuit: AggregationCircuit) -> Self {
        let acc = circuit.identity();
        Self {
            circuit,
            state: AggregatorState::Collecting { acc },
            parallel: false,
        }
    }

    /// Sums batches with a parallel tree reduction before folding them in.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn state(&self) -> &AggregatorState {
        &self.state
    }

    pub fn contributor_count(&self) -> usize {
        match &self.state {
            AggregatorState::Collecting { acc } => acc.contributor_count(),
            AggregatorState::Sealed { contributors } => *contributors,
        }
    }

    fn accumulator(&self) -> Result<&AggregateCiphertext, AggregateError> {
        match &self.state {
            AggregatorState::Collecting { acc } => Ok(acc),
            AggregatorState::Sealed { .. } => Err(AggregateError::Sealed),
        }
    }

    fn collecting(&mut self) -> Result<&mut AggregateCiphertext, AggregateError> {
        let AggregatorState::Collecting { acc } = &mut self.state else {
            return Err(AggregateError::Sealed);
        };
        Ok(acc)
    }

    /// Checks a batch against the current accumulator without adding it.
    /// Returns the number of contributions the batch would add.
    pub fn check_batch(&self, cts: &[CiphertextVector]) -> Result<usize, AggregateError> {
        let acc = self.accumulator()?;
        self.circuit.validate_batch(cts, acc.contributors())
    }

    fn absorb(&mut self, ct: CiphertextVector) -> Result<(), AggregateError> {
        let lifted = self.circuit.lift(ct)?;
        self.collecting()?.merge(lifted)
    }

    /// Adds one party's contribution. A rejected contribution leaves the
    /// accumulator untouched.
    pub fn submit(&mut self, ct: CiphertextVector) -> Result<(), AggregateError> {
        let acc = self.accumulator()?;
        if let Err(e) = self.circuit.validate_batch([&ct], acc.contributors()) {
            warn!(party = %ct.party(), error = %e, "Rejected contribution");
            return Err(e);
        }
        let party = ct.party().clone();
        let fingerprint = ct.fingerprint();
        self.absorb(ct)?;
        info!(party = %party, fingerprint = %fingerprint, "Accepted contribution");
        Ok(())
    }

    /// Adds a batch of contributions, all or nothing.
    pub fn try_submit_batch(
        &mut self,
        cts: Vec<CiphertextVector>,
    ) -> Result<usize, AggregateError> {
        let accepted = self.check_batch(&cts)?;
        if self.parallel {
            let partial = self.circuit.aggregate_parallel(cts)?;
            self.collecting()?.merge(partial)?;
        } else {
            for ct in cts {
                self.absorb(ct)?;
            }
        }
        info!(accepted, "Accepted contribution batch");
        Ok(accepted)
    }

    /// Closes the accumulator and hands out the final aggregate.
    pub fn seal(&mut self) -> Result<AggregateCiphertext, AggregateError> {
        let acc = self.collecting()?.clone();
        self.state = AggregatorState::Sealed {
            contributors: acc.contributor_count(),
        };
        info!(contributors = acc.contributor_count(), "Aggregator sealed");
        Ok(acc)
    }
}
