//! Interval-based rate-limit gate
//!
//! Bounds how quickly a resource may be depleted. The schedule is a vesting
//! curve anchored at `zero_date`: at time `now`, `ceil((zero_date - now) /
//! seconds_per_interval)` intervals are still locked, and the spend must
//! return at least `interval_count * mojos_per_interval` as change. The
//! change must in turn be committed under a structurally identical
//! rate-limit layer, otherwise one spend could launder the balance into an
//! unconstrained resource.
//!
//! There is no state across spends; every invocation recomputes the
//! schedule from the witness timestamp and the immutable curried
//! parameters.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use strata_core::{
    commit_layer_hashes, hash, ConditionList, Layer, LayerHash, ProgramId, PuzzleHash, Result,
    StrataError, META_PROGRAM_ID,
};

use crate::contract::Verdict;

/// Identity of the rate-limit validator program.
pub static PROGRAM_ID: Lazy<ProgramId> =
    Lazy::new(|| ProgramId::new(hash::hash(b"strata/policy/rate-limit/v1")));

/// Parameters curried into a rate-limit layer at commitment time.
///
/// The interpreter identity and the validator's own identity are part of
/// the parameters: the validator needs both to rebuild the commitment a
/// change output must adopt, and currying them keeps the layer a plain
/// value with no self-referential structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitParams {
    seconds_per_interval: u64,
    mojos_per_interval: u64,
    zero_date: u64,
    meta_program: ProgramId,
    self_program: ProgramId,
}

impl RateLimitParams {
    /// Bind a withdrawal schedule. `seconds_per_interval` must be positive.
    pub fn new(seconds_per_interval: u64, mojos_per_interval: u64, zero_date: u64) -> Result<Self> {
        if seconds_per_interval == 0 {
            return Err(StrataError::invalid_parameter(
                "seconds_per_interval must be positive",
            ));
        }
        Ok(Self {
            seconds_per_interval,
            mojos_per_interval,
            zero_date,
            meta_program: *META_PROGRAM_ID,
            self_program: *PROGRAM_ID,
        })
    }

    /// Seconds per schedule interval.
    pub fn seconds_per_interval(&self) -> u64 {
        self.seconds_per_interval
    }

    /// Allowance unlocked per interval, in mojos.
    pub fn mojos_per_interval(&self) -> u64 {
        self.mojos_per_interval
    }

    /// Reference timestamp at which the whole balance is unlocked.
    pub fn zero_date(&self) -> u64 {
        self.zero_date
    }

    /// Number of still-locked intervals at `now`. Zero once `now` reaches
    /// `zero_date`; the count only decreases as time advances.
    pub fn interval_count(&self, now: u64) -> u64 {
        if now >= self.zero_date {
            return 0;
        }
        (self.zero_date - now).div_ceil(self.seconds_per_interval)
    }

    /// Minimum amount a spend at `now` must retain as change.
    ///
    /// Widened to `u128`: the product of two u64 parameters must not wrap
    /// into a passable threshold.
    pub fn min_change_amount(&self, now: u64) -> u128 {
        u128::from(self.interval_count(now)) * u128::from(self.mojos_per_interval)
    }
}

/// Rate-limit gate with its curried schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitPolicy {
    params: RateLimitParams,
}

/// Schedule proof supplied at spend time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitWitness {
    /// Claimed current time; must match a ledger-enforced time assertion
    pub now: u64,
    /// Index of the `AssertAbsoluteTime` condition binding `now`
    pub assert_time_index: usize,
    /// Index of the `CreateOutput` condition returning the change
    pub change_output_index: usize,
    /// Index into `continuation_hashes` of the layer the change adopts
    pub change_continuation_index: usize,
    /// Candidate continuation-layer hashes the change may adopt
    pub continuation_hashes: Vec<LayerHash>,
}

impl RateLimitPolicy {
    /// Create a gate from bound parameters.
    pub fn new(params: RateLimitParams) -> Self {
        Self { params }
    }

    /// The curried schedule.
    pub fn params(&self) -> &RateLimitParams {
        &self.params
    }

    /// The committed form of this gate.
    pub fn layer(&self) -> Result<Layer> {
        Layer::new(self.params.self_program, &self.params)
    }

    /// Commitment the change output must adopt, given the continuation
    /// layer it stacks on top of: this same rate-limit layer over that
    /// continuation, under the same interpreter.
    pub fn expected_change_commitment(&self, continuation: LayerHash) -> Result<PuzzleHash> {
        let self_hash = self.layer()?.hash();
        commit_layer_hashes(self.params.meta_program, &[self_hash, continuation])
    }

    /// Check a spend against the schedule.
    ///
    /// Fatal outcomes are witness shape errors: a time assertion that does
    /// not match the claimed `now`, an index naming the wrong condition
    /// kind, or an index out of range. Insufficient change and a change
    /// commitment that is not an equivalent rate-limited policy are
    /// ordinary rejections.
    pub fn validate(
        &self,
        conditions: &ConditionList,
        witness: &RateLimitWitness,
    ) -> Result<Verdict> {
        // The ledger enforces the assertion against chain time, so matching
        // the witness against it keeps the spender honest about `now`.
        let declared = conditions.absolute_time_at(witness.assert_time_index)?;
        if declared != witness.now {
            return Err(StrataError::TimeAssertionMismatch {
                declared,
                witness: witness.now,
            });
        }

        let min_change = self.params.min_change_amount(witness.now);
        let (change_hash, change_amount) =
            conditions.create_output_at(witness.change_output_index)?;

        if u128::from(change_amount) < min_change {
            debug!(
                change_amount,
                min_change, "change below locked allowance, rejecting"
            );
            return Ok(Verdict::Rejected);
        }

        let continuation = witness
            .continuation_hashes
            .get(witness.change_continuation_index)
            .ok_or(StrataError::ContinuationIndexOutOfRange {
                index: witness.change_continuation_index,
                len: witness.continuation_hashes.len(),
            })?;

        let expected = self.expected_change_commitment(*continuation)?;
        if expected == change_hash {
            Ok(Verdict::Approved)
        } else {
            debug!(%expected, actual = %change_hash, "change commitment mismatch, rejecting");
            Ok(Verdict::Rejected)
        }
    }
}
