//! Signal policy trait definitions.

use crate::error::PolicyError;
use crate::types::{Decision, IndicatorSnapshot};

/// Configuration trait for policies.
pub trait PolicyConfig: Send + Sync + Clone + 'static {
    /// Validate the configuration.
    fn validate(&self) -> Result<(), PolicyError>;
}

/// Decision function that turns an indicator snapshot into a position.
///
/// Implementations must be deterministic for identical snapshots. The
/// pipeline validates every decision before it becomes a trading signal,
/// so a policy may return an inconsistent decision and expect it rejected.
pub trait SignalPolicy: Send + Sync {
    /// Get the unique name of this policy.
    fn name(&self) -> &str;

    /// Choose a position with entry, target, stop-loss and confidence.
    ///
    /// # Arguments
    /// * `snapshot` - Latest close and latest value of each indicator
    fn decide(&self, snapshot: &IndicatorSnapshot) -> Result<Decision, PolicyError>;

    /// Get a description of the policy.
    fn description(&self) -> &str {
        ""
    }
}
