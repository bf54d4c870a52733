//! Trading signal types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a recommended position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Long,
    Short,
}

impl Position {
    /// +1 for long, -1 for short.
    #[inline]
    pub fn direction(&self) -> f64 {
        match self {
            Position::Long => 1.0,
            Position::Short => -1.0,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Long => write!(f, "long"),
            Position::Short => write!(f, "short"),
        }
    }
}

/// Raw output of a signal policy, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub position: Position,
    pub entry: f64,
    pub target: f64,
    pub stop_loss: f64,
    /// Expected in 1..=10
    pub confidence: u8,
    /// Why the policy chose this position
    pub rationale: String,
}

/// A validated trading recommendation for one asset.
///
/// For long signals `target > entry > stop_loss`; for short signals
/// `target < entry < stop_loss`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSignal {
    /// Asset identifier
    pub asset: String,
    pub position: Position,
    pub entry: f64,
    pub target: f64,
    pub stop_loss: f64,
    /// Indicator agreement, 1 (weak) to 10 (strong)
    pub confidence: u8,
    /// Name of the policy that produced the decision
    pub policy: String,
    pub rationale: String,
}

impl TradingSignal {
    /// Potential reward divided by potential loss.
    pub fn reward_to_risk(&self) -> f64 {
        let risk = (self.entry - self.stop_loss).abs();
        if risk == 0.0 {
            0.0
        } else {
            (self.target - self.entry).abs() / risk
        }
    }
}
