//! Confluence Policy.
//!
//! RSI, the MACD histogram and the Bollinger Bands each vote long, short or
//! neither. The majority picks the position; agreement drives confidence.

use serde::{Deserialize, Serialize};
use signals_core::{
    error::PolicyError,
    traits::{PolicyConfig, SignalPolicy},
    types::{Decision, IndicatorSnapshot, Position},
};

use crate::stops::StopRule;

/// Configuration for the confluence policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfluenceConfig {
    /// RSI below this votes long
    pub oversold: f64,
    /// RSI above this votes short
    pub overbought: f64,
    /// Target distance as a multiple of the stop distance
    pub reward_risk_ratio: f64,
    /// Stop distance as a fraction of the Bollinger half-width
    pub stop_band_fraction: f64,
    /// Smallest stop distance, as a fraction of entry
    pub min_stop_pct: f64,
    /// Largest stop distance, as a fraction of entry
    pub max_stop_pct: f64,
}

impl Default for ConfluenceConfig {
    fn default() -> Self {
        Self {
            oversold: 30.0,
            overbought: 70.0,
            reward_risk_ratio: 2.0,
            stop_band_fraction: 0.5,
            min_stop_pct: 0.01,
            max_stop_pct: 0.25,
        }
    }
}

impl ConfluenceConfig {
    pub(crate) fn stop_rule(&self) -> StopRule {
        StopRule {
            reward_risk_ratio: self.reward_risk_ratio,
            stop_band_fraction: self.stop_band_fraction,
            min_stop_pct: self.min_stop_pct,
            max_stop_pct: self.max_stop_pct,
        }
    }
}

impl PolicyConfig for ConfluenceConfig {
    fn validate(&self) -> Result<(), PolicyError> {
        if !(0.0..=100.0).contains(&self.oversold) || !(0.0..=100.0).contains(&self.overbought) {
            return Err(PolicyError::InvalidConfig(
                "RSI thresholds must be between 0 and 100".into(),
            ));
        }
        if self.oversold >= self.overbought {
            return Err(PolicyError::InvalidConfig(
                "Oversold must be less than overbought".into(),
            ));
        }
        self.stop_rule().validate()
    }
}

/// One indicator's opinion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vote {
    Long,
    Short,
    Abstain,
}

impl Vote {
    fn weight(self) -> i8 {
        match self {
            Vote::Long => 1,
            Vote::Short => -1,
            Vote::Abstain => 0,
        }
    }
}

fn sign(value: f64) -> Option<Position> {
    if value > 0.0 {
        Some(Position::Long)
    } else if value < 0.0 {
        Some(Position::Short)
    } else {
        None
    }
}

/// Confluence Policy.
pub struct ConfluencePolicy {
    config: ConfluenceConfig,
}

impl ConfluencePolicy {
    /// Create a new confluence policy.
    pub fn new(config: ConfluenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConfluenceConfig {
        &self.config
    }

    fn rsi_vote(&self, snapshot: &IndicatorSnapshot) -> Vote {
        match snapshot.rsi {
            Some(rsi) if rsi < self.config.oversold => Vote::Long,
            Some(rsi) if rsi > self.config.overbought => Vote::Short,
            _ => Vote::Abstain,
        }
    }

    fn macd_vote(snapshot: &IndicatorSnapshot) -> Vote {
        match snapshot.histogram().and_then(sign) {
            Some(Position::Long) => Vote::Long,
            Some(Position::Short) => Vote::Short,
            None => Vote::Abstain,
        }
    }

    fn band_vote(snapshot: &IndicatorSnapshot) -> Vote {
        match snapshot.bollinger {
            Some(band) if band.is_oversold(snapshot.close) => Vote::Long,
            Some(band) if band.is_overbought(snapshot.close) => Vote::Short,
            _ => Vote::Abstain,
        }
    }

    /// Majority of the votes; ties fall to MACD, then RSI, then the middle band.
    fn choose_position(&self, snapshot: &IndicatorSnapshot) -> Position {
        let tally: i8 = [
            self.rsi_vote(snapshot),
            Self::macd_vote(snapshot),
            Self::band_vote(snapshot),
        ]
        .iter()
        .map(|v| v.weight())
        .sum();

        sign(f64::from(tally))
            .or_else(|| snapshot.histogram().and_then(sign))
            .or_else(|| snapshot.rsi.and_then(|rsi| sign(50.0 - rsi)))
            .or_else(|| {
                snapshot
                    .bollinger
                    .and_then(|band| sign(band.middle - snapshot.close))
            })
            .unwrap_or(Position::Long)
    }

    fn rsi_points(&self, position: Position, rsi: Option<f64>) -> u8 {
        let Some(rsi) = rsi else {
            return 0;
        };
        // Distance past the threshold, and past the midline, in the position's direction
        let (beyond, past_mid) = match position {
            Position::Long => (self.config.oversold - rsi, 50.0 - rsi),
            Position::Short => (rsi - self.config.overbought, rsi - 50.0),
        };
        if beyond > 10.0 {
            3
        } else if beyond > 0.0 {
            2
        } else if past_mid > 0.0 {
            1
        } else {
            0
        }
    }

    fn macd_points(position: Position, snapshot: &IndicatorSnapshot) -> u8 {
        let direction = position.direction();
        let Some(point) = snapshot.macd else {
            return 0;
        };
        match point.histogram {
            Some(h) if h * direction > 0.0 && point.macd * direction > 0.0 => 3,
            Some(h) if h * direction > 0.0 => 2,
            _ => 0,
        }
    }

    fn band_points(position: Position, snapshot: &IndicatorSnapshot) -> u8 {
        let Some(band) = snapshot.bollinger else {
            return 0;
        };
        let close = snapshot.close;
        let (outside, past_middle) = match position {
            Position::Long => (band.is_oversold(close), close < band.middle),
            Position::Short => (band.is_overbought(close), close > band.middle),
        };
        if outside {
            3
        } else if past_middle {
            1
        } else {
            0
        }
    }

    fn rationale(&self, position: Position, snapshot: &IndicatorSnapshot) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(rsi) = snapshot.rsi {
            parts.push(format!(
                "RSI {rsi:.1} (oversold {:.0}, overbought {:.0})",
                self.config.oversold, self.config.overbought
            ));
        }
        if let Some(h) = snapshot.histogram() {
            parts.push(format!("MACD histogram {h:+.4}"));
        }
        if let Some(band) = snapshot.bollinger {
            parts.push(format!(
                "close {:.2} at %B {:.2}",
                snapshot.close,
                band.percent_b(snapshot.close)
            ));
        }
        if parts.is_empty() {
            format!("{position} by default: no indicators defined")
        } else {
            format!("{position}: {}", parts.join("; "))
        }
    }
}

impl Default for ConfluencePolicy {
    fn default() -> Self {
        Self::new(ConfluenceConfig::default())
    }
}

impl SignalPolicy for ConfluencePolicy {
    fn name(&self) -> &str {
        "confluence"
    }

    fn description(&self) -> &str {
        "Majority vote of RSI thresholds, MACD histogram and Bollinger Band breaks"
    }

    fn decide(&self, snapshot: &IndicatorSnapshot) -> Result<Decision, PolicyError> {
        let position = self.choose_position(snapshot);
        let entry = snapshot.close;

        let rule = self.config.stop_rule();
        let risk = rule.risk(entry, snapshot.bollinger.as_ref());
        let (target, stop_loss) = rule.levels(position, entry, risk);

        let points = self.rsi_points(position, snapshot.rsi)
            + Self::macd_points(position, snapshot)
            + Self::band_points(position, snapshot);

        Ok(Decision {
            position,
            entry,
            target,
            stop_loss,
            confidence: (1 + points).clamp(1, 10),
            rationale: self.rationale(position, snapshot),
        })
    }
}
