//! Trend Policy.
//!
//! Follows the MACD histogram and uses RSI as confirmation. An RSI that has
//! run past its exhaustion level counts against the trend.

use serde::{Deserialize, Serialize};
use signals_core::{
    error::PolicyError,
    traits::{PolicyConfig, SignalPolicy},
    types::{Decision, IndicatorSnapshot, Position},
};

use crate::stops::StopRule;

/// Configuration for the trend policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// RSI above this is an exhausted uptrend
    pub exhaustion_overbought: f64,
    /// RSI below this is an exhausted downtrend
    pub exhaustion_oversold: f64,
    pub reward_risk_ratio: f64,
    /// Stop distance as a fraction of the Bollinger half-width
    pub stop_band_fraction: f64,
    pub min_stop_pct: f64,
    pub max_stop_pct: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            exhaustion_overbought: 80.0,
            exhaustion_oversold: 20.0,
            reward_risk_ratio: 3.0,
            stop_band_fraction: 1.0,
            min_stop_pct: 0.01,
            max_stop_pct: 0.25,
        }
    }
}

impl TrendConfig {
    pub(crate) fn stop_rule(&self) -> StopRule {
        StopRule {
            reward_risk_ratio: self.reward_risk_ratio,
            stop_band_fraction: self.stop_band_fraction,
            min_stop_pct: self.min_stop_pct,
            max_stop_pct: self.max_stop_pct,
        }
    }
}

impl PolicyConfig for TrendConfig {
    fn validate(&self) -> Result<(), PolicyError> {
        if !(0.0..50.0).contains(&self.exhaustion_oversold)
            || !(self.exhaustion_overbought > 50.0 && self.exhaustion_overbought <= 100.0)
        {
            return Err(PolicyError::InvalidConfig(
                "Exhaustion levels must straddle 50 within 0..=100".into(),
            ));
        }
        self.stop_rule().validate()
    }
}

/// Trend Policy.
pub struct TrendPolicy {
    config: TrendConfig,
}

impl TrendPolicy {
    /// Create a new trend policy.
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    fn trend(snapshot: &IndicatorSnapshot) -> Position {
        let Some(point) = snapshot.macd else {
            return Position::Long;
        };
        let lead = match point.histogram {
            Some(h) if h != 0.0 => h,
            _ => point.macd,
        };
        if lead < 0.0 {
            Position::Short
        } else {
            Position::Long
        }
    }

    /// RSI on the trend's side of 50 without being exhausted.
    fn rsi_confirms(&self, position: Position, rsi: f64) -> bool {
        match position {
            Position::Long => rsi > 50.0 && rsi <= self.config.exhaustion_overbought,
            Position::Short => rsi < 50.0 && rsi >= self.config.exhaustion_oversold,
        }
    }

    fn confidence(&self, position: Position, snapshot: &IndicatorSnapshot) -> u8 {
        let direction = position.direction();
        let mut points = 0u8;

        if let Some(point) = snapshot.macd {
            if point.histogram.is_some_and(|h| h * direction > 0.0) {
                points += 3;
            }
            if point.macd * direction > 0.0 {
                points += 1;
            }
        }
        if snapshot
            .rsi
            .is_some_and(|rsi| self.rsi_confirms(position, rsi))
        {
            points += 3;
        }
        if let Some(band) = snapshot.bollinger {
            if (snapshot.close - band.middle) * direction > 0.0 {
                points += 2;
            }
        }

        (1 + points).clamp(1, 10)
    }
}

impl Default for TrendPolicy {
    fn default() -> Self {
        Self::new(TrendConfig::default())
    }
}

impl SignalPolicy for TrendPolicy {
    fn name(&self) -> &str {
        "trend"
    }

    fn description(&self) -> &str {
        "Follows the MACD histogram with RSI confirmation"
    }

    fn decide(&self, snapshot: &IndicatorSnapshot) -> Result<Decision, PolicyError> {
        let position = Self::trend(snapshot);
        let entry = snapshot.close;

        let rule = self.config.stop_rule();
        let risk = rule.risk(entry, snapshot.bollinger.as_ref());
        let (target, stop_loss) = rule.levels(position, entry, risk);

        let rationale = match (snapshot.macd, snapshot.rsi) {
            (Some(point), Some(rsi)) => format!(
                "{position} trend: MACD {:+.4}, histogram {}, RSI {rsi:.1}",
                point.macd,
                point
                    .histogram
                    .map_or_else(|| "undefined".to_string(), |h| format!("{h:+.4}"))
            ),
            (Some(point), None) => format!("{position} trend: MACD {:+.4}", point.macd),
            _ => format!("{position} by default: MACD undefined"),
        };

        Ok(Decision {
            position,
            entry,
            target,
            stop_loss,
            confidence: self.confidence(position, snapshot),
            rationale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signals_core::types::{BollingerBand, MacdPoint};

    fn snapshot(
        close: f64,
        rsi: Option<f64>,
        macd: f64,
        histogram: Option<f64>,
    ) -> IndicatorSnapshot {
        IndicatorSnapshot {
            close,
            bollinger: Some(BollingerBand {
                upper: 104.0,
                middle: 100.0,
                lower: 96.0,
            }),
            rsi,
            macd: Some(MacdPoint {
                macd,
                signal: histogram.map(|h| macd - h),
                histogram,
            }),
        }
    }

    #[test]
    fn test_follows_histogram() {
        let policy = TrendPolicy::default();

        let up = policy.decide(&snapshot(102.0, Some(60.0), 0.5, Some(0.2))).unwrap();
        assert_eq!(up.position, Position::Long);
        assert_eq!(up.confidence, 10);
        // Stop one half-width below entry, target three times that above
        assert!((up.stop_loss - 98.0).abs() < 1e-12);
        assert!((up.target - 114.0).abs() < 1e-12);

        let down = policy.decide(&snapshot(98.0, Some(40.0), -0.5, Some(-0.2))).unwrap();
        assert_eq!(down.position, Position::Short);
        assert_eq!(down.confidence, 10);
        assert!((down.stop_loss - 102.0).abs() < 1e-12);
        assert!((down.target - 86.0).abs() < 1e-12);
    }

    #[test]
    fn test_falls_back_to_macd_line() {
        let policy = TrendPolicy::default();
        let decision = policy.decide(&snapshot(100.0, None, -0.4, None)).unwrap();

        assert_eq!(decision.position, Position::Short);
        assert_eq!(decision.confidence, 2);
    }

    #[test]
    fn test_defaults_long_without_macd() {
        let policy = TrendPolicy::default();
        let decision = policy
            .decide(&IndicatorSnapshot {
                close: 20.0,
                bollinger: None,
                rsi: Some(55.0),
                macd: None,
            })
            .unwrap();

        assert_eq!(decision.position, Position::Long);
        assert_eq!(decision.confidence, 4);
    }

    #[test]
    fn test_exhausted_rsi_not_confirming() {
        let policy = TrendPolicy::default();

        let healthy = policy.decide(&snapshot(102.0, Some(65.0), 0.5, Some(0.2))).unwrap();
        let exhausted = policy.decide(&snapshot(102.0, Some(90.0), 0.5, Some(0.2))).unwrap();

        assert_eq!(exhausted.position, Position::Long);
        assert_eq!(healthy.confidence - exhausted.confidence, 3);
    }

    #[test]
    fn test_invalid_config() {
        let config = TrendConfig {
            exhaustion_overbought: 40.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(TrendConfig::default().validate().is_ok());
    }
}
