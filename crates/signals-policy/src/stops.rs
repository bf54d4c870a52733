//! Stop-loss and target placement shared by the built-in policies.

use signals_core::error::PolicyError;
use signals_core::types::{BollingerBand, Position};

#[derive(Debug, Clone, Copy)]
pub(crate) struct StopRule {
    pub reward_risk_ratio: f64,
    pub stop_band_fraction: f64,
    pub min_stop_pct: f64,
    pub max_stop_pct: f64,
}

impl StopRule {
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !self.reward_risk_ratio.is_finite() || self.reward_risk_ratio <= 0.0 {
            return Err(PolicyError::InvalidConfig(
                "reward_risk_ratio must be positive".into(),
            ));
        }
        if !self.stop_band_fraction.is_finite() || self.stop_band_fraction < 0.0 {
            return Err(PolicyError::InvalidConfig(
                "stop_band_fraction must be non-negative".into(),
            ));
        }
        if !(self.min_stop_pct > 0.0 && self.min_stop_pct <= self.max_stop_pct) {
            return Err(PolicyError::InvalidConfig(
                "min_stop_pct must be positive and at most max_stop_pct".into(),
            ));
        }
        if self.max_stop_pct >= 1.0 {
            return Err(PolicyError::InvalidConfig(
                "max_stop_pct must be below 1.0".into(),
            ));
        }
        Ok(())
    }

    /// Distance from entry to stop, bounded to `[min_stop_pct, max_stop_pct]` of entry.
    pub fn risk(&self, entry: f64, bands: Option<&BollingerBand>) -> f64 {
        let floor = self.min_stop_pct * entry;
        let ceiling = self.max_stop_pct * entry;
        match bands.map(|b| self.stop_band_fraction * b.half_width()) {
            Some(width) if width.is_finite() => width.max(floor).min(ceiling),
            _ => floor,
        }
    }

    /// `(target, stop_loss)` for a position entered at `entry`.
    pub fn levels(&self, position: Position, entry: f64, risk: f64) -> (f64, f64) {
        match position {
            Position::Long => (entry + self.reward_risk_ratio * risk, entry - risk),
            Position::Short => {
                // Capped so the target stays above zero
                let reward = (self.reward_risk_ratio * risk).min(self.max_stop_pct * entry);
                (entry - reward, entry + risk)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> StopRule {
        StopRule {
            reward_risk_ratio: 2.0,
            stop_band_fraction: 0.5,
            min_stop_pct: 0.01,
            max_stop_pct: 0.25,
        }
    }

    fn band(half_width: f64) -> BollingerBand {
        BollingerBand {
            upper: 100.0 + half_width,
            middle: 100.0,
            lower: 100.0 - half_width,
        }
    }

    #[test]
    fn test_risk_from_band() {
        assert!((rule().risk(100.0, Some(&band(6.0))) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_risk_bounds() {
        // Collapsed bands fall back to the floor
        assert!((rule().risk(100.0, Some(&band(0.0))) - 1.0).abs() < 1e-12);
        assert!((rule().risk(100.0, None) - 1.0).abs() < 1e-12);
        // Very wide bands are capped
        assert!((rule().risk(100.0, Some(&band(200.0))) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_levels() {
        let (target, stop) = rule().levels(Position::Long, 100.0, 3.0);
        assert_eq!((target, stop), (106.0, 97.0));

        let (target, stop) = rule().levels(Position::Short, 100.0, 3.0);
        assert_eq!((target, stop), (94.0, 103.0));

        let (target, _) = rule().levels(Position::Short, 100.0, 25.0);
        assert_eq!(target, 75.0);
    }

    #[test]
    fn test_validate() {
        assert!(rule().validate().is_ok());
        assert!(StopRule { min_stop_pct: 0.0, ..rule() }.validate().is_err());
        assert!(StopRule { max_stop_pct: 1.0, ..rule() }.validate().is_err());
        assert!(StopRule { min_stop_pct: 0.3, ..rule() }.validate().is_err());
        assert!(StopRule { reward_risk_ratio: f64::NAN, ..rule() }.validate().is_err());
    }
}
