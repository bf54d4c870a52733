//! Signal pipeline: snapshot in, validated trading signal out.

use signals_core::{
    error::PolicyError,
    traits::SignalPolicy,
    types::{
        BollingerBand, Decision, IndicatorSnapshot, MacdPoint, Position, PriceSeries,
        TradingSignal,
    },
};
use signals_indicators::IndicatorEngine;

use crate::ConfluencePolicy;

/// Check a policy decision against the price ordering rules.
///
/// Long: `target > entry > stop_loss`. Short: `target < entry < stop_loss`.
/// Every price must be finite and positive and confidence must be in `1..=10`.
pub fn validate_decision(policy: &str, decision: &Decision) -> Result<(), PolicyError> {
    let violation = |reason: String| PolicyError::Violation {
        policy: policy.to_string(),
        reason,
    };

    for (label, price) in [
        ("entry", decision.entry),
        ("target", decision.target),
        ("stop_loss", decision.stop_loss),
    ] {
        if !price.is_finite() || price <= 0.0 {
            return Err(violation(format!(
                "{label} {price} is not a finite positive price"
            )));
        }
    }

    if !(1..=10).contains(&decision.confidence) {
        return Err(violation(format!(
            "confidence {} is outside 1..=10",
            decision.confidence
        )));
    }

    let Decision {
        entry,
        target,
        stop_loss,
        ..
    } = *decision;
    let ordered = match decision.position {
        Position::Long => target > entry && entry > stop_loss,
        Position::Short => target < entry && entry < stop_loss,
    };
    if !ordered {
        return Err(violation(format!(
            "{} levels out of order: target {target}, entry {entry}, stop_loss {stop_loss}",
            decision.position
        )));
    }

    Ok(())
}

/// Runs a signal policy and validates what it returns.
pub struct SignalPipeline {
    policy: Box<dyn SignalPolicy>,
}

impl SignalPipeline {
    pub fn new(policy: Box<dyn SignalPolicy>) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &dyn SignalPolicy {
        self.policy.as_ref()
    }

    /// Derive a signal from the latest close and the latest indicator values.
    pub fn derive_signal(
        &self,
        asset: &str,
        latest_close: f64,
        latest_bollinger: Option<BollingerBand>,
        latest_rsi: Option<f64>,
        latest_macd: Option<MacdPoint>,
    ) -> Result<TradingSignal, PolicyError> {
        self.evaluate(
            asset,
            &IndicatorSnapshot {
                close: latest_close,
                bollinger: latest_bollinger,
                rsi: latest_rsi,
                macd: latest_macd,
            },
        )
    }

    /// Derive a signal from a prepared snapshot.
    pub fn evaluate(
        &self,
        asset: &str,
        snapshot: &IndicatorSnapshot,
    ) -> Result<TradingSignal, PolicyError> {
        if !snapshot.close.is_finite() || snapshot.close <= 0.0 {
            return Err(PolicyError::InsufficientData(format!(
                "{asset}: latest close {} is not a usable price",
                snapshot.close
            )));
        }

        let decision = self.policy.decide(snapshot)?;
        validate_decision(self.policy.name(), &decision)?;

        Ok(TradingSignal {
            asset: asset.to_string(),
            position: decision.position,
            entry: decision.entry,
            target: decision.target,
            stop_loss: decision.stop_loss,
            confidence: decision.confidence,
            policy: self.policy.name().to_string(),
            rationale: decision.rationale,
        })
    }

    /// Compute indicators over `series` and derive a signal for its last point.
    pub fn analyze(
        &self,
        engine: &IndicatorEngine,
        series: &PriceSeries,
    ) -> Result<TradingSignal, PolicyError> {
        let snapshot = engine.snapshot(series).ok_or_else(|| {
            PolicyError::InsufficientData(format!("no price data for {}", series.symbol))
        })?;
        self.evaluate(&series.symbol, &snapshot)
    }
}

impl Default for SignalPipeline {
    fn default() -> Self {
        Self::new(Box::new(ConfluencePolicy::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TrendPolicy;
    use proptest::prelude::*;
    use signals_core::types::PricePoint;
    use signals_indicators::IndicatorConfig;

    /// Returns whatever decision it was built with.
    struct Fixed(Decision);

    impl SignalPolicy for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn decide(&self, _snapshot: &IndicatorSnapshot) -> Result<Decision, PolicyError> {
            Ok(self.0.clone())
        }
    }

    fn decision(position: Position, entry: f64, target: f64, stop_loss: f64) -> Decision {
        Decision {
            position,
            entry,
            target,
            stop_loss,
            confidence: 5,
            rationale: String::new(),
        }
    }

    fn assert_ordered(signal: &TradingSignal) {
        assert!((1..=10).contains(&signal.confidence));
        match signal.position {
            Position::Long => {
                assert!(signal.target > signal.entry && signal.entry > signal.stop_loss)
            }
            Position::Short => {
                assert!(signal.target < signal.entry && signal.entry < signal.stop_loss)
            }
        }
    }

    #[test]
    fn test_derive_signal_default_policy() {
        let pipeline = SignalPipeline::default();
        let signal = pipeline
            .derive_signal(
                "AAPL",
                85.0,
                Some(BollingerBand {
                    upper: 110.0,
                    middle: 100.0,
                    lower: 90.0,
                }),
                Some(20.0),
                Some(MacdPoint {
                    macd: 0.4,
                    signal: Some(0.1),
                    histogram: Some(0.3),
                }),
            )
            .unwrap();

        assert_eq!(signal.asset, "AAPL");
        assert_eq!(signal.policy, "confluence");
        assert_eq!(signal.position, Position::Long);
        assert_eq!(signal.entry, 85.0);
        assert_ordered(&signal);
    }

    #[test]
    fn test_derive_signal_without_indicators() {
        let pipeline = SignalPipeline::default();
        let signal = pipeline.derive_signal("X", 10.0, None, None, None).unwrap();

        assert_eq!(signal.position, Position::Long);
        assert_eq!(signal.confidence, 1);
        assert_ordered(&signal);
    }

    #[test]
    fn test_unusable_close_rejected() {
        let pipeline = SignalPipeline::default();
        for close in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                pipeline.derive_signal("X", close, None, None, None),
                Err(PolicyError::InsufficientData(_))
            ));
        }
    }

    #[test]
    fn test_inverted_long_rejected() {
        let pipeline =
            SignalPipeline::new(Box::new(Fixed(decision(Position::Long, 100.0, 95.0, 90.0))));
        let err = pipeline.derive_signal("X", 100.0, None, None, None).unwrap_err();

        match err {
            PolicyError::Violation { policy, reason } => {
                assert_eq!(policy, "fixed");
                assert!(reason.contains("out of order"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_inverted_short_rejected() {
        let pipeline =
            SignalPipeline::new(Box::new(Fixed(decision(Position::Short, 100.0, 90.0, 99.0))));
        assert!(pipeline.derive_signal("X", 100.0, None, None, None).is_err());
    }

    #[test]
    fn test_validate_decision() {
        assert!(validate_decision("p", &decision(Position::Long, 100.0, 110.0, 95.0)).is_ok());
        assert!(validate_decision("p", &decision(Position::Short, 100.0, 90.0, 105.0)).is_ok());

        // Equal levels are not strictly ordered
        assert!(validate_decision("p", &decision(Position::Long, 100.0, 100.0, 95.0)).is_err());
        // Non-positive and non-finite prices
        assert!(validate_decision("p", &decision(Position::Short, 100.0, -1.0, 105.0)).is_err());
        assert!(
            validate_decision("p", &decision(Position::Long, 100.0, f64::NAN, 95.0)).is_err()
        );

        let mut out_of_range = decision(Position::Long, 100.0, 110.0, 95.0);
        out_of_range.confidence = 0;
        assert!(validate_decision("p", &out_of_range).is_err());
        out_of_range.confidence = 11;
        assert!(validate_decision("p", &out_of_range).is_err());
    }

    #[test]
    fn test_analyze_series() {
        let engine = IndicatorEngine::new(IndicatorConfig::default()).unwrap();
        let series: PriceSeries = (0..60)
            .map(|i| {
                let close = 100.0 + i as f64 * 0.5;
                PricePoint::new(i * 86_400_000, close, close, close, close, 1_000.0)
            })
            .collect();

        let signal = SignalPipeline::new(Box::new(TrendPolicy::default()))
            .analyze(&engine, &series)
            .unwrap();
        assert_eq!(signal.position, Position::Long);
        assert_eq!(signal.entry, 129.5);
        assert_ordered(&signal);
    }

    #[test]
    fn test_analyze_empty_series() {
        let engine = IndicatorEngine::new(IndicatorConfig::default()).unwrap();
        let result = SignalPipeline::default().analyze(&engine, &PriceSeries::new("EMPTY"));
        assert!(matches!(result, Err(PolicyError::InsufficientData(_))));
    }

    fn band_strategy() -> impl Strategy<Value = Option<BollingerBand>> {
        proptest::option::of((1.0f64..10_000.0, 0.0f64..2_000.0).prop_map(|(middle, width)| {
            BollingerBand {
                upper: middle + width,
                middle,
                lower: middle - width,
            }
        }))
    }

    fn macd_strategy() -> impl Strategy<Value = Option<MacdPoint>> {
        proptest::option::of(
            (-50.0f64..50.0, proptest::option::of(-50.0f64..50.0)).prop_map(|(macd, signal)| {
                MacdPoint {
                    macd,
                    signal,
                    histogram: signal.map(|s| macd - s),
                }
            }),
        )
    }

    fn snapshot_strategy() -> impl Strategy<Value = IndicatorSnapshot> {
        (
            0.01f64..10_000.0,
            band_strategy(),
            proptest::option::of(0.0f64..=100.0),
            macd_strategy(),
        )
            .prop_map(|(close, bollinger, rsi, macd)| IndicatorSnapshot {
                close,
                bollinger,
                rsi,
                macd,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn confluence_signals_keep_ordering(snapshot in snapshot_strategy()) {
            let signal = SignalPipeline::default().evaluate("PROP", &snapshot).unwrap();
            prop_assert_eq!(signal.entry, snapshot.close);
            assert_ordered(&signal);
        }

        #[test]
        fn trend_signals_keep_ordering(snapshot in snapshot_strategy()) {
            let pipeline = SignalPipeline::new(Box::new(TrendPolicy::default()));
            let signal = pipeline.evaluate("PROP", &snapshot).unwrap();
            assert_ordered(&signal);
        }

        #[test]
        fn arbitrary_decisions_are_ordered_or_rejected(
            long in any::<bool>(),
            entry in -10.0f64..1_000.0,
            target in -10.0f64..1_000.0,
            stop_loss in -10.0f64..1_000.0,
            confidence in 0u8..=12,
        ) {
            let position = if long { Position::Long } else { Position::Short };
            let pipeline = SignalPipeline::new(Box::new(Fixed(Decision {
                position,
                entry,
                target,
                stop_loss,
                confidence,
                rationale: String::new(),
            })));

            if let Ok(signal) = pipeline.derive_signal("PROP", 100.0, None, None, None) {
                assert_ordered(&signal);
                prop_assert!(signal.stop_loss > 0.0 && signal.target > 0.0);
            }
        }
    }
}
