#[cfg(test)]
mod tests {
    use crate::config::EngineConfig;
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::state::{BeamGeometry, TickReport};
    use crate::types::{heading_vector, EntityId, EntitySnapshot, TeamId, Vec2};

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        config.validate().unwrap();
        assert_eq!(config.lead_distance, LEAD_DISTANCE);
        assert_eq!(config.multi_step_count, MULTI_STEP_COUNT);
        assert_eq!(config.selection, SelectionMode::Closest);
        assert_eq!(config.hit_strategy, HitStrategy::Ellipse);
        assert_eq!(config.velocity_model, VelocityModel::Observed);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config =
            EngineConfig::from_json(r#"{ "beam_length": 1400.0, "hit_strategy": "Capsule" }"#)
                .unwrap();
        assert_eq!(config.beam_length, 1400.0);
        assert_eq!(config.hit_strategy, HitStrategy::Capsule);
        assert_eq!(config.circle_radius, CIRCLE_RADIUS);
        assert_eq!(config.eviction_ticks, EVICTION_TICKS);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = [
            r#"{ "dt": -0.1 }"#,
            r#"{ "observation_noise": 0.0 }"#,
            r#"{ "smoothing_factor": 2.5 }"#,
            r#"{ "velocity_gain": 1.5 }"#,
            r#"{ "state_tick_hz": 0.0 }"#,
            r#"{ "eviction_ticks": 0 }"#,
        ];
        for json in cases {
            let err = EngineConfig::from_json(json).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { .. }),
                "{json} should be invalid, got {err}"
            );
        }
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = EngineConfig::from_json("{ lead_distance: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_beam_presets() {
        let config = EngineConfig::default();
        let longest = config.with_beam_preset(4).unwrap();
        assert_eq!(longest.beam_length, 2000.0);
        // Everything else carried over.
        assert_eq!(longest.circle_radius, config.circle_radius);
        assert!(matches!(
            config.with_beam_preset(5),
            Err(ConfigError::UnknownBeamPreset { index: 5, .. })
        ));
    }

    #[test]
    fn test_periods_follow_rates() {
        let config = EngineConfig {
            state_tick_hz: 50.0,
            beam_tick_hz: 25.0,
            ..Default::default()
        };
        assert_eq!(config.state_period().as_millis(), 20);
        assert_eq!(config.beam_period().as_millis(), 40);
        assert_eq!(config.hit_hold().as_millis(), HIT_HOLD_MS as u128);
    }

    #[test]
    fn test_tick_rates_bounded() {
        for hz in [1.0e-30, 0.001, 1.0e9, f64::INFINITY] {
            let config = EngineConfig {
                state_tick_hz: hz,
                ..Default::default()
            };
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::Invalid {
                        field: "state_tick_hz",
                        ..
                    })
                ),
                "{hz} should be refused"
            );
        }
        let err = EngineConfig::from_json(r#"{ "beam_tick_hz": 1e-30 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "beam_tick_hz", .. }));

        let slowest = EngineConfig {
            state_tick_hz: MIN_TICK_HZ,
            ..Default::default()
        };
        slowest.validate().unwrap();
        assert_eq!(slowest.state_period().as_secs(), 100);
    }

    #[test]
    fn test_period_of_unvalidated_rate_is_clamped() {
        let config = EngineConfig {
            state_tick_hz: 1.0e-30,
            beam_tick_hz: f64::NAN,
            ..Default::default()
        };
        assert_eq!(config.state_period().as_secs(), 100);
        assert_eq!(config.beam_period().as_secs(), 100);

        let fast = EngineConfig {
            state_tick_hz: 1.0e12,
            ..Default::default()
        };
        assert_eq!(fast.state_period().as_micros(), 100);
    }

    #[test]
    fn test_heading_zero_points_up() {
        assert!(approx(heading_vector(0.0), Vec2::new(0.0, -1.0)));
        assert!(approx(
            heading_vector(std::f64::consts::FRAC_PI_2),
            Vec2::new(1.0, 0.0)
        ));
    }

    #[test]
    fn test_beam_end() {
        let beam = BeamGeometry::new(Vec2::new(10.0, 10.0), 0.0, 100.0);
        assert!(approx(beam.end(), Vec2::new(10.0, -90.0)));
        let beam = BeamGeometry::new(Vec2::ZERO, std::f64::consts::PI, 50.0);
        assert!(approx(beam.end(), Vec2::new(0.0, 50.0)));
    }

    #[test]
    fn test_snapshot_builders() {
        let e = EntitySnapshot::new(EntityId(7), Vec2::new(3.0, 4.0))
            .with_velocity(Vec2::new(1.0, 0.0))
            .with_team(TeamId(2))
            .observer();
        assert!(e.alive);
        assert!(e.is_observer);
        assert_eq!(e.team, TeamId(2));
        assert_eq!(e.distance_to(Vec2::ZERO), 5.0);
        assert!(!e.dead().alive);
    }

    #[test]
    fn test_report_serializes() {
        let report = TickReport {
            tick: 3,
            beam: BeamGeometry::new(Vec2::ZERO, 0.0, 1000.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: TickReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
        assert!(!back.any_hit());
    }
}
