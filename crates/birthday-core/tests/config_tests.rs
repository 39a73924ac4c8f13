use birthday_core::*;

#[test]
fn empty_object_is_the_default_config() {
    let config = GreetingConfig::from_json("{}").unwrap();
    assert_eq!(config, GreetingConfig::default());
    assert_eq!(config.cake.cues(), CAKE_CUES);
    assert_eq!(config.wishes.capacity, 10);
    assert_eq!(config.tune.sparkle_period_ms, 3_000);
    assert_eq!(config.particles, EmitterSpec::PARTICLES);
    assert_eq!(config.bubbles, EmitterSpec::BUBBLES);
}

#[test]
fn partial_overrides_keep_the_other_defaults() {
    let config = GreetingConfig::from_json(
        r#"{
            "wishes": { "capacity": 3 },
            "cake": { "complete_at_ms": 9000 },
            "bubbles": {
                "kind": "bubble",
                "initial_count": 1,
                "initial_stagger_ms": 0,
                "interval_ms": 1000,
                "lifetime_ms": 2000,
                "delay_range_sec": [0.0, 1.0],
                "duration_range_sec": [2.0, 3.0]
            },
            "seed": 7
        }"#,
    )
    .unwrap();
    assert_eq!(config.wishes.capacity, 3);
    assert_eq!(config.wishes.latency_ms, WISH_LATENCY_MS);
    assert_eq!(config.cake.complete_at_ms, 9_000);
    assert_eq!(config.cake.vibrate_at_ms, CAKE_VIBRATE_AT_MS);
    assert_eq!(config.bubbles.interval_ms, 1_000);
    assert_eq!(config.seed, 7);
}

#[test]
fn envelope_shape_is_tagged() {
    let config = GreetingConfig::from_json(
        r#"{ "tune": { "envelope": { "shape": "decay", "start": 0.3, "floor": 0.02 } } }"#,
    )
    .unwrap();
    assert_eq!(
        config.tune.envelope,
        GainEnvelope::Decay {
            start: 0.3,
            floor: 0.02
        }
    );
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        r#"{ "cake": { "vibrate_at_ms": 5000, "explode_at_ms": 4000 } }"#,
        r#"{ "wishes": { "capacity": 0 } }"#,
        r#"{ "tune": { "sparkle_period_ms": 0 } }"#,
        r#"{ "confetti": { "interval_ms": 0 } }"#,
        r#"{ "confetti": { "base_particles": -1.0 } }"#,
    ];
    for text in cases {
        assert!(
            matches!(GreetingConfig::from_json(text), Err(ConfigError::Invalid(_))),
            "{text}"
        );
    }
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = GreetingConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    let wrapped: GreetingError = err.into();
    assert!(matches!(wrapped, GreetingError::Config(_)));
}

#[test]
fn missing_seed_takes_the_fallback() {
    let config = GreetingConfig::from_json_or_seed(r#"{ "wishes": { "latency_ms": 200 } }"#, 9_001).unwrap();
    assert_eq!(config.seed, 9_001);
    assert_eq!(config.wishes.latency_ms, 200);
    assert_eq!(config.wishes.capacity, 10);

    let config = GreetingConfig::from_json_or_seed(r#"{ "seed": 7 }"#, 9_001).unwrap();
    assert_eq!(config.seed, 7);

    let config = GreetingConfig::from_json_or_seed("{}", 3).unwrap();
    assert_eq!(config, GreetingConfig { seed: 3, ..GreetingConfig::default() });
}

#[test]
fn fallback_seed_path_still_validates() {
    assert!(matches!(
        GreetingConfig::from_json_or_seed(r#"{ "wishes": { "capacity": 0 } }"#, 1),
        Err(ConfigError::Invalid(_))
    ));
    assert!(GreetingConfig::from_json_or_seed("not json", 1).is_err());
}
