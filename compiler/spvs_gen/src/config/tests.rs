use pretty_assertions::assert_eq;

use super::*;

#[test]
fn defaults_validate() {
    assert_eq!(GeneratorConfig::default().validate(), Ok(()));
}

#[test]
fn empty_json_is_the_default() {
    let config: GeneratorConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, GeneratorConfig::default());
}

#[test]
fn json_fields_override_defaults() {
    let config: GeneratorConfig = serde_json::from_str(
        r#"{
            "seed": 42,
            "weighting": "gaussian",
            "gaussian": { "std_dev": { "min": 0.2, "max": 0.3 } },
            "excluded_types": ["OpTypeMatrix"],
            "capabilities": ["Int8", "Float16"]
        }"#,
    )
    .unwrap();

    assert_eq!(config.seed, 42);
    assert_eq!(config.weighting, WeightingPolicy::Gaussian);
    assert_eq!(config.gaussian.std_dev, ParamRange::new(0.2, 0.3));
    assert_eq!(config.gaussian.mean, GaussianParams::default().mean);
    assert_eq!(config.excluded_kinds(), Ok(vec![OpKind::TypeMatrix]));
    assert_eq!(config.max_types, 20);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = serde_json::from_str::<GeneratorConfig>(r#"{ "max_typez": 3 }"#).unwrap_err();
    assert!(err.to_string().contains("max_typez"), "{err}");
}

#[test]
fn probabilities_must_be_in_unit_interval() {
    let config = GeneratorConfig {
        statement_probability: 1.5,
        ..GeneratorConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::ProbabilityOutOfRange {
            field: "statement_probability",
            value: 1.5,
        })
    );

    let config = GeneratorConfig {
        mutation_probability: -0.1,
        ..GeneratorConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ProbabilityOutOfRange {
            field: "mutation_probability",
            ..
        })
    ));
}

#[test]
fn inverted_ranges_are_rejected() {
    let mut config = GeneratorConfig::default();
    config.beta_binomial.alpha = ParamRange::new(3.0, 1.0);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyRange {
            field: "beta_binomial.alpha",
            ..
        })
    ));
}

#[test]
fn gaussian_spread_must_be_positive() {
    let mut config = GeneratorConfig::default();
    config.gaussian.std_dev = ParamRange::new(0.0, 0.5);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyRange {
            field: "gaussian.std_dev",
            ..
        })
    ));
}

#[test]
fn maxima_must_be_positive() {
    let config = GeneratorConfig {
        max_functions: 0,
        ..GeneratorConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::ZeroMaximum {
            field: "max_functions"
        })
    );
}

#[test]
fn excluded_types_must_name_sampled_types() {
    let config = GeneratorConfig {
        excluded_types: vec!["OpTypePointer".to_owned()],
        ..GeneratorConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::UnknownExcludedType("OpTypePointer".to_owned()))
    );
}

#[test]
fn excluding_every_numeric_type_is_rejected() {
    let config = GeneratorConfig {
        excluded_types: vec!["OpTypeInt".to_owned(), "OpTypeFloat".to_owned()],
        ..GeneratorConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::NoNumericType));
}

#[test]
fn widths_follow_capabilities() {
    let config = GeneratorConfig::default();
    assert_eq!(config.int_widths(), vec![32, 64]);
    assert_eq!(config.float_widths(), vec![32, 64]);

    let narrow = GeneratorConfig {
        capabilities: vec![Capability::Int8, Capability::Int16, Capability::Float16],
        ..GeneratorConfig::default()
    };
    assert_eq!(narrow.int_widths(), vec![8, 16, 32]);
    assert_eq!(narrow.float_widths(), vec![16, 32]);

    let none = GeneratorConfig {
        capabilities: Vec::new(),
        ..GeneratorConfig::default()
    };
    assert_eq!(none.int_widths(), vec![32]);
    assert!(none.is_enabled(Capability::Shader));
}
