use super::*;

macro_rules! test_enum_completeness {
    ($enum_type:ty, $test_name:ident) => {
        #[test]
        fn $test_name() {
            for variant in <$enum_type>::value_variants() {
                let possible_value = variant
                    .to_possible_value()
                    .expect("PossibleValue should exist for all variants");
                let parsed: $enum_type = possible_value.get_name().parse().unwrap();
                assert_eq!(parsed, *variant, "Round-trip should preserve variant");
            }
        }
    };
}

test_enum_completeness!(LogLevel, test_log_level_completeness);
test_enum_completeness!(LogFormat, test_log_format_completeness);
test_enum_completeness!(LogOutput, test_log_output_completeness);
test_enum_completeness!(OutputFormat, test_output_format_completeness);
test_enum_completeness!(ColorIntent, test_color_intent_completeness);

#[test]
fn test_aliases_parse() {
    assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
    assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warning);
    assert_eq!("force".parse::<ColorIntent>().unwrap(), ColorIntent::Always);
    assert_eq!("off".parse::<ColorIntent>().unwrap(), ColorIntent::Never);
}

#[test]
fn test_invalid_value_reports_parse_error() {
    let err = "xml".parse::<OutputFormat>().unwrap_err();
    match err {
        ConfigError::ParseError { value, reason } => {
            assert_eq!(value, "xml");
            assert_eq!(reason, "invalid output format");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_verbosity_mapping() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(200), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(1).directive(), "warn");
}

#[test]
fn test_color_intent_enabled() {
    assert!(ColorIntent::Auto.enabled(true));
    assert!(!ColorIntent::Auto.enabled(false));
    assert!(ColorIntent::Always.enabled(false));
    assert!(!ColorIntent::Never.enabled(true));
}
