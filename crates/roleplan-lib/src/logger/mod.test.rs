use super::*;

#[test]
fn test_filter_directives_scope_crates() {
    let directives = Logger::filter_directives(LogLevel::Debug);
    assert_eq!(directives, "roleplan_lib=debug,roleplan=debug,warn");
}

#[test]
fn test_filter_directives_parse() {
    for level in [LogLevel::Error, LogLevel::Info, LogLevel::Trace] {
        let directives = Logger::filter_directives(level);
        assert!(EnvFilter::try_new(&directives).is_ok(), "{directives}");
    }
}

#[test]
fn test_logger_global_matches_initialized_flag() {
    // Other tests in the process may have initialized the subscriber
    assert_eq!(Logger::is_initialized(), Logger::global().is_some());
}
