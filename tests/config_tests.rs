use serial_test::serial;
use std::env;

use daybook::calendar::WeekStart;
use daybook::config::Config;
use daybook::errors::AppError;
use daybook::navigation::MonthNavPolicy;

const VARS: [&str; 5] = [
    "DAYBOOK_API_URL",
    "DAYBOOK_API_KEY",
    "DAYBOOK_TABLE",
    "DAYBOOK_WEEK_START",
    "DAYBOOK_MONTH_NAV",
];

/// Saves the daybook variables, clears them, and restores them on drop.
struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn new() -> Self {
        let saved = VARS.iter().map(|name| (*name, env::var(name).ok())).collect();
        for name in VARS {
            env::remove_var(name);
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(v) => env::set_var(name, v),
                None => env::remove_var(name),
            }
        }
    }
}

#[test]
#[serial]
fn test_config_load_with_environment_vars() {
    let _guard = EnvGuard::new();
    env::set_var("DAYBOOK_API_URL", "https://abc.supabase.co/");
    env::set_var("DAYBOOK_API_KEY", "anon-key");
    env::set_var("DAYBOOK_TABLE", "moods");
    env::set_var("DAYBOOK_WEEK_START", "monday");
    env::set_var("DAYBOOK_MONTH_NAV", "keep");

    let config = Config::load().unwrap();

    assert_eq!(config.api_url, "https://abc.supabase.co/");
    assert_eq!(config.api_key, "anon-key");
    assert_eq!(config.table, "moods");
    assert_eq!(config.week_start, WeekStart::Monday);
    assert_eq!(config.month_nav, MonthNavPolicy::KeepDay);
}

#[test]
#[serial]
fn test_config_load_with_fallbacks() {
    let _guard = EnvGuard::new();
    env::set_var("DAYBOOK_API_URL", "http://localhost:54321");
    env::set_var("DAYBOOK_API_KEY", "anon-key");
    env::set_var("DAYBOOK_TABLE", "   ");

    let config = Config::load().unwrap();

    assert_eq!(config.table, "journals");
    assert_eq!(config.week_start, WeekStart::Sunday);
    assert_eq!(config.month_nav, MonthNavPolicy::ResetToFirst);
}

#[test]
#[serial]
fn test_config_missing_key() {
    let _guard = EnvGuard::new();
    env::set_var("DAYBOOK_API_URL", "http://localhost:54321");

    match Config::load() {
        Err(AppError::Config(message)) => assert!(message.contains("DAYBOOK_API_KEY")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_config_invalid_values() {
    let _guard = EnvGuard::new();
    env::set_var("DAYBOOK_API_URL", "localhost");
    env::set_var("DAYBOOK_API_KEY", "anon-key");
    assert!(matches!(Config::load(), Err(AppError::Config(_))));

    env::set_var("DAYBOOK_API_URL", "http://localhost:54321");
    env::set_var("DAYBOOK_MONTH_NAV", "sideways");
    assert!(matches!(Config::load(), Err(AppError::Config(_))));
}

#[test]
fn test_config_debug_never_shows_key() {
    let config = Config {
        api_url: "https://abc.supabase.co".to_string(),
        api_key: "eyJhbGciOiJIUzI1NiJ9.secret".to_string(),
        ..Config::default()
    };
    let output = format!("{:?}", config);
    assert!(!output.contains("eyJhbGciOiJIUzI1NiJ9"));
    assert!(format!("{:?}", config.store()).contains("[REDACTED]"));
}
