use clap::Parser;
use web_fixture::cli::commands::parse_seed;
use web_fixture::cli::config::{
    Cli, Commands, FixtureConfig, build_fixture_config, load_config, read_config,
};
use web_fixture::error::FixtureError;
use web_fixture::form::seed::Seed;
use web_fixture::locator::selector::SelectorAlgorithm;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_fill_minimal() {
    let cli = Cli::parse_from(["web-fixture", "fill", "--url", "https://example.com", "--form", "#signup"]);
    match cli.command {
        Commands::Fill {
            url,
            form,
            seed,
            seed_only,
            submit,
            rng_seed,
        } => {
            assert_eq!(url, "https://example.com");
            assert_eq!(form, "#signup");
            assert!(seed.is_none());
            assert!(!seed_only);
            assert!(!submit);
            assert!(rng_seed.is_none());
        }
        _ => panic!("Expected Fill command"),
    }
    assert_eq!(cli.verbose, 0);
    assert!(cli.selector.is_none());
}

#[test]
fn cli_parse_fill_all_args() {
    let cli = Cli::parse_from([
        "web-fixture",
        "fill",
        "--url",
        "http://localhost/signup",
        "--form",
        "//form",
        "--seed",
        r#"{"name":"Ada"}"#,
        "--seed-only",
        "--submit",
        "--rng-seed",
        "7",
        "--selector",
        "xpath",
        "-vv",
    ]);
    match cli.command {
        Commands::Fill {
            seed,
            seed_only,
            submit,
            rng_seed,
            ..
        } => {
            assert_eq!(seed.as_deref(), Some(r#"{"name":"Ada"}"#));
            assert!(seed_only);
            assert!(submit);
            assert_eq!(rng_seed, Some(7));
        }
        _ => panic!("Expected Fill command"),
    }
    assert_eq!(cli.selector, Some(SelectorAlgorithm::XPath));
    assert_eq!(cli.verbose, 2);
}

#[test]
fn cli_parse_extract() {
    let cli = Cli::parse_from([
        "web-fixture",
        "--browser-server",
        "server.js",
        "extract",
        "--url",
        "https://example.com",
        "--form",
        "form",
    ]);
    assert!(matches!(cli.command, Commands::Extract { .. }));
    assert_eq!(cli.browser_server.as_deref(), Some("server.js"));
}

#[test]
fn cli_rejects_unknown_selector_algorithm() {
    let result = Cli::try_parse_from([
        "web-fixture",
        "extract",
        "--url",
        "u",
        "--form",
        "f",
        "--selector",
        "sizzle",
    ]);
    assert!(result.is_err());
}

#[test]
fn cli_fill_requires_form() {
    assert!(Cli::try_parse_from(["web-fixture", "fill", "--url", "u"]).is_err());
}

// ============================================================================
// Seed argument
// ============================================================================

#[test]
fn seed_argument_object_is_structured() {
    let seed = parse_seed(Some(r#"{"name":"Ada","age":36}"#)).unwrap();
    assert_eq!(seed.resolve("name").unwrap().project(), "Ada");
    assert_eq!(seed.resolve("age").unwrap().project(), "36");
}

#[test]
fn seed_argument_scalar_is_simple() {
    assert_eq!(parse_seed(Some("42")).unwrap().projection().as_deref(), Some("42"));
    assert_eq!(parse_seed(Some("hello")).unwrap().projection().as_deref(), Some("hello"));
    assert!(matches!(parse_seed(None).unwrap(), Seed::Empty));
    assert!(matches!(parse_seed(Some("null")).unwrap(), Seed::Empty));
}

#[test]
fn seed_argument_rejects_arrays_and_broken_json() {
    assert!(parse_seed(Some("[1, 2]")).is_err());
    assert!(parse_seed(Some("{name: Ada")).is_err());
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn config_defaults() {
    let config = FixtureConfig::default();
    assert_eq!(config.selector, SelectorAlgorithm::Auto);
    assert_eq!(config.default_timeout_ms, 10_000);
    assert_eq!(config.poll_interval_ms, 100);
    assert!(config.base_url.is_none());
    assert!(config.journal_path.is_none());
    assert!(config.rng_seed.is_none());
}

#[test]
fn load_config_missing_file_returns_defaults() {
    let config = load_config(Some("/nonexistent/web-fixture.yaml"));
    assert_eq!(config, FixtureConfig::default());
}

#[test]
fn load_config_reads_partial_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("web-fixture.yaml");
    std::fs::write(
        &path,
        "selector: css\nbase_url: http://localhost:3000\ndefault_timeout_ms: 2500\n",
    )
    .unwrap();

    let config = load_config(path.to_str());

    assert_eq!(config.selector, SelectorAlgorithm::Css);
    assert_eq!(config.base_url.as_deref(), Some("http://localhost:3000"));
    assert_eq!(config.default_timeout_ms, 2500);
    assert_eq!(config.poll_interval_ms, 100);
}

#[test]
fn load_config_malformed_yaml_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("web-fixture.yaml");
    std::fs::write(&path, "selector: [not, a, selector\n").unwrap();

    assert_eq!(load_config(path.to_str()), FixtureConfig::default());
}

#[test]
fn read_config_reports_malformed_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("web-fixture.yaml");
    std::fs::write(&path, "default_timeout_ms: soon\n").unwrap();

    let err = read_config(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, FixtureError::Config(_)));
    assert!(read_config("/nonexistent/web-fixture.yaml").unwrap().is_none());
}

#[test]
fn cli_overrides_config_file() {
    let file = FixtureConfig {
        selector: SelectorAlgorithm::Css,
        rng_seed: Some(1),
        ..FixtureConfig::default()
    };

    let merged = build_fixture_config(file.clone(), Some(SelectorAlgorithm::JQuery), Some("other.js"), Some(9));
    assert_eq!(merged.selector, SelectorAlgorithm::JQuery);
    assert_eq!(merged.browser_server, "other.js");
    assert_eq!(merged.rng_seed, Some(9));

    let untouched = build_fixture_config(file.clone(), None, None, None);
    assert_eq!(untouched, file);
}
