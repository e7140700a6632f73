use tracing::info;

use crate::actions::fixture::Fixture;
use crate::browser::session::BrowserSession;
use crate::cli::config::FixtureConfig;
use crate::error::{FixtureError, Result};
use crate::form::autofill::{FillReport, ValueSource};
use crate::form::seed::Seed;

// ============================================================================
// fill subcommand
// ============================================================================

pub fn cmd_fill(
    config: FixtureConfig,
    url: &str,
    form: &str,
    seed: Option<&str>,
    seed_only: bool,
    submit: bool,
) -> Result<()> {
    let seed = parse_seed(seed)?;
    let session = BrowserSession::launch(&config.browser_server)?;
    let mut fixture = Fixture::with_config(session, config);

    let report = {
        let mut i = fixture.i();
        i.navigate().to(url)?;

        let filled = if seed_only {
            i.fill(form)?.with(seed)?
        } else {
            i.auto_fill(form, seed)?
        };

        if submit {
            let report = filled.report().clone();
            filled.then_submit()?;
            report
        } else {
            filled.into_report()
        }
    };

    print_report(&report);

    fixture.driver_mut().quit()?;
    Ok(())
}

/// Seed from the `--seed` argument: a JSON object, a JSON scalar, or bare
/// text used as a simple seed.
pub fn parse_seed(raw: Option<&str>) -> Result<Seed> {
    let Some(raw) = raw else {
        return Ok(Seed::Empty);
    };

    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => Seed::from_json(value),
        Err(_) if !raw.trim_start().starts_with(['{', '[']) => Ok(Seed::simple(raw)),
        Err(e) => Err(FixtureError::JsonParse {
            context: "--seed".into(),
            source: e,
        }),
    }
}

fn print_report(report: &FillReport) {
    println!(
        "Filled {} fields ({} seeded, {} generated, {} skipped)",
        report.fields.len(),
        report.count(ValueSource::Seed),
        report.count(ValueSource::Random),
        report.count(ValueSource::Skipped),
    );

    for fill in &report.fields {
        println!(
            "  {:<24} {:<9} {:<8} {}",
            fill.identifier.as_deref().unwrap_or("<unnamed>"),
            format!("{:?}", fill.kind),
            format!("{:?}", fill.source),
            fill.value.as_deref().unwrap_or("")
        );
    }
}

// ============================================================================
// extract subcommand
// ============================================================================

pub fn cmd_extract(config: FixtureConfig, url: &str, form: &str) -> Result<()> {
    let session = BrowserSession::launch(&config.browser_server)?;
    let mut fixture = Fixture::with_config(session, config);

    let data = {
        let mut i = fixture.i();
        i.navigate().to(url)?;
        i.form(form)?.form_data()?
    };
    info!(fields = data.len(), "form extracted");

    let json = serde_json::to_string_pretty(&data).map_err(|e| FixtureError::JsonSerialize {
        context: "form data".into(),
        source: e,
    })?;
    println!("{}", json);

    fixture.driver_mut().quit()?;
    Ok(())
}
