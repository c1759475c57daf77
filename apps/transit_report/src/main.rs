use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use selene::aspects::SkyAspect;
use selene::ephemeris::{NatalChartProvider, SwissEphemerisAdapter};
use selene::impact::{annotate_aspects, AspectNote};
use selene::{PersonalTransitImpact, TransitEngine, TransitEvent};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// First day of the window (YYYY-MM-DD, default: today in UTC).
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Window length in days. Overrides [window].days.
    #[arg(long)]
    days: Option<u32>,

    /// Maximum number of personal impacts. Overrides [impacts].limit.
    #[arg(long)]
    limit: Option<usize>,

    /// Swiss Ephemeris data directory. Overrides [ephemeris].path.
    #[arg(long)]
    ephemeris: Option<PathBuf>,

    /// Write the JSON report here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    start: NaiveDate,
    days: u32,
    transits: Vec<TransitEvent>,
    impacts: Vec<PersonalTransitImpact>,
    todays_aspects: Vec<AspectNote>,
    sky_aspects: Vec<SkyAspect>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();
    let mut settings = selene_config::load_settings().context("Failed to load selene settings")?;
    if let Some(days) = args.days {
        if days == 0 {
            anyhow::bail!("--days must be at least 1");
        }
        settings.engine.window_days = days;
    }
    if let Some(limit) = args.limit {
        settings.impact_limit = limit;
    }

    let start = args.start.unwrap_or_else(|| Utc::now().date_naive());
    let ephemeris_path = args.ephemeris.or(settings.ephemeris_path.clone());
    let adapter = SwissEphemerisAdapter::new(ephemeris_path)
        .context("Failed to open Swiss Ephemeris data")?;
    let days = settings.engine.window_days;
    let engine = TransitEngine::with_settings(adapter, settings.engine.clone());

    let natal = match &settings.natal {
        Some(birth) => Some(
            engine
                .fetcher()
                .provider()
                .natal_chart(birth)
                .await
                .context("Failed to compute natal chart")?,
        ),
        None => {
            log::info!("no [natal] section configured, report will contain sky events only");
            None
        }
    };

    let transits = engine
        .upcoming_transits(start)
        .await
        .with_context(|| format!("Failed to compute transits from {start}"))?;
    let impacts = engine
        .personal_transit_impacts(&transits, natal.as_ref(), settings.impact_limit)
        .await
        .context("Failed to compute personal impacts")?;
    let todays_aspects = match &natal {
        Some(chart) => annotate_aspects(
            engine
                .todays_aspects(start, chart)
                .await
                .context("Failed to compute today's aspects")?,
        ),
        None => Vec::new(),
    };
    let sky_aspects = engine
        .sky_aspects(start)
        .await
        .context("Failed to compute sky aspects")?;

    log::info!(
        "report: {} transits, {} impacts, {} aspects, {} sky aspects",
        transits.len(),
        impacts.len(),
        todays_aspects.len(),
        sky_aspects.len()
    );

    let report = Report {
        start,
        days,
        transits,
        impacts,
        todays_aspects,
        sky_aspects,
    };
    let json = serde_json::to_string_pretty(&report)?;
    match args.out {
        Some(path) => std::fs::write(&path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
