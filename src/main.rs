//! Driver binary: loads a timeline description, builds one interpolation,
//! and prints the property's value over a range of timepoints as JSON lines.
//!
//! Settings come from a `spanline` config file in the working directory
//! (any format the config crate understands) or from `SPANLINE_*`
//! environment variables:
//!
//! ```toml
//! timeline = "timeline.yaml"
//! property = "population"
//! from = 1500
//! to = 1600
//! cast = "integer"
//! ```

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use spanline::construct::Timeline;
use spanline::datatype::{Cast, Value};
use spanline::error::{Result, SpanlineError};
use spanline::interpolate::Interpolation;

#[derive(Debug, Deserialize)]
struct Settings {
    /// Path of the YAML timeline description.
    timeline: String,
    /// The property to interpolate.
    property: String,
    /// Query range; defaults to the timeline's own bounds.
    from: Option<i64>,
    to: Option<i64>,
    /// Output conversion: "integer" or "float".
    cast: Option<String>,
}

#[derive(Serialize)]
struct Sample {
    t: i64,
    value: Value,
}

fn load_settings() -> std::result::Result<Settings, config::ConfigError> {
    Config::builder()
        .add_source(File::with_name("spanline").required(false))
        .add_source(Environment::with_prefix("SPANLINE"))
        .build()?
        .try_deserialize()
}

fn run(settings: &Settings) -> Result<()> {
    let timeline = Timeline::<i64>::load(&settings.timeline)?;
    info!(
        events = timeline.len(),
        property = %settings.property,
        "timeline loaded"
    );
    let cast = match settings.cast.as_deref() {
        Some("integer") => Some(Cast::Integer),
        Some("float") => Some(Cast::Float),
        None => None,
        Some(other) => {
            return Err(SpanlineError::Description(format!(
                "unknown cast: {}",
                other
            )));
        }
    };
    let interpolation = Interpolation::for_property(&timeline, &settings.property, cast)?;
    let from = settings
        .from
        .or_else(|| timeline.start())
        .ok_or_else(|| SpanlineError::Description(String::from("empty timeline")))?;
    let to = settings
        .to
        .or_else(|| timeline.end())
        .ok_or_else(|| SpanlineError::Description(String::from("empty timeline")))?;
    for (t, value) in (from..=to).zip(interpolation.over(from..=to)) {
        let sample = Sample { t, value };
        let line = serde_json::to_string(&sample)
            .map_err(|e| SpanlineError::Description(e.to_string()))?;
        println!("{}", line);
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            warn!(error = %e, "could not read settings");
            std::process::exit(1);
        }
    };
    if let Err(e) = run(&settings) {
        warn!(error = %e, "driver failed");
        std::process::exit(1);
    }
}
