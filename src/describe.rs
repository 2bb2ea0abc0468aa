//! Ingestion of timeline descriptions.
//!
//! A description is a mapping from timespan descriptors to property maps,
//! typically written in YAML:
//!
//! ```yaml
//! 1500:
//!     alive_population: 5000
//!     mortality: 0.015
//! "[1500, 1550]":
//!     name: XV century
//!     conversion_factor: 0.2
//! 1600:
//!     alive_population: 7000
//! ```
//!
//! Descriptor keys may be plain scalars, two-element sequences, or strings
//! holding either form (`"1500"`, `"[1500, 1550]"`, `"2010-01-01"`). The
//! engine itself never parses text; everything funnels through
//! [`Timepoint::parse`](crate::datatype::Timepoint::parse).

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::{Mapping, Value as Yaml};
use tracing::debug;

use crate::construct::{Event, Properties, Timeline, Timespan};
use crate::datatype::{Timepoint, Value};
use crate::error::{Result, SpanlineError};

lazy_static! {
    // a string descriptor of the form "[start, end]"
    static ref SPAN_KEY: Regex = Regex::new(r"^\[\s*(.+?)\s*,\s*(.+?)\s*\]$").unwrap();
}

impl<T: Timepoint> Timeline<T> {
    /// Creates a timeline from an already-parsed description mapping.
    pub fn create(description: &Mapping) -> Result<Timeline<T>> {
        let mut events = Vec::with_capacity(description.len());
        for (key, value) in description {
            let timespan = parse_timespan(key)?;
            let properties = parse_properties(value)?;
            events.push(Event::new(timespan, properties));
        }
        Ok(Timeline::from_events(events))
    }

    /// Creates a timeline from YAML text.
    pub fn read(text: &str) -> Result<Timeline<T>> {
        let description: Mapping = serde_yaml::from_str(text)?;
        Self::create(&description)
    }

    /// Creates a timeline from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Timeline<T>> {
        debug!(file = %path.as_ref().display(), "loading timeline description");
        let text = fs::read_to_string(path)?;
        Self::read(&text)
    }
}

/// Classifies one descriptor key as a point or a span.
pub fn parse_timespan<T: Timepoint>(key: &Yaml) -> Result<Timespan<T>> {
    match key {
        Yaml::Sequence(pair) => {
            if pair.len() != 2 {
                return Err(malformed(key));
            }
            let start = parse_bound::<T>(&pair[0]).ok_or_else(|| malformed(key))?;
            let end = parse_bound::<T>(&pair[1]).ok_or_else(|| malformed(key))?;
            Timespan::between(start, end)
        }
        Yaml::String(text) => {
            if let Some(found) = SPAN_KEY.captures(text) {
                let start = T::parse(&found[1]).ok_or_else(|| malformed(key))?;
                let end = T::parse(&found[2]).ok_or_else(|| malformed(key))?;
                return Timespan::between(start, end);
            }
            let timepoint = T::parse(text).ok_or_else(|| malformed(key))?;
            Ok(Timespan::at(timepoint))
        }
        Yaml::Number(_) => {
            let timepoint = parse_bound::<T>(key).ok_or_else(|| malformed(key))?;
            Ok(Timespan::at(timepoint))
        }
        _ => Err(malformed(key)),
    }
}

// a bound inside a sequence descriptor may itself be a number or a string
fn parse_bound<T: Timepoint>(bound: &Yaml) -> Option<T> {
    match bound {
        Yaml::Number(n) => T::parse(&n.to_string()),
        Yaml::String(s) => T::parse(s),
        _ => None,
    }
}

fn malformed(key: &Yaml) -> SpanlineError {
    SpanlineError::MalformedTimespan(format!("{:?}", key))
}

/// Converts a property payload into a typed property map. A missing payload
/// (YAML null) yields an empty map.
pub fn parse_properties(payload: &Yaml) -> Result<Properties> {
    let mut properties = Properties::default();
    match payload {
        Yaml::Null => (),
        Yaml::Mapping(map) => {
            for (key, value) in map {
                let name = match key {
                    Yaml::String(s) => s.clone(),
                    _ => {
                        return Err(SpanlineError::Description(format!(
                            "property names must be strings, got {:?}",
                            key
                        )));
                    }
                };
                properties.insert(name, parse_value(value)?);
            }
        }
        _ => {
            return Err(SpanlineError::Description(format!(
                "property payload must be a mapping, got {:?}",
                payload
            )));
        }
    }
    Ok(properties)
}

/// Converts one YAML scalar into a [`Value`]; nested structures are carried
/// through as JSON.
pub fn parse_value(value: &Yaml) -> Result<Value> {
    match value {
        Yaml::Bool(b) => Ok(Value::Flag(*b)),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(SpanlineError::Description(format!(
                    "unrepresentable number {:?}",
                    n
                )))
            }
        }
        Yaml::String(s) => Ok(Value::Text(s.clone())),
        other => {
            let json = serde_json::to_value(other)
                .map_err(|e| SpanlineError::Description(e.to_string()))?;
            Ok(Value::JSON(json))
        }
    }
}
