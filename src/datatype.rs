// used for date-valued timepoints
use chrono::{Datelike, Duration, NaiveDate};

// used when parsing a string to a timepoint
use std::str::FromStr;
// used to print out readable forms of a data type
use std::fmt;
// used to indicate that timepoints need to be hashable
use std::hash::Hash;

// values serialize untagged, so drivers can emit them as plain JSON
use serde::Serialize;

/// A single position on the time axis.
///
/// The engine is generic over the concrete axis as long as it is totally
/// ordered, can be advanced by a step, and embeds monotonically into `f64`
/// (needed for linear ratios between neighboring datapoints).
pub trait Timepoint: Copy + Ord + Hash + fmt::Debug + fmt::Display {
    // static stuff which needs to be implemented downstream
    type Step: Copy + fmt::Debug;
    const AXIS: &'static str;
    /// The unit step of the axis: the distance between a timepoint and its
    /// successor. Interval subtraction always uses this step.
    fn default_step() -> Self::Step;
    fn forward(&self, step: Self::Step) -> Self;
    fn backward(&self, step: Self::Step) -> Self;
    /// Monotone embedding into `f64`.
    fn position(&self) -> f64;
    /// Parses the textual form used by timespan descriptors.
    fn parse(text: &str) -> Option<Self>;
    // instance callable with pre-made implementation
    fn axis(&self) -> &'static str {
        Self::AXIS
    }
}

// ------------- Timepoints --------------
impl Timepoint for i64 {
    type Step = i64;
    const AXIS: &'static str = "i64";
    fn default_step() -> i64 {
        1
    }
    fn forward(&self, step: i64) -> i64 {
        self + step
    }
    fn backward(&self, step: i64) -> i64 {
        self - step
    }
    fn position(&self) -> f64 {
        *self as f64
    }
    fn parse(text: &str) -> Option<i64> {
        text.trim().parse::<i64>().ok()
    }
}

impl Timepoint for NaiveDate {
    type Step = Duration;
    const AXIS: &'static str = "NaiveDate";
    fn default_step() -> Duration {
        Duration::days(1)
    }
    fn forward(&self, step: Duration) -> NaiveDate {
        *self + step
    }
    fn backward(&self, step: Duration) -> NaiveDate {
        *self - step
    }
    fn position(&self) -> f64 {
        self.num_days_from_ce() as f64
    }
    fn parse(text: &str) -> Option<NaiveDate> {
        NaiveDate::from_str(text.trim()).ok()
    }
}

// ------------- Values --------------

/// A property value carried by an event.
///
/// Scalars get their own variants; nested structures are kept as JSON so that
/// descriptions may carry arbitrary payloads without the engine caring.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Flag(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    JSON(serde_json::Value),
}

impl Value {
    /// The numeric view used when a value takes part in interpolation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Value::Flag(b) => Some(*b),
            _ => None,
        }
    }
}
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Flag(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
            Value::JSON(j) => write!(f, "{}", j),
        }
    }
}
impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Flag(b)
    }
}
impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Integer(i)
    }
}
impl From<f64> for Value {
    fn from(x: f64) -> Value {
        Value::Float(x)
    }
}
impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Text(String::from(s))
    }
}
impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Text(s)
    }
}

// ------------- Casts --------------

/// Output conversion applied to every interpolated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cast {
    /// Truncates toward zero.
    Integer,
    Float,
}

impl Cast {
    pub fn apply(&self, raw: f64) -> Value {
        match self {
            Cast::Integer => Value::Integer(raw.trunc() as i64),
            Cast::Float => Value::Float(raw),
        }
    }
}
