// property maps use HashMap with a fast non-cryptographic hasher
use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use seahash::SeaHasher;

// used to print out readable forms of a construct
use std::fmt;

// used to overload subtraction for timespans
use std::ops;

use tracing::debug;

// our own stuff that we need
use crate::datatype::{Timepoint, Value};
use crate::error::{Result, SpanlineError};

pub type PropertyHasher = BuildHasherDefault<SeaHasher>;

/// The property map of an event: property name to value.
pub type Properties = HashMap<String, Value, PropertyHasher>;

/// One extracted `(timespan, value)` observation for a property.
pub type Datapoint<T> = (Timespan<T>, Value);
pub type Datapoints<T> = Vec<Datapoint<T>>;

/// The reserved property name that forces an event to be ephemeral.
pub const EPHEMERAL_FLAG: &str = "ephemeral";

// ------------- Timespan -------------

/// A single timepoint or a closed span `[start, end]` on the time axis.
///
/// Construction normalizes a degenerate span (equal bounds) to a point, so
/// `end` is only ever populated when `start < end` strictly. The derived
/// ordering compares starts first; on equal starts a point sorts before any
/// span and among spans the larger end sorts greater.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct Timespan<T: Timepoint> {
    start: T,
    end: Option<T>,
}

impl<T: Timepoint> Timespan<T> {
    /// A single timepoint.
    pub fn at(timepoint: T) -> Self {
        Self {
            start: timepoint,
            end: None,
        }
    }
    /// A closed span. Equal bounds collapse to a point; reversed bounds are
    /// an invariant violation.
    pub fn between(start: T, end: T) -> Result<Self> {
        if start > end {
            return Err(SpanlineError::InvalidInterval {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self::normalized(start, end))
    }
    // internal constructor for bounds already known to be ordered
    fn normalized(start: T, end: T) -> Self {
        debug_assert!(start <= end);
        Self {
            start,
            end: if start == end { None } else { Some(end) },
        }
    }
    pub fn start(&self) -> T {
        self.start
    }
    pub fn end(&self) -> Option<T> {
        self.end
    }
    /// The end for a span, the start itself for a point.
    pub fn upper(&self) -> T {
        self.end.unwrap_or(self.start)
    }
    pub fn is_span(&self) -> bool {
        self.end.is_some()
    }
    /// Iff this timespan covers the given timepoint.
    pub fn contains(&self, timepoint: T) -> bool {
        match self.end {
            None => self.start == timepoint,
            Some(end) => self.start <= timepoint && timepoint <= end,
        }
    }
    /// The portion(s) of `self` not covered by `other`: zero, one, or two
    /// timespans. Remainders step away from `other` by the unit step of the
    /// axis, which keeps the algebra closed over discrete timepoints.
    pub fn subtract(&self, other: &Timespan<T>) -> Vec<Timespan<T>> {
        let step = T::default_step();
        if other.upper() < self.start || other.start > self.upper() {
            // non-overlapping case; move along, nothing to modify here
            return vec![*self];
        }
        let mut result = Vec::new();
        if self.start < other.start {
            // case 'before'
            result.push(Self::normalized(self.start, other.start.backward(step)));
        }
        if other.upper() < self.upper() {
            // case 'after'
            result.push(Self::normalized(other.upper().forward(step), self.upper()));
        }
        // iff none of the above: 'other' completely covers 'self'
        result
    }
}
impl<T: Timepoint> ops::Sub for &Timespan<T> {
    type Output = Vec<Timespan<T>>;
    fn sub(self, other: &Timespan<T>) -> Vec<Timespan<T>> {
        self.subtract(other)
    }
}
impl<T: Timepoint> fmt::Display for Timespan<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.end {
            None => write!(f, "{}", self.start),
            Some(end) => write!(f, "({}, {})", self.start, end),
        }
    }
}

// ------------- Event -------------

/// An event in a timeline: a timespan paired with a property map.
///
/// An event is *ephemeral* when its properties say `ephemeral: true`, or by
/// default when its timespan is a span rather than a single timepoint.
/// Ephemeral observations override interpolation inside their span instead
/// of contributing datapoints to the curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<T: Timepoint> {
    timespan: Timespan<T>,
    properties: Properties,
}

impl<T: Timepoint> Event<T> {
    pub fn new(timespan: Timespan<T>, properties: Properties) -> Self {
        Self {
            timespan,
            properties,
        }
    }
    pub fn timespan(&self) -> Timespan<T> {
        self.timespan
    }
    pub fn properties(&self) -> &Properties {
        &self.properties
    }
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
    /// The explicit flag can force ephemerality but a span stays ephemeral
    /// even under `ephemeral: false`.
    pub fn is_ephemeral(&self) -> bool {
        self.properties
            .get(EPHEMERAL_FLAG)
            .and_then(Value::as_flag)
            .unwrap_or(false)
            || self.timespan.is_span()
    }
}
impl<T: Timepoint> fmt::Display for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // keys are printed sorted so the rendering is deterministic
        let mut names: Vec<&String> = self.properties.keys().collect();
        names.sort();
        let mut s = String::new();
        for name in names {
            s += &format!("{}: {}, ", name, self.properties[name]);
        }
        s.pop();
        s.pop();
        write!(f, "{}: {{{}}}", self.timespan, s)
    }
}

// ------------- Ephemerality -------------

/// Filter for property extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ephemerality {
    Regular,
    Ephemeral,
}

// ------------- Timeline -------------

/// An ordered, immutable sequence of events.
///
/// Construction sorts events ascending by timespan; every query afterwards
/// reads the sorted vector without mutating it, so a timeline is safe to
/// share read-only.
#[derive(Debug, Clone)]
pub struct Timeline<T: Timepoint> {
    events: Vec<Event<T>>,
    step: T::Step,
}

impl<T: Timepoint> Timeline<T> {
    /// Builds a timeline from events in any order.
    pub fn from_events(mut events: Vec<Event<T>>) -> Self {
        events.sort_by(|a, b| a.timespan().cmp(&b.timespan()));
        debug!(events = events.len(), "timeline sorted");
        Self {
            events,
            step: T::default_step(),
        }
    }
    /// Sets the step used when expanding ephemeral spans into discrete
    /// override timepoints.
    pub fn with_step(mut self, step: T::Step) -> Self {
        self.step = step;
        self
    }
    pub fn step(&self) -> T::Step {
        self.step
    }
    pub fn events(&self) -> &[Event<T>] {
        &self.events
    }
    pub fn len(&self) -> usize {
        self.events.len()
    }
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
    /// The earliest timepoint any event starts at.
    pub fn start(&self) -> Option<T> {
        self.events.first().map(|e| e.timespan().start())
    }
    /// The latest timepoint the last event reaches.
    pub fn end(&self) -> Option<T> {
        self.events.last().map(|e| e.timespan().upper())
    }
    /// Iterates over `(timespan, value)` for events carrying the named
    /// property, optionally filtered to only regular or only ephemeral
    /// events. Restartable, since the timeline never changes.
    pub fn property<'a>(
        &'a self,
        name: &'a str,
        filter: Option<Ephemerality>,
    ) -> impl Iterator<Item = (Timespan<T>, &'a Value)> + 'a {
        self.events.iter().filter_map(move |event| {
            let value = event.property(name)?;
            let wanted = match filter {
                None => true,
                Some(Ephemerality::Regular) => !event.is_ephemeral(),
                Some(Ephemerality::Ephemeral) => event.is_ephemeral(),
            };
            if wanted {
                Some((event.timespan(), value))
            } else {
                None
            }
        })
    }
    /// Splits the named property into its regular and ephemeral datapoints,
    /// both in timeline order. A property that never appears on a regular
    /// event cannot anchor an interpolation and is rejected.
    pub fn property_lists(&self, name: &str) -> Result<(Datapoints<T>, Datapoints<T>)> {
        let mut regular = Vec::new();
        let mut ephemeral = Vec::new();
        for event in &self.events {
            if let Some(value) = event.property(name) {
                let list = if event.is_ephemeral() {
                    &mut ephemeral
                } else {
                    &mut regular
                };
                list.push((event.timespan(), value.clone()));
            }
        }
        if regular.is_empty() {
            return Err(SpanlineError::PropertyNotFound(String::from(name)));
        }
        Ok((regular, ephemeral))
    }
}
impl<T: Timepoint> fmt::Display for Timeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.events.is_empty() {
            return write!(f, "Timeline()");
        }
        writeln!(f, "Timeline(")?;
        for event in &self.events {
            writeln!(f, "    {},", event)?;
        }
        write!(f, ")")
    }
}
