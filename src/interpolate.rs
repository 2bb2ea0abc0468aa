// the override map keys are timepoints, hashed with the fast hasher
use std::collections::HashMap;

use tracing::debug;

use crate::construct::{Datapoint, PropertyHasher, Timeline, Timespan};
use crate::datatype::{Cast, Timepoint, Value};
use crate::error::{Result, SpanlineError};

/// A built interpolation for one property of a timeline.
///
/// Regular datapoints are expanded into a piecewise-linear table (a span
/// contributes both its edges with the same value, so the curve stays flat
/// across it and only rises or falls between spans). Ephemeral datapoints
/// become a dense override map covering every discrete timepoint in their
/// span; a queried timepoint found there short-circuits the curve.
///
/// All failures surface at build time. Queries on a built interpolation are
/// infallible: outside the known range they clamp to the nearest edge value.
pub struct Interpolation<T: Timepoint> {
    xs: Vec<T>,
    ys: Vec<f64>,
    overrides: HashMap<T, f64, PropertyHasher>,
    cast: Option<Cast>,
}

impl<T: Timepoint> Interpolation<T> {
    /// Builds the interpolation of a named property over a timeline, using
    /// the timeline's configured step for the override expansion.
    pub fn for_property(
        timeline: &Timeline<T>,
        name: &str,
        cast: Option<Cast>,
    ) -> Result<Interpolation<T>> {
        let (regular, ephemeral) = timeline.property_lists(name)?;
        Self::from_datapoints(&regular, &ephemeral, cast, timeline.step())
    }

    /// Builds an interpolation from explicit datapoint lists. The ephemeral
    /// list must be in timeline sort order: when spans overlap, the later
    /// datapoint wins for every timepoint both cover.
    pub fn from_datapoints(
        regular: &[Datapoint<T>],
        ephemeral: &[Datapoint<T>],
        cast: Option<Cast>,
        step: T::Step,
    ) -> Result<Interpolation<T>> {
        if regular.is_empty() {
            return Err(SpanlineError::EmptyDataset(String::from(
                "zero regular datapoints",
            )));
        }
        let mut table: Vec<(T, f64)> = Vec::with_capacity(regular.len() * 2);
        for (timespan, value) in regular {
            let y = numeric(timespan, value)?;
            table.push((timespan.start(), y));
            if let Some(end) = timespan.end() {
                table.push((end, y));
            }
        }
        // stable, so adjacent spans sharing an edge keep their timeline order
        table.sort_by(|a, b| a.0.cmp(&b.0));

        let mut overrides = HashMap::<T, f64, PropertyHasher>::default();
        for (timespan, value) in ephemeral {
            let y = numeric(timespan, value)?;
            let end = timespan.upper();
            let mut t = timespan.start();
            while t <= end {
                overrides.insert(t, y);
                let next = t.forward(step);
                if next <= t {
                    // a non-advancing step would walk this span forever
                    break;
                }
                t = next;
            }
        }
        debug!(
            points = table.len(),
            overrides = overrides.len(),
            "interpolation built"
        );
        let (xs, ys): (Vec<T>, Vec<f64>) = table.into_iter().unzip();
        Ok(Interpolation {
            xs,
            ys,
            overrides,
            cast,
        })
    }

    /// The value at a single timepoint.
    pub fn at(&self, timepoint: T) -> Value {
        let raw = match self.overrides.get(&timepoint) {
            Some(value) => *value,
            None => self.curve(timepoint),
        };
        self.cast.unwrap_or(Cast::Float).apply(raw)
    }

    /// Lazily maps a sequence of timepoints to their values, preserving
    /// order and length.
    pub fn over<'a, I>(&'a self, timepoints: I) -> impl Iterator<Item = Value> + 'a
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        timepoints.into_iter().map(move |t| self.at(t))
    }

    // Piecewise-linear lookup over the expanded table. The lower-bound
    // search means that at a timepoint shared by two table entries the
    // first one in sort order answers.
    fn curve(&self, timepoint: T) -> f64 {
        let n = self.xs.len();
        let i = self.xs.partition_point(|x| *x < timepoint);
        if i == 0 {
            return self.ys[0];
        }
        if i >= n {
            return self.ys[n - 1];
        }
        if self.xs[i] == timepoint {
            return self.ys[i];
        }
        let x0 = self.xs[i - 1].position();
        let x1 = self.xs[i].position();
        let (y0, y1) = (self.ys[i - 1], self.ys[i]);
        y0 + (y1 - y0) * (timepoint.position() - x0) / (x1 - x0)
    }
}

fn numeric<T: Timepoint>(timespan: &Timespan<T>, value: &Value) -> Result<f64> {
    value.as_f64().ok_or_else(|| SpanlineError::NonNumericDatapoint {
        at: timespan.to_string(),
        value: value.to_string(),
    })
}
