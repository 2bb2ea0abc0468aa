//! Spanline – a timeline of events with interval-aware property interpolation.
//!
//! Spanline centers on the *event* concept: a pair of (timespan, property map),
//! where:
//! * A [`construct::Timespan`] is a single timepoint or a closed span `[start, end]`.
//! * A [`construct::Event`] couples a timespan with named property values.
//! * A [`construct::Timeline`] owns events sorted ascending by timespan and
//!   is immutable after construction.
//! * An [`interpolate::Interpolation`] answers "what was this property at t?"
//!   by piecewise-linear interpolation over *regular* datapoints, overridden
//!   exactly where *ephemeral* observations cover the queried timepoint.
//!
//! Ephemeral events describe one-off, non-continuous changes: they override
//! the interpolated curve inside their span but contribute no control points
//! to it. By default a span-shaped event is ephemeral and a point-shaped one
//! is regular; a property map may force ephemerality with `ephemeral: true`.
//!
//! ## Modules
//! * [`construct`] – Fundamental building blocks: timespans, events, timelines.
//! * [`datatype`] – The [`datatype::Timepoint`] axis trait (provided impls for
//!   `i64` and `chrono::NaiveDate`), property [`datatype::Value`]s, output casts.
//! * [`describe`] – Ingestion of YAML descriptions into typed timelines.
//! * [`interpolate`] – The query layer built once per (timeline, property).
//! * [`error`] – The error taxonomy; all failures are raised at build time.
//!
//! ## Time Axes
//! Any type implementing [`datatype::Timepoint`] can index a timeline. The
//! axis must be totally ordered, hashable, steppable, and embed monotonically
//! into `f64` so linear ratios between neighboring datapoints are defined.
//!
//! ## Quick Start
//! ```
//! use spanline::construct::Timeline;
//! use spanline::datatype::{Cast, Value};
//! use spanline::interpolate::Interpolation;
//!
//! let timeline = Timeline::<i64>::read(
//!     "1500:\n    population: 5000\n1600:\n    population: 7000\n",
//! ).unwrap();
//! let population =
//!     Interpolation::for_property(&timeline, "population", Some(Cast::Integer)).unwrap();
//! assert_eq!(population.at(1550), Value::Integer(6000));
//! ```
//!
//! ## Status & Roadmap
//! This is exploratory code grown out of a sequence of simulation prototypes;
//! the timeline and interpolation layers are the part that settled. Expect the
//! ingestion surface to evolve while the description format is being refined.

pub mod construct;
pub mod datatype;
pub mod describe;
pub mod error;
pub mod interpolate;
