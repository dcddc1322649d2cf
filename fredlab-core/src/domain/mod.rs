//! Domain types shared across the data facade, engine, and front-ends.

pub mod scale;
pub mod series;

pub use scale::ScaleFactor;
pub use series::{DateRange, Observation, SeriesSelection, TimeSeries};
