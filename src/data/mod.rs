//! Client-side processing of fetched data
//!
//! Pure functions over cached API arrays: filtering by year, subject, grade
//! and subgroup; percentages, ranks, year-over-year deltas, weighted
//! averages, per-100-student rates and inflation adjustment. Nothing in here
//! performs I/O.

pub mod assessment;
pub mod class_size;
pub mod efa;
pub mod enrollment;
pub mod finance;
pub mod measurement;
pub mod outcome;
pub mod safety;
pub mod staff;
pub mod trend;

pub use trend::{
    HasYear, YearDelta, YearValue, latest_year, percentage, round_to, year_over_year,
};
