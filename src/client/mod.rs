//! School statistics API client

pub mod api;
pub mod endpoints;
#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod params;
pub mod school_data;

pub use api::{AcademicApi, FinanceApi, LocationApi, PopulationApi, SafetyApi};
#[cfg(test)]
pub use mock::MockEducationClient;
pub use params::{
    AssessmentParams, EfaParams, EnrollmentParams, Level, LocationParams, MeasurementParams,
    ScopeParams,
};
pub use school_data::SchoolDataClient;

/// Complete school statistics API.
///
/// Blanket-implemented for anything implementing every sub-trait, so clients,
/// caching wrappers and mocks only implement the sub-traits.
pub trait EducationApi: LocationApi + AcademicApi + SafetyApi + FinanceApi + PopulationApi {}

impl<T> EducationApi for T where T: LocationApi + AcademicApi + SafetyApi + FinanceApi + PopulationApi
{}
