//! API trait definitions split by responsibility
//!
//! This module organizes the school-statistics API surface into focused sub-traits:
//! - [`LocationApi`] - Districts, schools, towns, SAUs
//! - [`AcademicApi`] - Measurements, assessments and outcomes
//! - [`SafetyApi`] - Bullying, harassment, discipline, truancy, restraint, seclusion
//! - [`FinanceApi`] - District finances and Education Freedom Accounts
//! - [`PopulationApi`] - Enrollment, staffing and class sizes
//!
//! The [`EducationApi`](super::EducationApi) super-trait combines all of them.
//!
//! Every method takes a `force_refresh` flag. Plain HTTP clients ignore it;
//! caching wrappers skip their read and overwrite the stored entry.

mod academic;
mod finance;
mod location;
mod population;
mod safety;

pub use academic::AcademicApi;
pub use finance::FinanceApi;
pub use location::LocationApi;
pub use population::PopulationApi;
pub use safety::SafetyApi;
