//! Display model implementations for table and JSON output
//!
//! Display models turn processed data into CLI-friendly rows with column
//! names and formatted values.

mod academic;
mod common;
mod finance;
mod location;
mod outcome;
mod population;
mod safety;

pub use academic::ProficiencyDisplay;
pub use common::{format_count, format_dollars, or_missing};
pub use finance::{CategoryDisplay, EfaYearDisplay, FinanceYearDisplay};
pub use location::{DistrictDisplay, SchoolDisplay};
pub use outcome::{ClassSizeDisplay, GraduationDisplay, PlanDisplay, StaffDisplay};
pub use population::{EnrollmentYearDisplay, GradeEnrollmentDisplay, MeasurementDisplay};
pub use safety::{ClassificationDisplay, SafetySummaryDisplay, SafetyYearDisplay};
