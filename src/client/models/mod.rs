//! API response models
//!
//! Organized by resource family. Everything is re-exported here so callers can
//! `use crate::client::models::District` without knowing the file layout.

mod assessment;
mod enrollment;
mod finance;
mod location;
mod measurement;
mod outcome;
mod safety;
mod staff;

pub use assessment::{AssessmentRow, AssessmentSubgroup, AssessmentSubject};
pub use enrollment::EnrollmentRecord;
pub use finance::{EfaEntry, FinanceEntry, FinanceEntryType};
pub use location::{District, Sau, School, Town};
pub use measurement::{Measurement, MeasurementRow, MeasurementType};
pub use outcome::{GraduationRecord, PostGraduationRecord};
pub use safety::{SafetyCategory, SafetyParams, SafetyRecord};
pub use staff::{ClassSizeRecord, StaffRecord};
