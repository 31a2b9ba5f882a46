//! Display models for CLI output
//!
//! Shared display model abstractions for converting processed data into
//! CLI-friendly display formats.

pub mod display;

pub use display::{
    CategoryDisplay, ClassSizeDisplay, ClassificationDisplay, DistrictDisplay, EfaYearDisplay,
    EnrollmentYearDisplay, FinanceYearDisplay, GradeEnrollmentDisplay, GraduationDisplay,
    MeasurementDisplay, PlanDisplay, ProficiencyDisplay, SafetySummaryDisplay, SafetyYearDisplay,
    SchoolDisplay, StaffDisplay, format_count, format_dollars, or_missing,
};

#[cfg(test)]
mod tests {
    use crate::models::{format_count, format_dollars, or_missing};

    #[test]
    fn test_formatting_helpers_reachable_from_models() {
        assert_eq!(format_count(3987), "3,987");
        assert_eq!(format_dollars(1_234_567.4), "$1,234,567");
        assert_eq!(or_missing(Some(2), |n| n.to_string()), "2");
    }
}
