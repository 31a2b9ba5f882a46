//! API paths, relative to the configured base URL

use super::models::SafetyCategory;
use super::params::Level;

pub const DISTRICTS: &str = "location/districts";
pub const SCHOOLS: &str = "location/schools";
pub const TOWNS: &str = "location/towns";
pub const SAUS: &str = "location/saus";

pub const MEASUREMENT_TYPES: &str = "measurements/types";
pub const MEASUREMENTS: &str = "measurements/";

pub const ASSESSMENT_SUBJECTS: &str = "assessments/subjects";
pub const ASSESSMENT_SUBGROUPS: &str = "assessments/subgroups";

pub const EFA: &str = "education-freedom-account/";

/// `{prefix}/{level}`, e.g. `enrollment/district`
pub fn leveled(prefix: &str, level: Level) -> String {
    format!("{}/{}", prefix, level)
}

pub fn assessments(level: Level) -> String {
    leveled("assessments", level)
}

pub fn safety(category: SafetyCategory, level: Level) -> String {
    format!("safety/{}/{}", level, category)
}

pub fn finance(level: Level) -> String {
    leveled("finance", level)
}

pub fn enrollment(level: Level) -> String {
    leveled("enrollment", level)
}

pub fn graduation(level: Level) -> String {
    leveled("outcomes/graduation", level)
}

pub fn post_graduation(level: Level) -> String {
    leveled("outcomes/post-graduation", level)
}

pub fn staff(level: Level) -> String {
    leveled("staff", level)
}

pub fn class_size(level: Level) -> String {
    leveled("class-size", level)
}
