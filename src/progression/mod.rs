pub mod thresholds;
pub mod engine;
pub mod awards;
pub mod report;

pub use thresholds::{ThresholdSettings, ThresholdTable};
pub use engine::{CertificationEngine, ReleaseProgress};
pub use awards::{group_by_category_and_year, tally_awards, AwardGroups, AwardTally, YearBuckets};
pub use report::CareerReport;
