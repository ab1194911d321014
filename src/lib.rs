pub mod models;
pub mod config;
pub mod progression;
pub mod store;
pub mod service;

pub use models::{Award, AwardBody, CareerError, CareerSnapshot, Certification, NextTier, Release, Result, Tier};
pub use config::Settings;
pub use progression::{group_by_category_and_year, CareerReport, CertificationEngine, ThresholdTable};
pub use service::CareerService;
