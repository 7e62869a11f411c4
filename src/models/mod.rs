//! # Survey Models
//!
//! Data shapes flowing through the consumer: the raw and validated submission, the
//! classifier output, and the enriched record written to the result store.

pub mod record;
pub mod sentiment;
pub mod submission;

pub use record::{partition_key, SurveyRecord, PARTITION_KEY_PREFIX};
pub use sentiment::{SentimentLabel, SentimentResult, SentimentScores};
pub use submission::{RawSurveySubmission, SurveySubmission, ValidationError};
