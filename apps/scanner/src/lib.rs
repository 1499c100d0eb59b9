//! Resume Scanner client: drives a remote resume evaluation service.
//!
//! The interesting part is `session`, which tracks folder browsing, document
//! selection, scoring parameters, and the upload and batch scan flows. The
//! service itself sits behind `client::EvaluationService`.

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod report;
pub mod scoring;
pub mod session;

pub use client::{EvaluationService, HttpEvaluationService};
pub use config::Config;
pub use errors::ServiceError;
pub use session::{Session, SessionEvent, SessionState, Tab};
