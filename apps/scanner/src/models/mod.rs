pub mod document;
pub mod score;

pub use document::{Document, Folder, UploadDocument};
pub use score::{BatchResult, ScoreDetail, ScoreResult};
