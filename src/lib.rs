pub mod analyzer;
pub mod api;
pub mod config;
pub mod error;
pub mod geometry;
pub mod ngram;
pub mod ranking;
pub mod store;
pub mod util;
// cmd and reports are binary modules (see main.rs); everything a UI needs lives here.

pub use error::{KeyRankError, KrResult};
pub use ngram::Ngram;
