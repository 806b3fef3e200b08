//! News Analysis Engine
//!
//! Coordination layer running the extraction, triage, enrichment and scoring
//! stages in strict sequence.

pub mod analysis_engine;
pub mod context;
pub mod result;

pub use analysis_engine::{NewsAnalysisEngine, analyze_news, normalize_ticker};
pub use context::AnalysisContext;
pub use result::NewsAnalysis;
