//! Idea Curator Common Library
//!
//! CLIとダッシュボードエンジンで共有される型と純粋な導出ロジック

pub mod types;
pub mod aggregate;
pub mod filter;
pub mod curation;
pub mod stats;
pub mod api_types;
pub mod error;

pub use types::{Batch, DerivedIdea, Idea};
pub use aggregate::{aggregate_ideas, grade_distribution, UidStrategy};
pub use filter::{filter_ideas, CurationFilter, FilterCriteria};
pub use curation::{CurationEntry, CurationStatus, CurationStore};
pub use stats::{HealthSnapshot, StatsSnapshot};
pub use api_types::{CurationRequest, FeedbackAction, FeedbackRequest, MarkdownExport};
pub use error::{Error, Result};
