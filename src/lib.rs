//! Per-author contribution statistics from `git log --numstat` output,
//! separating AI-attributed lines (`AIG:` ratio in the commit message)
//! from the rest and counting AI-assisted fix commits.

pub mod aggregate;
pub mod cli;
pub mod error;
pub mod git;
pub mod model;
pub mod parse;
pub mod period;
pub mod report;
pub mod stats;

pub use aggregate::{aggregate, AuthorTotals};
pub use error::{AigError, Result};
pub use parse::{CommitAnalysis, CommitParser, ExtensionFilter};
pub use stats::{analyze_log, Analysis};
