//! Population rollup and ranking engine.
//!
//! Consumes geographic facts from a [`FactProvider`] and assembles typed
//! population reports: city/non-city breakdowns per hierarchy level,
//! population rankings, single-area lookups, world totals and language
//! speaker counts.
//!
//! Everything here is a pure transformation over an immutable fact snapshot.
//! The provider owns I/O; presentation is left to the caller.

pub mod aggregate;
pub mod breakdown;
pub mod dataset;
pub mod language;
pub mod percentage;
pub mod provider;
pub mod ranker;
pub mod reports;

pub use aggregate::{breakdown_by, rollup, Rollup};
pub use breakdown::{PopulationBreakdown, Rounding};
pub use dataset::Dataset;
pub use language::LanguageReport;
pub use percentage::{percent_half_up, PercentSplit};
pub use provider::{FactProvider, MemoryFactProvider};
pub use ranker::{rank, rank_all, rank_top, Populated, RankedEntity};
pub use reports::PopulationReports;
