//! Geographic vocabulary shared by the rollup engine and its collaborators.
//!
//! Facts, scopes and hierarchy levels. No I/O, no aggregation.

pub mod scope;
pub mod types;

pub use scope::{AreaScope, ParseScopeError};
pub use types::*;
