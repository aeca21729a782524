//! Safe SQL execution: values bound as parameters, never interpolated.

pub mod params;
pub mod query;
pub use params::*;
pub use query::*;
