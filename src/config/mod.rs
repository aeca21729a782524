pub mod builder;
pub mod keys;
pub mod types;

pub use builder::*;
pub use keys::*;
pub use types::*;
