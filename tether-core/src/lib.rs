pub mod error;
pub mod geometry;
pub mod labels;
pub mod property;
pub mod status;
pub mod types;

pub use geometry::*;
pub use property::*;
pub use status::StatusCode;
pub use types::*;

use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;
