pub mod error;
pub mod models;
pub mod tally;
pub mod validation;

#[cfg(feature = "backend")]
mod params;

pub use error::ErrorResponse;
pub use models::*;
pub use tally::{project, Leader, NEUTRAL};
pub use validation::*;

#[cfg(test)]
mod tests;
