pub mod classify;
pub mod error;
pub mod metric;

pub use classify::{classify, KnnConfig};
pub use error::{Error, Result};
pub use metric::Minkowski;
