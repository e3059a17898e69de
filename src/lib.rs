pub mod batch;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod sql;

pub use config::ConverterConfig;
pub use error::{ConvertError, Result};
pub use pipeline::{Pipeline, RunReport};
