pub mod error;
pub mod pipeline;
pub mod progress;
pub mod table;

pub use error::PipelineError;
pub use pipeline::{AugmentReport, Pipeline, output_path};
pub use progress::{ProgressReporter, ProgressStyle};
pub use table::{ColumnLayout, TableAccessor, TableError};
