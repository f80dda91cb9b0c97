pub mod error;
pub mod estimate;
pub mod format;
pub mod params;

pub use crate::error::AnalysisError;
pub use crate::estimate::TempoEstimate;
pub use crate::format::{ensure_supported, is_supported, SUPPORTED_EXTENSIONS};
pub use crate::params::TempoParams;
