pub mod autocorr;
pub mod batch;
pub mod cancel;
pub mod detector;
pub mod onset;
pub mod pipeline;
pub mod prior;
pub mod selector;
pub mod tempogram;

pub use batch::{BatchAnalyzer, BatchProgress};
pub use cancel::CancelToken;
pub use detector::{AutocorrelationDetector, TempoDetector};
pub use pipeline::{analyze_file, analyze_path, try_analyze_file};
