// Handler modules
pub mod analyze;
pub mod utils;

// Re-export all handler functions
pub use analyze::{AnalyzeOptions, build_reader, handle_analyze, run_analyzer};
pub use utils::{exit_code, handle_analyzers, handle_contexts};
