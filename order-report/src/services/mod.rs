// Report generation service
//
// Ties an input source, the pipeline and an output sink together. Both CLI
// front ends (batch and interactive) go through `run_report`.

pub mod report_run;

pub use report_run::{RunSummary, run_report};
