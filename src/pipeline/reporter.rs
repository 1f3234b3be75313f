use super::{assemble::RunResult, error::PipelineError};

/// Observer for a running pipeline.
///
/// All callbacks are synchronous and must return quickly; they are invoked
/// from the pipeline's own task between service calls.
pub trait Reporter: Send + Sync {
    fn on_status(&self, message: &str);

    fn on_warning(&self, artist: &str, message: &str);

    /// Fraction of the lineup handled so far, `0.0..=1.0`.
    fn on_progress(&self, fraction: f64);

    fn on_final_result(&self, result: &Result<RunResult, PipelineError>);
}

/// Reporter that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn on_status(&self, _message: &str) {}

    fn on_warning(&self, _artist: &str, _message: &str) {}

    fn on_progress(&self, _fraction: f64) {}

    fn on_final_result(&self, _result: &Result<RunResult, PipelineError>) {}
}
