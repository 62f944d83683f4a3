//! # funcbox-testing
//!
//! A small evaluation harness: run a function against a list of
//! input/expected-output cases and collect, per case, the output it wrote,
//! how long it took, and whether it failed, returned an error or panicked.
//!
//! The harness returns an [`EvaluationReport`]; rendering it is left to the
//! caller. Per-case progress is emitted as `tracing` events.

mod error;
mod harness;
mod time_unit;

pub use error::{HarnessError, Result};
pub use harness::{evaluate_test_cases, Capture, CaseResult, EvaluationReport, Evaluator, TestCase};
pub use time_unit::TimeUnit;
