//! The evaluation loop.

use crate::error::Result;
use crate::time_unit::TimeUnit;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::{self, Display};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

/// One input and the output it should produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> TestCase<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

/// Output written by the function under test.
///
/// Implements [`fmt::Write`], so `write!`/`writeln!` work on it.
#[derive(Debug, Default)]
pub struct Capture {
    buf: String,
}

impl Capture {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    fn into_inner(self) -> String {
        self.buf
    }
}

impl fmt::Write for Capture {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}

/// Outcome of a single case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseResult<I, O> {
    /// 1-based position in the case list.
    pub index: usize,
    pub input: I,
    /// `None` when the case failed with an error or panic.
    pub captured_output: Option<String>,
    /// Returned error or panic message.
    pub failure: Option<String>,
    pub expected: O,
    pub actual: Option<O>,
    pub passed: bool,
    /// Elapsed wall-clock time, in the report's unit.
    pub time: f64,
}

/// All case results plus totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport<I, O> {
    pub results: Vec<CaseResult<I, O>>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub time_unit: TimeUnit,
}

impl<I, O> EvaluationReport<I, O> {
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Results of the cases that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &CaseResult<I, O>> {
        self.results.iter().filter(|r| !r.passed)
    }
}

/// Runs a function over a list of cases.
///
/// ```
/// use funcbox_testing::{Capture, Evaluator, TestCase, TimeUnit};
/// use std::fmt::Write;
///
/// let cases = vec![TestCase::new((2, 3), 5), TestCase::new((1, 1), 3)];
/// let report = Evaluator::new()
///     .time_unit(TimeUnit::Micros)
///     .evaluate(&cases, |&(a, b): &(i32, i32), out: &mut Capture| {
///         writeln!(out, "adding {a} and {b}").unwrap();
///         Ok::<_, String>(a + b)
///     });
///
/// assert_eq!(report.passed, 1);
/// assert_eq!(report.failed, 1);
/// assert_eq!(report.results[0].captured_output.as_deref(), Some("adding 2 and 3\n"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    time_unit: TimeUnit,
}

impl Evaluator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn time_unit(mut self, unit: TimeUnit) -> Self {
        self.time_unit = unit;
        self
    }

    /// Run `function` on every case, in order.
    ///
    /// A case fails when the function returns an error, panics, or returns
    /// something other than the expected output. Panics are caught and do
    /// not stop the remaining cases.
    pub fn evaluate<I, O, E, F>(&self, cases: &[TestCase<I, O>], function: F) -> EvaluationReport<I, O>
    where
        I: Clone,
        O: Clone + PartialEq,
        E: Display,
        F: Fn(&I, &mut Capture) -> std::result::Result<O, E>,
    {
        let mut results = Vec::with_capacity(cases.len());

        for (idx, case) in cases.iter().enumerate() {
            let mut capture = Capture::default();

            let start = Instant::now();
            let outcome = catch_unwind(AssertUnwindSafe(|| function(&case.input, &mut capture)));
            let time = self.time_unit.scale(start.elapsed());

            let (captured_output, failure, actual) = match outcome {
                Ok(Ok(actual)) => (Some(capture.into_inner()), None, Some(actual)),
                Ok(Err(err)) => (None, Some(err.to_string()), None),
                Err(payload) => (None, Some(format!("panic: {}", panic_message(&*payload))), None),
            };
            let passed = actual.as_ref() == Some(&case.output);

            tracing::debug!(
                case = idx + 1,
                passed,
                time,
                unit = self.time_unit.symbol(),
                failure = failure.as_deref().unwrap_or(""),
                "evaluated test case"
            );

            results.push(CaseResult {
                index: idx + 1,
                input: case.input.clone(),
                captured_output,
                failure,
                expected: case.output.clone(),
                actual,
                passed,
                time,
            });
        }

        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        tracing::info!(total, passed, failed = total - passed, "evaluation finished");

        EvaluationReport {
            results,
            total,
            passed,
            failed: total - passed,
            time_unit: self.time_unit,
        }
    }
}

/// Evaluate with a time unit given by name (`s`, `ms`, `us`/`μs`, `ns`).
///
/// # Errors
///
/// Returns `UnsupportedTimeUnit` before running anything if `time_unit` is
/// not recognized.
pub fn evaluate_test_cases<I, O, E, F>(
    cases: &[TestCase<I, O>],
    function: F,
    time_unit: &str,
) -> Result<EvaluationReport<I, O>>
where
    I: Clone,
    O: Clone + PartialEq,
    E: Display,
    F: Fn(&I, &mut Capture) -> std::result::Result<O, E>,
{
    let unit: TimeUnit = time_unit.parse()?;
    Ok(Evaluator::new().time_unit(unit).evaluate(cases, function))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message() {
        let payload = catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(panic_message(&*payload), "boom");

        let payload = catch_unwind(|| panic!("{} {}", "formatted", 1)).unwrap_err();
        assert_eq!(panic_message(&*payload), "formatted 1");
    }

    #[test]
    fn test_capture_is_per_case() {
        use std::fmt::Write;

        let cases = vec![TestCase::new(1, 1), TestCase::new(2, 2)];
        let report = Evaluator::new().evaluate(&cases, |n: &i32, out: &mut Capture| {
            write!(out, "{n}").map_err(|e| e.to_string())?;
            Ok::<_, String>(*n)
        });

        assert_eq!(report.results[0].captured_output.as_deref(), Some("1"));
        assert_eq!(report.results[1].captured_output.as_deref(), Some("2"));
        assert!(report.all_passed());
    }
}
