use funcbox_testing::{
    evaluate_test_cases, Capture, Evaluator, HarnessError, TestCase, TimeUnit,
};
use serde_json::{json, Value};
use std::fmt::Write;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn divide(input: &(i64, i64), out: &mut Capture) -> Result<i64, String> {
    let (a, b) = *input;
    writeln!(out, "dividing {a} by {b}").map_err(|e| e.to_string())?;
    if b == 0 {
        return Err("ZeroDivisionError: division by zero".to_string());
    }
    Ok(a / b)
}

// ===== Outcome Tests =====

#[test]
fn test_passed_failed_and_errored_cases() {
    init_tracing();
    let cases = vec![
        TestCase::new((10, 2), 5),
        TestCase::new((9, 3), 4),
        TestCase::new((1, 0), 0),
    ];

    let report = Evaluator::new().evaluate(&cases, divide);

    assert_eq!(report.total, 3);
    assert_eq!(report.passed, 1);
    assert_eq!(report.failed, 2);
    assert!(!report.all_passed());

    let first = &report.results[0];
    assert_eq!(first.index, 1);
    assert!(first.passed);
    assert_eq!(first.captured_output.as_deref(), Some("dividing 10 by 2\n"));

    let wrong = &report.results[1];
    assert!(!wrong.passed);
    assert_eq!(wrong.actual, Some(3));
    assert_eq!(wrong.failure, None);

    let errored = &report.results[2];
    assert!(!errored.passed);
    assert_eq!(errored.actual, None);
    assert_eq!(errored.captured_output, None);
    assert_eq!(
        errored.failure.as_deref(),
        Some("ZeroDivisionError: division by zero")
    );

    assert_eq!(report.failures().count(), 2);
}

#[test]
fn test_panics_are_contained() {
    init_tracing();
    let cases = vec![TestCase::new(vec![1, 2], 1), TestCase::new(Vec::new(), 0)];

    let report = Evaluator::new().evaluate(&cases, |v: &Vec<i32>, _out: &mut Capture| {
        Ok::<_, String>(*v.first().expect("empty input"))
    });

    assert!(report.results[0].passed);
    assert_eq!(
        report.results[1].failure.as_deref(),
        Some("panic: empty input")
    );
    assert_eq!(report.passed, 1);
}

#[test]
fn test_empty_case_list() {
    let cases: Vec<TestCase<i32, i32>> = Vec::new();
    let report = Evaluator::new().evaluate(&cases, |n: &i32, _: &mut Capture| Ok::<_, String>(*n));
    assert_eq!(report.total, 0);
    assert!(report.all_passed());
}

// ===== Time Unit Tests =====

#[test]
fn test_time_unit_by_name() {
    let cases = vec![TestCase::new((4, 2), 2)];

    let report = evaluate_test_cases(&cases, divide, "us").unwrap();
    assert_eq!(report.time_unit, TimeUnit::Micros);
    assert!(report.results[0].time >= 0.0);

    let err = evaluate_test_cases(&cases, divide, "hours").unwrap_err();
    assert_eq!(err, HarnessError::UnsupportedTimeUnit("hours".to_string()));
}

// ===== Serde Tests =====

#[test]
fn test_cases_from_json_and_report_to_json() {
    let cases: Vec<TestCase<Value, Value>> = serde_json::from_value(json!([
        {"input": {"s": "abc"}, "output": "cba"},
        {"input": {"s": ""}, "output": ""},
    ]))
    .unwrap();

    let report = Evaluator::new().evaluate(&cases, |input: &Value, _: &mut Capture| {
        let s = input["s"].as_str().ok_or("missing 's'")?;
        Ok::<_, &str>(Value::from(s.chars().rev().collect::<String>()))
    });
    assert!(report.all_passed());

    let encoded = serde_json::to_value(&report).unwrap();
    assert_eq!(encoded["time_unit"], "ms");
    assert_eq!(encoded["results"][0]["expected"], "cba");
}
