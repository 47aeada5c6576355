use studex_core::StudentRecord;

/// Build a record without going through validation
#[allow(dead_code)]
pub fn student(name: &str, age: u32, grade: f64, gender: &str) -> StudentRecord {
    StudentRecord::new(name, age, grade, gender)
}

/// The two-record roster used across the scenario tests
#[allow(dead_code)]
pub fn alice_and_bob() -> Vec<StudentRecord> {
    vec![
        student("Alice", 20, 3.5, "F"),
        student("Bob", 22, 2.5, "M"),
    ]
}

#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
