mod arbitrary;

mod property_sanitize;

/// Number of cases each property runs.
fn test_count() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;

    tests
}
