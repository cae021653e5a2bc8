/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Milliseconds at UTC midnight of the given timestamp's day
pub fn start_of_day_millis(ts_millis: i64) -> i64 {
    const DAY_MS: i64 = 24 * 60 * 60 * 1000;
    ts_millis - ts_millis.rem_euclid(DAY_MS)
}
