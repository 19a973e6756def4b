//! Elapsed time resolution. Report generators disagree on where the authoritative
//! total lives and sometimes write wall-clock timestamps where durations belong, so
//! unparsable values never fail a parse.

/// Seconds from a `time` attribute, `None` when absent, unparsable, negative or
/// not finite.
pub fn seconds<T: AsRef<str>>(value: Option<T>) -> Option<f64> {
    value
        .and_then(|value| value.as_ref().trim().parse::<f64>().ok())
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
}

pub fn seconds_or_default<T: AsRef<str>>(value: Option<T>) -> f64 {
    seconds(value).unwrap_or_default()
}

/// Sum of every parsable value, skipping the rest.
pub fn sum_seconds<T, I>(values: I) -> f64
where
    T: AsRef<str>,
    I: IntoIterator<Item = Option<T>>,
{
    values.into_iter().filter_map(seconds).sum()
}

/// The authoritative total when there is one, otherwise the sum of its parts.
pub fn total_or_sum<T, I>(total: Option<f64>, parts: I) -> f64
where
    T: AsRef<str>,
    I: IntoIterator<Item = Option<T>>,
{
    match total {
        Some(total) => total,
        None => {
            let sum = sum_seconds(parts);
            tracing::debug!(sum, "no usable total time, summing part times");
            sum
        }
    }
}
