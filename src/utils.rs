//! Utility functions for the crate.

/// Return the index of the maximum value in the given slice of values.
///
/// Equal values keep the earliest index, so the widest-dimension choice
/// made during splitting is deterministic.
///
/// This will return `None` if the given slice is empty.
pub fn arg_max(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best, (i, &v)| match best {
            Some((_, max)) if v <= max => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

/// The Euclidean norm of a vector.
pub fn norm(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum::<f64>().sqrt()
}
