//! R-style recycling — cyclic reuse of shorter inputs.
//!
//! Convention: output length is the maximum of the primary input lengths,
//! except that any empty primary input makes the output empty.

/// Output length for primary inputs of the given lengths.
///
/// Returns `0` if any length is `0`, otherwise the maximum.
pub fn output_len(lengths: &[usize]) -> usize {
    if lengths.iter().any(|&n| n == 0) {
        return 0;
    }
    lengths.iter().copied().max().unwrap_or(0)
}

/// Element `idx mod items.len()`, or `None` for an empty slice.
pub fn recycled<T>(items: &[T], idx: usize) -> Option<&T> {
    if items.is_empty() { None } else { items.get(idx % items.len()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify the output length rule including the empty short-circuit.
    //
    // Given
    // -----
    // - Lengths (1, 3, 2), (4, 0, 7) and (5, 5, 5).
    //
    // Expect
    // ------
    // - 3, 0 and 5.
    fn output_len_is_max_or_empty() {
        assert_eq!(output_len(&[1, 3, 2]), 3);
        assert_eq!(output_len(&[4, 0, 7]), 0);
        assert_eq!(output_len(&[5, 5, 5]), 5);
        assert_eq!(output_len(&[]), 0);
    }

    #[test]
    fn recycled_wraps_around() {
        let items = [10, 20, 30];
        let picked: Vec<i32> = (0..7).filter_map(|i| recycled(&items, i).copied()).collect();
        assert_eq!(picked, vec![10, 20, 30, 10, 20, 30, 10]);
        assert_eq!(recycled::<i32>(&[], 4), None);
    }
}
