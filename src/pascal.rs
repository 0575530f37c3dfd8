//! Bottom-up evaluation of Pascal's triangle, one row at a time.
//!
//! No memo table and no recursion: a single row is updated in place from
//! right to left.
use crate::error::{check_domain, CombinationError, Result};
use crate::Coefficient;

/// Computes `C(n, k)` from the first `min(k, n - k) + 1` columns of the
/// rows `0..=n`.
///
/// Thanks to the symmetry `C(n, k) = C(n, n - k)` every intermediate value is
/// at most `C(n, k)`, so this only overflows when the result does.
pub fn binomial<T: Coefficient>(k: u64, n: u64) -> Result<T> {
    check_domain(k, n)?;
    let width = k.min(n - k);
    let row: Vec<T> =
        rows_up_to(n, width).map_err(|_| CombinationError::overflow::<T>(k, n))?;
    Ok(row[width as usize].clone())
}

/// The full `n`-th row of Pascal's triangle, `C(n, 0), ..., C(n, n)`.
pub fn row<T: Coefficient>(n: u64) -> Result<Vec<T>> {
    rows_up_to(n, n).map_err(|col| CombinationError::overflow::<T>(col, n))
}

/// Row `n` truncated to columns `0..=width`. On overflow, returns the column
/// that did not fit.
fn rows_up_to<T: Coefficient>(n: u64, width: u64) -> Result<Vec<T>, u64> {
    let mut row = Vec::new();
    row.push(T::one());
    for r in 1..=n {
        if r <= width {
            row.push(T::one());
        }
        for col in (1..=(r - 1).min(width)).rev() {
            let idx = col as usize;
            row[idx] = row[idx].checked_add(&row[idx - 1]).ok_or(col)?;
        }
    }
    Ok(row)
}

#[cfg(test)]
mod test {
    use super::*;
    use num_bigint::BigUint;

    #[test]
    fn test_small_rows() {
        assert_eq!(row::<u64>(0), Ok(vec![1]));
        assert_eq!(row::<u64>(1), Ok(vec![1, 1]));
        assert_eq!(row::<u64>(4), Ok(vec![1, 4, 6, 4, 1]));
        assert_eq!(row::<u64>(6), Ok(vec![1, 6, 15, 20, 15, 6, 1]));
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial::<u64>(0, 5), Ok(1));
        assert_eq!(binomial::<u64>(5, 5), Ok(1));
        assert_eq!(binomial::<u64>(2, 4), Ok(6));
        assert_eq!(binomial::<u64>(3, 5), Ok(10));
        assert_eq!(binomial::<u64>(5, 10), Ok(252));
        assert_eq!(binomial::<u64>(2, 1000), Ok(499_500));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(
            binomial::<u64>(6, 5),
            Err(CombinationError::InvalidArgument { k: 6, n: 5 })
        );
    }

    #[test]
    fn test_overflow_only_when_result_overflows() {
        assert_eq!(binomial::<u64>(33, 66), Ok(7_219_428_434_016_265_740));
        assert_eq!(binomial::<u64>(1, 1_000_000), Ok(1_000_000));
        assert!(matches!(
            binomial::<u64>(34, 68),
            Err(CombinationError::Overflow { k: 34, n: 68, .. })
        ));
    }

    #[test]
    fn test_overflow_before_row_is_wide() {
        assert!(matches!(
            binomial::<u64>(u64::MAX / 2, u64::MAX),
            Err(CombinationError::Overflow { .. })
        ));
        assert!(matches!(
            binomial::<u128>(1 << 40, 1 << 41),
            Err(CombinationError::Overflow { .. })
        ));
    }

    #[test]
    fn test_row_overflow_names_column() {
        assert!(matches!(
            row::<u64>(68),
            Err(CombinationError::Overflow { n: 68, .. })
        ));
    }

    #[test]
    fn test_big_row_sums_to_power_of_two() {
        let row = row::<BigUint>(200).unwrap();
        let sum: BigUint = row.iter().sum();
        assert_eq!(sum, BigUint::from(1u8) << 200usize);
    }
}
