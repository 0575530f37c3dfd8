use thiserror::Error;

pub type Result<T, E = CombinationError> = std::result::Result<T, E>;

/// Errors returned at the boundary of the public calculators.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CombinationError {
    /// `C(n, k)` was requested with `k > n`.
    #[error("invalid argument: C({n}, {k}) requires k <= n")]
    InvalidArgument { k: u64, n: u64 },

    /// `C(n, k)` does not fit in the coefficient type named by `width`.
    #[error("C({n}, {k}) overflows {width}")]
    Overflow {
        k: u64,
        n: u64,
        width: &'static str,
    },
}

impl CombinationError {
    pub(crate) fn overflow<T>(k: u64, n: u64) -> Self {
        Self::Overflow {
            k,
            n,
            width: std::any::type_name::<T>(),
        }
    }
}

/// Rejects pairs outside `0 <= k <= n`.
pub(crate) fn check_domain(k: u64, n: u64) -> Result<()> {
    if k > n {
        Err(CombinationError::InvalidArgument { k, n })
    } else {
        Ok(())
    }
}
