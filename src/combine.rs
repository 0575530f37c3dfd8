use std::cell::RefCell;
use std::collections::HashMap;
use std::mem;

use static_assertions::assert_impl_all;

use crate::error::{check_domain, CombinationError, Result};
use crate::{trampoline, Coefficient, Frame, Step, LOG_TARGET};

/// Memo table activity of a [`Combine`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Lookups answered from the memo table.
    pub hits: u64,
    /// Pairs computed and stored. Always equal to the table size.
    pub computed: u64,
}

/// A binomial coefficient calculator owning its memo table.
///
/// Entries are keyed by `(k, n)` and hold `C(n, k)`. They are only ever
/// inserted, so every value computed on the same instance is reused by all
/// later calls. Base cases `k == 0` and `k == n` are never stored.
#[derive(Clone, Debug)]
pub struct Combine<T = u128> {
    memo: HashMap<(u64, u64), T>,
    stats: Stats,
}

assert_impl_all!(Combine<u128>: Send, Default);
assert_impl_all!(Combine<num_bigint::BigUint>: Send, Default);

impl<T> Default for Combine<T> {
    fn default() -> Self {
        Self {
            memo: HashMap::new(),
            stats: Stats::default(),
        }
    }
}

impl<T> Combine<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The memoized value of `C(n, k)`, if it has been computed.
    pub fn get(&self, k: u64, n: u64) -> Option<&T> {
        self.memo.get(&(k, n))
    }

    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }
}

impl<T: Coefficient> Combine<T> {
    /// Computes `C(n, k)` as `C(n-1, k-1) + C(n-1, k)`, consulting and
    /// filling the memo table.
    ///
    /// The recursion is trampolined, so its depth is not limited by the
    /// stack of the calling thread.
    pub fn calc(&mut self, k: u64, n: u64) -> Result<T> {
        check_domain(k, n)?;
        let _span = tracing::debug_span!(target: LOG_TARGET, "calc", k, n).entered();

        let eval = trampoline(Kont::<T>::init);
        let res = eval((k, n), &mut *self).map_err(|Overflowed| {
            tracing::trace!(target: LOG_TARGET, k, n, "coefficient overflowed");
            CombinationError::overflow::<T>(k, n)
        });
        tracing::debug!(
            target: LOG_TARGET,
            cached = self.memo.len(),
            hits = self.stats.hits,
            "calc finished"
        );
        res
    }

    /// Same as [`Combine::calc`], but recursing on the call stack.
    pub fn calc_recursive(&mut self, k: u64, n: u64) -> Result<T> {
        check_domain(k, n)?;
        let _span =
            tracing::debug_span!(target: LOG_TARGET, "calc_recursive", k, n).entered();

        self.recurse(k, n)
            .ok_or_else(|| CombinationError::overflow::<T>(k, n))
    }

    fn recurse(&mut self, k: u64, n: u64) -> Option<T> {
        if k == 0 || k == n {
            return Some(T::one());
        }
        if let Some(val) = self.lookup(k, n) {
            return Some(val);
        }
        let lhs = self.recurse(k - 1, n - 1)?;
        let rhs = self.recurse(k, n - 1)?;
        let val = lhs.checked_add(&rhs)?;
        self.store(k, n, val.clone());
        Some(val)
    }

    fn lookup(&mut self, k: u64, n: u64) -> Option<T> {
        let val = self.memo.get(&(k, n)).cloned();
        if val.is_some() {
            self.stats.hits += 1;
        }
        val
    }

    fn store(&mut self, k: u64, n: u64, val: T) {
        self.memo.insert((k, n), val);
        self.stats.computed += 1;
    }
}

struct Overflowed;

/// Continuation of one `calc(k, n)` call.
enum Kont<T> {
    Init { k: u64, n: u64 },
    Lhs { k: u64, n: u64 },
    Rhs { k: u64, n: u64, lhs: T },
    Done,
}

impl<T> Kont<T> {
    fn init((k, n): (u64, u64)) -> Self {
        Self::Init { k, n }
    }
}

impl<T: Coefficient> Frame<Combine<T>> for Kont<T> {
    type Arg = (u64, u64);
    type Res = T;
    type Error = Overflowed;

    fn resume(
        &mut self,
        res: T,
        memo: &mut Combine<T>,
    ) -> Result<Step<(u64, u64), T>, Overflowed> {
        match mem::replace(self, Self::Done) {
            Self::Init { k, n } => {
                if k == 0 || k == n {
                    Ok(Step::Complete(T::one()))
                } else if let Some(val) = memo.lookup(k, n) {
                    Ok(Step::Complete(val))
                } else {
                    *self = Self::Lhs { k, n };
                    Ok(Step::Yielded((k - 1, n - 1)))
                }
            }
            Self::Lhs { k, n } => {
                *self = Self::Rhs { k, n, lhs: res };
                Ok(Step::Yielded((k, n - 1)))
            }
            Self::Rhs { k, n, lhs } => {
                let val = lhs.checked_add(&res).ok_or(Overflowed)?;
                memo.store(k, n, val.clone());
                Ok(Step::Complete(val))
            }
            Self::Done => panic!("resuming finished continuation"),
        }
    }
}

thread_local! {
    static SHARED: RefCell<Combine<u128>> = RefCell::new(Combine::new());
}

/// Computes `C(n, k)` with a calculator that lives as long as the current
/// thread, so the memo table is shared by all calls made on it.
///
/// Results are `u128`, which overflows from `C(132, 66)` on. Use
/// `Combine::<BigUint>` for larger coefficients.
pub fn calc(k: u64, n: u64) -> Result<u128> {
    SHARED.with(|combine| combine.borrow_mut().calc(k, n))
}
