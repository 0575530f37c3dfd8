//! Binomial coefficients `C(n, k)` computed by memoized recursion over
//! Pascal's identity.
//!
//! The recursion in [`Combine::calc`] does not run on the native call stack.
//! Every pending call is a [`Frame`] kept on a heap-allocated stack and driven
//! by [`trampoline`], so deep recursions only cost memory.
use num_traits::{CheckedAdd, One};

pub mod combine;
pub mod error;
pub mod pascal;

pub use combine::{calc, Combine, Stats};
pub use error::{CombinationError, Result};

pub(crate) const LOG_TARGET: &str = "combine";

/// Values a binomial coefficient can be computed in.
///
/// Implemented for `u64`, `u128` and `num_bigint::BigUint`. Addition is
/// checked, so fixed-width types report overflow instead of wrapping.
pub trait Coefficient: Clone + Default + One + CheckedAdd {}

impl<T: Clone + Default + One + CheckedAdd> Coefficient for T {}

/// What a resumed [`Frame`] asks the trampoline to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step<Arg, Res> {
    /// Suspend and evaluate a recursive call with this argument first.
    Yielded(Arg),
    /// The call is finished.
    Complete(Res),
}

/// A suspended call of a recursive function.
///
/// `resume` is first called with `Res::default()`. After every
/// `Step::Yielded(arg)` it is called again with the result of the recursive
/// call on `arg`. State shared by all calls is passed in as `st`.
pub trait Frame<St> {
    type Arg;
    type Res: Default;
    type Error;

    fn resume(
        &mut self,
        res: Self::Res,
        st: &mut St,
    ) -> Result<Step<Self::Arg, Self::Res>, Self::Error>;
}

/// Turns a frame constructor into a function that evaluates the recursion
/// with an explicit stack instead of the call stack.
pub fn trampoline<St, F>(
    f: impl Fn(F::Arg) -> F,
) -> impl Fn(F::Arg, &mut St) -> Result<F::Res, F::Error>
where
    F: Frame<St>,
{
    move |arg: F::Arg, st: &mut St| {
        let mut stack = Vec::new();
        let mut current = f(arg);
        let mut res = F::Res::default();

        loop {
            match current.resume(res, st)? {
                Step::Yielded(arg) => {
                    stack.push(current);
                    current = f(arg);
                    res = F::Res::default();
                }
                Step::Complete(real_res) => match stack.pop() {
                    None => return Ok(real_res),
                    Some(top) => {
                        current = top;
                        res = real_res;
                    }
                },
            }
        }
    }
}

/// Runs `f` on a new thread with a stack of `size` bytes and waits for it.
pub fn with_stack_size<F, R>(size: usize, f: F) -> std::thread::Result<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    match std::thread::Builder::new().stack_size(size).spawn(f) {
        Ok(handle) => handle.join(),
        Err(err) => Err(Box::new(err)),
    }
}
