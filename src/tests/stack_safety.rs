use crate::{with_stack_size, Combine};

const LARGE: u64 = 100_000;

#[test]
#[ignore = "stack overflow is not an unwinding panic"]
fn calc_recursive_is_unsafe() {
    let result = with_stack_size(64 * 1024, || Combine::<u64>::new().calc_recursive(1, LARGE));
    assert!(result.is_err());
}

#[test]
fn calc_is_safe() {
    let result = with_stack_size(64 * 1024, || {
        let mut combine = Combine::<u64>::new();
        let res = combine.calc(1, LARGE);
        (res, combine.len())
    });
    let (res, len) = result.unwrap();
    assert_eq!(res, Ok(LARGE));
    assert_eq!(len as u64, LARGE - 1);
}

#[test]
fn calc_is_safe_near_the_diagonal() {
    let result = with_stack_size(64 * 1024, || Combine::<u64>::new().calc(LARGE - 2, LARGE));
    assert_eq!(result.unwrap(), Ok(LARGE * (LARGE - 1) / 2));
}
