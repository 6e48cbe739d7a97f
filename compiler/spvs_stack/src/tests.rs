use super::*;

#[test]
fn nested_blocks_shallow() {
    fn nest(depth: u32) -> u32 {
        ensure_sufficient_stack(|| if depth == 0 { 0 } else { nest(depth - 1) + 1 })
    }

    assert_eq!(nest(8), 8);
}

#[test]
fn nested_blocks_deep() {
    // A pathological nesting bound; overflows a default thread stack without growth.
    fn nest(depth: u64) -> u64 {
        ensure_sufficient_stack(|| if depth == 0 { 0 } else { nest(depth - 1) + 1 })
    }

    assert_eq!(nest(100_000), 100_000);
}

#[test]
fn passes_result_through() {
    let result: Result<u32, &str> = ensure_sufficient_stack(|| Ok(7));
    assert_eq!(result, Ok(7));
}
