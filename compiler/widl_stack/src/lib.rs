//! Stack growth for deeply nested type expressions.
//!
//! IDL types nest (`sequence<sequence<record<DOMString, (A or B)?>>>`) and
//! typedefs expand into one another, so both the type grammar and the type
//! resolver recurse on input-controlled depth. Wrapping those recursive
//! calls in [`ensure_sufficient_stack`] grows the stack on demand instead of
//! overflowing it.
//!
//! On `wasm32` the guard is a plain call.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 64 * 1024;

/// Size of each new stack segment.
const GROW_BY: usize = 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red
/// zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROW_BY, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mimics resolving a chain of nested `sequence<...>` wrappers.
    fn nesting_depth(remaining: u32) -> u32 {
        ensure_sufficient_stack(|| {
            if remaining == 0 {
                0
            } else {
                nesting_depth(remaining - 1) + 1
            }
        })
    }

    #[test]
    fn shallow_nesting() {
        assert_eq!(nesting_depth(8), 8);
    }

    #[test]
    fn deep_nesting_does_not_overflow() {
        assert_eq!(nesting_depth(100_000), 100_000);
    }

    #[test]
    fn passes_results_through() {
        let result: Result<u8, &str> = ensure_sufficient_stack(|| Err("unresolved"));
        assert_eq!(result, Err("unresolved"));
    }
}
