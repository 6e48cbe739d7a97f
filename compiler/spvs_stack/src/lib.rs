//! Stack guard for recursive block generation.
//!
//! Nested selection constructs recurse into the block generator once per
//! level, and every level recurses again into the delegator for each
//! statement and each on-demand type. The nesting bound keeps this shallow
//! in normal configurations, but a configuration with a large maximum depth
//! can still walk off the end of a worker thread's stack.
//!
//! Wrap each recursive entry with [`ensure_sufficient_stack`]:
//!
//! ```text
//! fn generate_block(&mut self, scope: ScopeId) -> Result<Block, GenError> {
//!     ensure_sufficient_stack(|| self.generate_block_inner(scope))
//! }
//! ```

/// Minimum stack space to keep available (64KB red zone).
const RED_ZONE: usize = 64 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// - **Native**: uses `stacker::maybe_grow`.
/// - **WASM**: calls `f()` directly.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
