#![forbid(unsafe_code)]

//! Reference-counted page scroll lock.
//!
//! Every open dialog holds the lock through its own [`LockToken`]. The first
//! holder captures the document overflow style and replaces it with
//! [`Overflow::Hidden`]; the last holder to release restores exactly what was
//! captured.
//!
//! # Invariants
//!
//! - `lock_count()` equals the number of distinct tokens currently holding the lock.
//! - Overflow is captured once, on the 0 -> 1 transition, and restored once,
//!   on the 1 -> 0 transition.
//! - Acquiring twice with the same token does not double-count.
//! - Releasing a token that does not hold the lock is a no-op.
//!
//! # Threading
//!
//! The lock state is a thread-local singleton: all dialogs live on the single
//! UI event loop, so no synchronization is needed. Callers only see
//! [`acquire`] / [`release`]; the overflow style is never exposed for direct
//! mutation.

use ahash::AHashSet;
use shroud_core::dom::{Document, Overflow};
use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for unique lock tokens.
static LOCK_TOKEN_COUNTER: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static SCROLL_LOCK: RefCell<ScrollLockState> = RefCell::new(ScrollLockState::default());
}

/// Identity under which a dialog holds the scroll lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockToken(u64);

impl LockToken {
    /// Allocate a new unique token.
    pub fn new() -> Self {
        Self(LOCK_TOKEN_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw token value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl Default for LockToken {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
struct ScrollLockState {
    holders: AHashSet<LockToken>,
    saved: Option<Overflow>,
}

/// Take the lock for `token`.
///
/// Returns `true` if the token was not already holding the lock.
pub fn acquire<D: Document + ?Sized>(token: LockToken, doc: &mut D) -> bool {
    SCROLL_LOCK.with(|cell| {
        let mut state = cell.borrow_mut();
        if !state.holders.insert(token) {
            return false;
        }
        if state.holders.len() == 1 {
            let previous = doc.overflow();
            state.saved = Some(previous);
            doc.set_overflow(Overflow::Hidden);
            tracing::trace!(token = token.id(), previous = previous.as_str(), "scroll locked");
        }
        true
    })
}

/// Give up the lock held by `token`.
///
/// Returns `true` if the token was holding the lock.
pub fn release<D: Document + ?Sized>(token: LockToken, doc: &mut D) -> bool {
    SCROLL_LOCK.with(|cell| {
        let mut state = cell.borrow_mut();
        if !state.holders.remove(&token) {
            return false;
        }
        if state.holders.is_empty() {
            let restored = state.saved.take().unwrap_or_default();
            doc.set_overflow(restored);
            tracing::trace!(token = token.id(), restored = restored.as_str(), "scroll unlocked");
        }
        true
    })
}

/// Number of tokens currently holding the lock.
pub fn lock_count() -> usize {
    SCROLL_LOCK.with(|cell| cell.borrow().holders.len())
}

/// Whether `token` currently holds the lock.
pub fn is_held(token: LockToken) -> bool {
    SCROLL_LOCK.with(|cell| cell.borrow().holders.contains(&token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shroud_harness::HeadlessDocument;

    #[test]
    fn first_acquire_captures_and_hides() {
        let mut doc = HeadlessDocument::new();
        doc.set_overflow(Overflow::Auto);
        let token = LockToken::new();

        assert!(acquire(token, &mut doc));
        assert_eq!(doc.overflow(), Overflow::Hidden);
        assert_eq!(lock_count(), 1);
        assert!(is_held(token));

        assert!(release(token, &mut doc));
        assert_eq!(doc.overflow(), Overflow::Auto);
        assert_eq!(lock_count(), 0);
    }

    #[test]
    fn same_token_does_not_double_count() {
        let mut doc = HeadlessDocument::new();
        let token = LockToken::new();
        assert!(acquire(token, &mut doc));
        assert!(!acquire(token, &mut doc));
        assert_eq!(lock_count(), 1);
        assert!(release(token, &mut doc));
        assert_eq!(lock_count(), 0);
    }

    #[test]
    fn second_holder_does_not_recapture() {
        let mut doc = HeadlessDocument::new();
        doc.set_overflow(Overflow::Scroll);
        let a = LockToken::new();
        let b = LockToken::new();

        acquire(a, &mut doc);
        acquire(b, &mut doc);
        assert_eq!(doc.overflow_writes(), 2);
        assert_eq!(lock_count(), 2);

        release(a, &mut doc);
        assert_eq!(doc.overflow(), Overflow::Hidden);
        release(b, &mut doc);
        assert_eq!(doc.overflow(), Overflow::Scroll);
        assert_eq!(doc.overflow_writes(), 3);
    }

    #[test]
    fn release_without_acquire_is_noop() {
        let mut doc = HeadlessDocument::new();
        doc.set_overflow(Overflow::Visible);
        assert!(!release(LockToken::new(), &mut doc));
        assert_eq!(lock_count(), 0);
        assert_eq!(doc.overflow(), Overflow::Visible);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn count_matches_distinct_holders(ops in prop::collection::vec((0usize..4, any::<bool>()), 0..48)) {
                let mut doc = HeadlessDocument::new();
                doc.set_overflow(Overflow::Clip);
                let tokens: Vec<LockToken> = (0..4).map(|_| LockToken::new()).collect();
                let mut held = [false; 4];

                for (i, take) in ops {
                    if take {
                        prop_assert_eq!(acquire(tokens[i], &mut doc), !held[i]);
                    } else {
                        prop_assert_eq!(release(tokens[i], &mut doc), held[i]);
                    }
                    held[i] = take;
                    let expected = held.iter().filter(|h| **h).count();
                    prop_assert_eq!(lock_count(), expected);
                    let want = if expected > 0 { Overflow::Hidden } else { Overflow::Clip };
                    prop_assert_eq!(doc.overflow(), want);
                }

                for token in tokens {
                    release(token, &mut doc);
                }
                prop_assert_eq!(lock_count(), 0);
                prop_assert_eq!(doc.overflow(), Overflow::Clip);
            }
        }
    }
}
