//! # Deferred Outcomes
//!
//! [`FutureOutcome`] is a lazily evaluated asynchronous computation that
//! eventually produces an [`Outcome`]. It wraps an effect-producing thunk and
//! does nothing until [`run`](FutureOutcome::run) is called.
//!
//! Results are never memoized: every call to `run` invokes the thunk again,
//! so an effect with side effects executes once per `run`. Callers must not
//! run a non-idempotent computation more than once.
//!
//! [`chain`](FutureOutcome::chain) is what gives middleware pipelines their
//! short-circuit behavior: once the left side fails, the continuation is never
//! invoked, not even to build a value that would be discarded.

use crate::outcome::Outcome;
use futures::future::{BoxFuture, FutureExt};
use std::{fmt, future::Future, sync::Arc};

type Effect<F, S> = dyn Fn() -> BoxFuture<'static, Outcome<F, S>> + Send + Sync;

/// A deferred, re-runnable computation yielding an [`Outcome`].
pub struct FutureOutcome<F, S> {
    effect: Arc<Effect<F, S>>,
}

impl<F, S> Clone for FutureOutcome<F, S> {
    fn clone(&self) -> Self {
        Self {
            effect: Arc::clone(&self.effect),
        }
    }
}

impl<F, S> fmt::Debug for FutureOutcome<F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FutureOutcome").finish_non_exhaustive()
    }
}

impl<F, S> FutureOutcome<F, S>
where
    F: Send + 'static,
    S: Send + 'static,
{
    /// Wraps an effect-producing thunk. The thunk runs once per [`run`](Self::run).
    pub fn of<T, Fut>(thunk: T) -> Self
    where
        T: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Outcome<F, S>> + Send + 'static,
    {
        Self {
            effect: Arc::new(move || thunk().boxed()),
        }
    }

    /// A computation that always yields a copy of `outcome`.
    pub fn ready(outcome: Outcome<F, S>) -> Self
    where
        F: Clone + Sync,
        S: Clone + Sync,
    {
        Self::of(move || futures::future::ready(outcome.clone()))
    }

    /// A computation that always succeeds with a copy of `value`.
    pub fn success(value: S) -> Self
    where
        S: Clone + Sync,
    {
        Self::of(move || futures::future::ready(Outcome::Success(value.clone())))
    }

    /// A computation that always fails with a copy of `error`.
    pub fn failure(error: F) -> Self
    where
        F: Clone + Sync,
    {
        Self::of(move || futures::future::ready(Outcome::Failure(error.clone())))
    }

    /// Executes the underlying effect. Each call re-executes it.
    pub fn run(&self) -> BoxFuture<'static, Outcome<F, S>> {
        (self.effect)()
    }

    /// Sequences another deferred computation after this one.
    ///
    /// If this computation fails, the failure is produced immediately and `f`
    /// is not called at all.
    pub fn chain<T, G>(&self, f: G) -> FutureOutcome<F, T>
    where
        T: Send + 'static,
        G: Fn(S) -> FutureOutcome<F, T> + Send + Sync + 'static,
    {
        let this = self.clone();
        let f = Arc::new(f);
        FutureOutcome::of(move || {
            let this = this.clone();
            let f = Arc::clone(&f);
            async move {
                match this.run().await {
                    Outcome::Failure(error) => Outcome::Failure(error),
                    Outcome::Success(value) => f(value).run().await,
                }
            }
        })
    }

    /// Lifts a pure function over the eventual success value.
    pub fn map<T, G>(&self, f: G) -> FutureOutcome<F, T>
    where
        T: Send + 'static,
        G: Fn(S) -> T + Send + Sync + 'static,
    {
        let this = self.clone();
        let f = Arc::new(f);
        FutureOutcome::of(move || {
            let this = this.clone();
            let f = Arc::clone(&f);
            async move { this.run().await.map(|value| f(value)) }
        })
    }

    /// Lifts a pure function over the eventual failure value.
    pub fn map_failure<T, G>(&self, f: G) -> FutureOutcome<T, S>
    where
        T: Send + 'static,
        G: Fn(F) -> T + Send + Sync + 'static,
    {
        let this = self.clone();
        let f = Arc::new(f);
        FutureOutcome::of(move || {
            let this = this.clone();
            let f = Arc::clone(&f);
            async move { this.run().await.map_failure(|error| f(error)) }
        })
    }

    /// Runs the computation and folds the result into a single value.
    pub async fn fold<T>(
        &self,
        on_failure: impl FnOnce(F) -> T,
        on_success: impl FnOnce(S) -> T,
    ) -> T {
        self.run().await.fold(on_failure, on_success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(counter: Arc<AtomicUsize>, value: i32) -> FutureOutcome<String, i32> {
        FutureOutcome::of(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Outcome::Success(value)
            }
        })
    }

    #[tokio::test]
    async fn test_run_reexecutes_effect() {
        let counter = Arc::new(AtomicUsize::new(0));
        let deferred = counting(counter.clone(), 1);

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(deferred.run().await, Outcome::Success(1));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(deferred.run().await, Outcome::Success(1));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_chain_short_circuits_without_invoking() {
        let invoked = Arc::new(AtomicUsize::new(0));
        let probe = invoked.clone();

        let failed = FutureOutcome::<String, i32>::failure("nope".to_string());
        let chained = failed.chain(move |n| {
            probe.fetch_add(1, Ordering::SeqCst);
            FutureOutcome::success(n + 1)
        });

        assert_eq!(chained.run().await, Outcome::Failure("nope".to_string()));
        assert_eq!(invoked.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_chain_sequences_success() {
        let counter = Arc::new(AtomicUsize::new(0));
        let chained = counting(counter.clone(), 20)
            .chain(|n| FutureOutcome::success(n * 2))
            .chain(|n| FutureOutcome::success(n + 2));

        assert_eq!(chained.run().await, Outcome::Success(42));
        assert_eq!(chained.run().await, Outcome::Success(42));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_map_and_map_failure() {
        let mapped = FutureOutcome::<String, i32>::success(4).map(|n| n.to_string());
        assert_eq!(mapped.run().await, Outcome::Success("4".to_string()));
        assert_eq!(mapped.run().await, Outcome::Success("4".to_string()));

        let failed = FutureOutcome::<String, i32>::failure("bad".to_string())
            .map(|n| n + 1)
            .map_failure(|e| e.len());
        assert_eq!(failed.run().await, Outcome::Failure(3));
    }

    #[tokio::test]
    async fn test_fold_collapses_both_sides() {
        let ok = FutureOutcome::<String, i32>::success(7);
        let err = FutureOutcome::<String, i32>::failure("x".to_string());

        assert_eq!(ok.fold(|_| -1, |n| n).await, 7);
        assert_eq!(err.fold(|_| -1, |n| n).await, -1);
    }
}
