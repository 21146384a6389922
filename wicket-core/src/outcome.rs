//! # Outcome Algebra
//!
//! A two-case value describing the result of one pipeline step: either a
//! [`Failure`](Outcome::Failure) carrying a value of type `F`, or a
//! [`Success`](Outcome::Success) carrying a value of type `S`.
//!
//! Domain-level failures above this layer are always represented as values of
//! this type; nothing panics or returns `Err` to signal them. The combinators
//! follow one rule: the success-side operators ([`chain`](Outcome::chain),
//! [`map`](Outcome::map)) leave a failure untouched and never invoke their
//! closure, and the failure-side operator ([`map_failure`](Outcome::map_failure))
//! leaves a success untouched.
//!
//! # Example
//!
//! ```rust
//! use wicket_core::Outcome;
//!
//! let parsed: Outcome<String, u32> = Outcome::Success(20);
//! let doubled = parsed.chain(|n| Outcome::Success(n * 2));
//! assert_eq!(doubled.fold(|_| 0, |n| n), 40);
//! ```

/// The outcome of a single step: success xor failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "an `Outcome` may be a failure, which should be handled"]
pub enum Outcome<F, S> {
    /// The step failed with a value of type `F`.
    Failure(F),
    /// The step succeeded with a value of type `S`.
    Success(S),
}

impl<F, S> Outcome<F, S> {
    /// Returns `true` if this is a [`Success`](Outcome::Success).
    pub const fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns `true` if this is a [`Failure`](Outcome::Failure).
    pub const fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Sequences a fallible step after this one.
    ///
    /// `f` runs only on success; a failure is returned as-is and `f` is never
    /// called.
    pub fn chain<T, G>(self, f: G) -> Outcome<F, T>
    where
        G: FnOnce(S) -> Outcome<F, T>,
    {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Transforms the success value.
    pub fn map<T, G>(self, f: G) -> Outcome<F, T>
    where
        G: FnOnce(S) -> T,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Transforms the failure value.
    pub fn map_failure<T, G>(self, f: G) -> Outcome<T, S>
    where
        G: FnOnce(F) -> T,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(f(error)),
        }
    }

    /// Recovers from a failure with another outcome. A success passes through.
    pub fn or_else<T, G>(self, f: G) -> Outcome<T, S>
    where
        G: FnOnce(F) -> Outcome<T, S>,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => f(error),
        }
    }

    /// Exhaustive case analysis. Exactly one of the two closures runs.
    pub fn fold<T>(self, on_failure: impl FnOnce(F) -> T, on_success: impl FnOnce(S) -> T) -> T {
        match self {
            Outcome::Failure(error) => on_failure(error),
            Outcome::Success(value) => on_success(value),
        }
    }

    /// Returns the success value, or `default` on failure.
    pub fn get_or(self, default: S) -> S {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(_) => default,
        }
    }

    /// Returns the success value, if any.
    pub fn success(self) -> Option<S> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// Returns the failure value, if any.
    pub fn failure(self) -> Option<F> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    /// Borrows both sides.
    pub const fn as_ref(&self) -> Outcome<&F, &S> {
        match self {
            Outcome::Failure(error) => Outcome::Failure(error),
            Outcome::Success(value) => Outcome::Success(value),
        }
    }

    /// Converts into a standard [`Result`], mapping success to `Ok`.
    pub fn into_result(self) -> Result<S, F> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }
}

impl<S> Outcome<(), S> {
    /// Lifts an optional value: `None` becomes a unit failure.
    pub fn from_option(value: Option<S>) -> Self {
        match value {
            Some(value) => Outcome::Success(value),
            None => Outcome::Failure(()),
        }
    }
}

impl<F, S> From<Result<S, F>> for Outcome<F, S> {
    fn from(result: Result<S, F>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(error),
        }
    }
}

impl<F, S> From<Outcome<F, S>> for Result<S, F> {
    fn from(outcome: Outcome<F, S>) -> Self {
        outcome.into_result()
    }
}
