//! Sensitive data marker
//!
//! The `Sensitive<T>` wrapper keeps secrets (tokens, passwords, key material)
//! out of divergence reports and logs. The comparator treats the wrapped value
//! as opaque: it is never rendered and never compared field by field.

use std::fmt;

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use deepeq_core_types::Sensitive;
///
/// let token = Sensitive::new("secret123");
/// assert_eq!(format!("{:?}", token), "***REDACTED***");
/// assert_eq!(format!("{}", token), "***REDACTED***");
///
/// // Access the actual value when needed
/// assert_eq!(token.expose(), &"secret123");
/// ```
pub struct Sensitive<T>(T);

/// Text printed in place of a sensitive value
pub const REDACTED: &str = "***REDACTED***";

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying sensitive value
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Default> Default for Sensitive<T> {
    fn default() -> Self {
        Self(T::default())
    }
}
