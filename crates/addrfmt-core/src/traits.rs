// crates/addrfmt-core/src/traits.rs
use crate::text::{equals_folded, equals_ignore_case};

/// Name-based matching helpers for catalog entries that answer to one or
/// more display names (e.g. a state known as `Bayern` and `Bavaria`).
///
/// Implementors list their names via [`NameMatch::names`], and get:
/// - [`NameMatch::is_named`]: case-insensitive equality on any name
/// - [`NameMatch::is_named_folded`]: accent- and case-insensitive equality
///
/// # Examples
/// ```rust
/// use addrfmt_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
///         Box::new(std::iter::once(self.0))
///     }
/// }
///
/// assert!(Place("Curaçao").is_named("CURAÇAO"));
/// assert!(!Place("Curaçao").is_named("curacao"));
/// assert!(Place("Curaçao").is_named_folded("curacao"));
/// ```
pub trait NameMatch {
    /// Every name this entry answers to.
    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    #[inline]
    fn is_named(&self, q: &str) -> bool {
        self.names().any(|n| equals_ignore_case(n, q))
    }

    #[inline]
    fn is_named_folded(&self, q: &str) -> bool {
        self.names().any(|n| equals_folded(n, q))
    }
}
