/// Scope qualifier module
///
/// Action tokens, their scope qualifiers, and the resolver that checks a
/// scoped grant against a query's ownership/assignment facts.
///
/// # Examples
///
/// ```
/// use tracker_authz::scope::{ActionToken, Scope};
///
/// let token: ActionToken = "delete_own".parse().unwrap();
/// assert_eq!(token.scope(), Some(Scope::Own));
/// assert!(Scope::Own.is_instance_bound());
/// assert!(!Scope::Project.is_instance_bound());
/// ```

mod types;
mod resolver;

#[cfg(test)]
mod tests;

pub use types::{ActionToken, Scope};
pub use resolver::ScopeResolver;
