//! Scope tracking for nested declaration blocks.
//!
//! A scope is a `group ... do` / `end` pair (keywords are configurable). Scope
//! bodies are sorted independently of the text around them, and a scope may
//! hold further scopes at deeper indentation.
//!
//! [`locate`] finds every well-formed scope in one pass; a header without a
//! matching closer is not a scope and stays ordinary text.

pub mod locator;
pub mod types;

pub use locator::locate;
pub use types::Scope;
