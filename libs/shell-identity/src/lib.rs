//! Session identity for the application shell.
//!
//! [`SessionIdentity`] captures who is signed in and into which tenant, and
//! [`IdentityContext`] is the reactive cell the rest of the shell reads the
//! active identity from. Either id may be absent: the shell boots anonymously,
//! acquires the user id at sign-in, and the tenant id once a tenant is
//! selected.

pub mod context;

pub use context::{IdentityContext, SessionIdentity, SessionIdentityBuilder};
