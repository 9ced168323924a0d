//! Persona directory
//!
//! The persona decides the viewpoint the generated deck is tailored to.
//! The catalog is fixed and compiled in; [`DirectoryView`] provides the
//! searched, paginated window over it.

mod catalog;
mod directory;

pub use catalog::{catalog, find, format_persona, PersonaEntry};
pub use directory::{DirectoryView, PageSize};
