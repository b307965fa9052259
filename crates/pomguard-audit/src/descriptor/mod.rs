//! Descriptor loading: a namespace-aware XML element tree.

pub mod element;
pub mod loader;

pub use element::{Descendants, Element, QName};
pub use loader::Descriptor;
