//! Core traits for the collaborators of the search iterator.

mod source;

pub use source::SearchSource;
