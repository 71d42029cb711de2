// Edit module - trim-handle selection and destructive buffer operations
// Operations allocate a new buffer; the store swaps references.

pub mod engine;
pub mod selection;

pub use selection::{HandleSide, Selection};
