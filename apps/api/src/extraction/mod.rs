// Partial-JSON extraction over a document that is still streaming from the LLM.
// Every call re-scans the full buffer; documents are a few kilobytes at most.

pub mod array;
pub mod scalar;
mod scanner;

pub use array::{extract_array, ArrayMode};
pub use scalar::extract_scalar;
