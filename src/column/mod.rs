//! The columnar half of the codec: value framing, row-to-column splitting,
//! and rehydration of a decoded column back into text.

pub mod rehydrate;
pub mod splitter;
pub mod value;

pub use splitter::{parse_rows, split, split_text, ColumnStream};
