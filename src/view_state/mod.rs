//! Pure text-layout primitives shared by the panes.
//!
//! - `markup`: `<color_NAME>` span tokenizer and ratatui conversion
//! - `fold`: width-bounded folding of markup into display lines
//! - `height_index`: HeightIndex - O(log n) prefix sums via Fenwick tree

pub mod fold;
pub mod height_index;
pub mod markup;

pub use fold::{fold, fold_to_text, FoldError, FoldedLine};
pub use height_index::HeightIndex;
pub use markup::{strip_markup, Colour};
