//! Output formatting module
//!
//! Console rendering of check results. Scripted values such as the
//! remaining seconds are printed without decoration.

pub mod terminal;

pub use terminal::{print_error, print_success, print_value, print_warning};
