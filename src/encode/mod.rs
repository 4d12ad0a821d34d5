//! Encoding value trees (or decoder events) back into JSON text.

mod compact;
mod pretty;
mod text;

pub use compact::{CompactWriter, stringify};
pub use pretty::{PrettyWriter, stringify_pretty};
