mod format;
mod input;

pub use format::DocumentFormat;
pub use input::{load_attrs_str, merge_attrs, parse_document_str};
