pub mod chunk;
pub mod sanitize;

pub use chunk::split_chunks;
pub use sanitize::{clean_model_output, truncate_output};
