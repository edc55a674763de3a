pub mod resolver;
pub mod types;

pub use resolver::resolve_prompt;
pub use types::{Mode, PromptResolution, Tone};
