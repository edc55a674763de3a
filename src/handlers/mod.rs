pub mod context;
pub mod envelope;
pub mod health;
pub mod relay;
pub mod voice;

pub use context::RequestContext;
