//! Built-in extraction strategies, in default priority order.

mod embed_flashvars;
mod external;
mod source_tags;

pub use embed_flashvars::EmbedFlashvarsStrategy;
pub use external::ExternalFallbackStrategy;
pub use source_tags::SourceTagStrategy;
