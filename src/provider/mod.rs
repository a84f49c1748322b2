pub mod client;
pub mod output;
pub mod types;

pub use client::{ImageProvider, ReplicateClient};
pub use output::{ProviderOutput, UrlAsset, UrlValue, normalize};
pub use types::{GenerationRequest, ImageAttachment};
