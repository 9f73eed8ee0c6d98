//! Custom request extractors.

mod owner;
mod validated_json;

pub use owner::OwnerId;
pub use validated_json::ValidatedJson;
