mod digest;
mod namespace;
mod repository_id;
mod tag_id;
mod visibility;

pub use digest::Digest;
pub use namespace::NamespaceRef;
pub use repository_id::RepositoryId;
pub use tag_id::TagId;
pub use visibility::Visibility;
