mod activity;
mod repository;
mod tag;

pub use activity::{ActivityEntry, ActivityKind};
pub use repository::Repository;
pub use tag::{Author, Tag};
