pub mod authorization;
pub mod entities;
pub mod errors;
pub mod tag_grouping;
pub mod value_objects;
