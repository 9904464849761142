pub mod persistence;
pub mod policy;
pub mod registry;
