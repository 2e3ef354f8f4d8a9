pub mod claims;
pub mod expenses;
pub mod group;
