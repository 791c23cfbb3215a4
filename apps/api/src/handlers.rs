pub mod assignments;
pub mod directory;
pub mod health;
pub mod hierarchy;
pub mod roles;
mod submission;
