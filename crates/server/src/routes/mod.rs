pub mod admin;
pub mod groups;
pub mod health;
pub mod matches;
pub mod settings;
pub mod teams;
