pub mod groups;
pub mod matches;
pub mod pool;
pub mod settings;
pub mod teams;
