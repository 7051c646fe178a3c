pub mod auth;
pub mod profile;
pub mod remind;
pub mod tasks;
pub mod utils;
