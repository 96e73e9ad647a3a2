pub mod synthesize;
pub mod utils;
pub mod verify;
pub mod version;

#[cfg(test)]
#[path = "../commands_test.rs"]
mod commands_test;
