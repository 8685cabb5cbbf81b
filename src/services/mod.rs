pub mod providers;
pub mod ranking;
pub mod suggestions;
