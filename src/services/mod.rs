pub mod discovery;
pub mod providers;
pub mod ranking;
pub mod recommendations;
