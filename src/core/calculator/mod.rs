pub mod expected;
pub mod pause;
pub mod surplus;
