pub mod batching;
pub mod orders;
