pub mod batch;
pub mod order;
pub mod zone;
