pub mod emit;
pub mod pipe;
