pub mod assembler;
pub mod generation;
pub mod intake;
