pub mod dump;
pub mod encoder;
pub mod error;
pub mod sink;
