pub mod errors;
pub mod value;
