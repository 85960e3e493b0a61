pub mod charset;
pub mod format;
pub mod validated;
