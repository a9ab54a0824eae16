pub mod extract;
pub mod jisho;

pub use extract::extract_definition;
pub use jisho::JishoSource;
