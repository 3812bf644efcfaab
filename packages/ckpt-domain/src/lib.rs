pub mod similarity;
pub mod validate;
