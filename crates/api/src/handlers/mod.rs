pub mod safety;
pub mod stream;
