pub mod read;
pub mod refresh;
