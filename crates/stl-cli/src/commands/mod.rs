pub mod info;
pub mod rank;
