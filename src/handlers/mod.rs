pub mod albums;
pub mod ping;
