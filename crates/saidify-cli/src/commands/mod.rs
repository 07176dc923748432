pub mod canonicalize;
pub mod generate;
pub mod said;
pub mod verify;
