pub mod guards;
pub mod holder;
pub mod transfer;
