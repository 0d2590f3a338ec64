pub mod deposits;
pub mod goal;
