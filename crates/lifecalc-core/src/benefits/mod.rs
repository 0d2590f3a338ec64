pub mod severance;
pub mod unemployment;
