pub mod allowances;
pub mod salary;
