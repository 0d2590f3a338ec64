pub mod amortization;
pub mod error;
pub mod presentation;
pub mod tiered;
pub mod types;
pub mod validation;

#[cfg(any(
    feature = "utility",
    feature = "tax",
    feature = "payroll",
    feature = "benefits",
    feature = "lending",
    feature = "savings",
    feature = "dates",
    feature = "health"
))]
pub mod forms;

#[cfg(feature = "utility")]
pub mod utility;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "payroll")]
pub mod payroll;

#[cfg(feature = "benefits")]
pub mod benefits;

#[cfg(feature = "lending")]
pub mod lending;

#[cfg(feature = "savings")]
pub mod savings;

#[cfg(feature = "dates")]
pub mod dates;

#[cfg(feature = "health")]
pub mod health;

pub use error::{ErrorKind, LifeCalcError};
pub use types::*;

/// Standard result type for all calculator operations
pub type LifeCalcResult<T> = Result<T, LifeCalcError>;
