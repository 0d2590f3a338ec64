pub mod management_fee;
pub mod tariffs;
