use crate::Time;

mod compile;
mod error;
mod scalar;

include!("mock.rs.in");
