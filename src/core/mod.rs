pub mod export;
pub mod finder;

pub use crate::domain::model::Doctor;
pub use crate::domain::ports::{ConfigProvider, DoctorSource, Storage};
pub use crate::utils::error::Result;
