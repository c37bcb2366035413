mod convert;
mod factors;

pub use convert::{emissions_from_generation, unit_conversion};
pub use factors::EmissionFactors;
