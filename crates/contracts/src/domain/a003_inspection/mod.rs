pub mod aggregate;

pub use aggregate::{Inspection, InspectionId};
