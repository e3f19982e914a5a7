// Facility domain module
// Facility owners prove their business before listing a venue

pub mod business_number;

pub use business_number::{BusinessNumber, BusinessNumberError};
