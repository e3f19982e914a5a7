pub mod categories;
pub mod facilities;
pub mod fees;
pub mod groups;
pub mod health;
