pub mod calculation;
pub mod dashboard;
pub mod models;
pub mod reference;
