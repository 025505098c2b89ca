/// Fact records and JSON loading.
pub mod model;
