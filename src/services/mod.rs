pub mod dashboard;
pub mod overview;
pub mod query;
pub mod refresh;
pub mod render;
