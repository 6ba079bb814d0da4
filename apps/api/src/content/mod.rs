pub mod icons;
pub mod list;
pub mod merge;
pub mod models;
pub mod validation;
