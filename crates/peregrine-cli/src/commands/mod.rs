pub mod analyze;
pub mod completion;
pub mod render;
pub mod show;
