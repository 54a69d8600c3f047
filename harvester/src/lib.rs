pub mod detail;
pub mod fetch;
pub mod index;
pub mod pipeline;
pub mod render;
pub mod report;
