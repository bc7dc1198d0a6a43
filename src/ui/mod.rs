pub mod charts;
pub mod components;
pub mod dashboard;
pub mod detail;
pub mod layout;

pub use layout::render_ui;
