pub mod create_link_dialog;
pub mod dashboard;
pub mod filter_panel;
pub mod result_grid;

pub use dashboard::SelectorDashboard;
