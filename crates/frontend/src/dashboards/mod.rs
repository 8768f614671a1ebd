pub mod d410_stone_selector;

pub use d410_stone_selector::ui::SelectorDashboard;
