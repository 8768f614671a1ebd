pub mod d410_stone_selector;
