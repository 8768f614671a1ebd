pub mod card;
pub mod cart_sidebar;
pub mod confirm_dialog;
pub mod lightbox;
pub mod view_model;
pub mod widget;

pub use widget::GalleryWidget;
