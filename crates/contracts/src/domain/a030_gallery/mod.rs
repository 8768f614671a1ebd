pub mod bootstrap;
pub mod cart;
pub mod catalog;
pub mod reservation;
pub mod view;

pub use bootstrap::{GalleryBootstrap, GalleryItem, GallerySection, GridEntry};
pub use cart::{cart_storage_key, Cart, CartChange, CartItem, CartSession, CartStore};
pub use catalog::{group_into_blocks, BlockItem, CatalogItem, SingleItem};
pub use reservation::{ReservationFlow, ReservationOutcome, ReservationPhase};
pub use view::{GalleryView, ViewState};
