pub mod api_utils;
pub mod clipboard;
pub mod components;
pub mod debounce;
pub mod icons;
pub mod injected;
pub mod modal;
pub mod orm;
pub mod storage;
