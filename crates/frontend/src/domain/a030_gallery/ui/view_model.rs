use chrono::Local;
use contracts::domain::a030_gallery::reservation::reservation_expiry;
use contracts::domain::a030_gallery::{
    cart_storage_key, CartItem, CartSession, GalleryBootstrap, ReservationFlow, ViewState,
};
use contracts::shared::config::GallerySettings;
use contracts::shared::format::format_area;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a030_gallery::api;
use crate::shared::storage::LocalStorageCartStore;

/// Everything the user can do in the gallery
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryAction {
    ToggleItem(CartItem),
    ToggleBlock(String),
    RemoveItem(String),
    OpenBlock(String),
    Back,
    ToggleCart,
    OpenLightbox(String),
    CloseLightbox,
    RequestReservation,
    DeclineReservation,
    AcceptReservation,
}

/// State of the public gallery page
#[derive(Clone, Copy)]
pub struct GalleryViewModel {
    bootstrap: StoredValue<GalleryBootstrap>,
    settings: StoredValue<GallerySettings>,
    pub session: RwSignal<CartSession<LocalStorageCartStore>>,
    pub view: RwSignal<ViewState>,
    pub flow: RwSignal<ReservationFlow>,
    pub cart_open: RwSignal<bool>,
    /// URL of the image shown in the lightbox
    pub lightbox: RwSignal<Option<String>>,
}

impl GalleryViewModel {
    pub fn new(bootstrap: GalleryBootstrap, settings: GallerySettings) -> Self {
        let key = cart_storage_key(&settings.cart_key_prefix, bootstrap.token.as_deref());
        let session = CartSession::restore(LocalStorageCartStore, key);
        log::debug!("Gallery cart restored with {} items", session.cart().len());

        Self {
            bootstrap: StoredValue::new(bootstrap),
            settings: StoredValue::new(settings),
            session: RwSignal::new(session),
            view: RwSignal::new(ViewState::new()),
            flow: RwSignal::new(ReservationFlow::default()),
            cart_open: RwSignal::new(false),
            lightbox: RwSignal::new(None),
        }
    }

    pub fn bootstrap(&self) -> StoredValue<GalleryBootstrap> {
        self.bootstrap
    }

    pub fn reservation_days(&self) -> i64 {
        self.settings.with_value(|s| s.reservation_days)
    }

    pub fn cart_count(&self) -> usize {
        self.session.with(|s| s.cart().len())
    }

    pub fn total_area_label(&self) -> String {
        format_area(self.session.with(|s| s.cart().total_area()))
    }

    pub fn in_cart(&self, id: &str) -> bool {
        self.session.with(|s| s.cart().contains(id))
    }

    pub fn is_block_selected(&self, key: &str) -> bool {
        let ids: Vec<String> = self
            .bootstrap
            .with_value(|b| b.block_members(key).iter().map(|m| m.item.id.clone()).collect());
        self.session
            .with(|s| s.cart().is_block_fully_selected(ids.iter().map(String::as_str)))
    }

    pub fn dispatch(&self, action: GalleryAction) {
        match action {
            GalleryAction::ToggleItem(item) => {
                let change = self.session.try_update(|s| s.add_or_toggle(item));
                log::debug!("Cart toggle: {:?}", change);
            }
            GalleryAction::ToggleBlock(key) => {
                let members = self.bootstrap.with_value(|b| b.block_cart_items(&key));
                let change = self.session.try_update(|s| s.toggle_block(&members));
                log::debug!("Block {} toggle: {:?}", key, change);
            }
            GalleryAction::RemoveItem(id) => {
                self.session.update(|s| {
                    s.remove(&id);
                });
            }
            GalleryAction::OpenBlock(key) => {
                self.view.update(|v| {
                    v.enter_block(&key);
                });
                scroll_to_top();
            }
            GalleryAction::Back => {
                self.view.update(|v| {
                    v.back();
                });
            }
            GalleryAction::ToggleCart => self.cart_open.update(|open| *open = !*open),
            GalleryAction::OpenLightbox(url) => {
                self.lightbox.set(Some(url));
                set_body_scroll_locked(true);
            }
            GalleryAction::CloseLightbox => {
                self.lightbox.set(None);
                set_body_scroll_locked(false);
            }
            GalleryAction::RequestReservation => {
                let cart = self.session.with_untracked(|s| s.cart().clone());
                let expires_on =
                    reservation_expiry(Local::now(), self.reservation_days()).date_naive();
                self.flow.update(|f| {
                    f.request_confirmation(expires_on, &cart);
                });
            }
            GalleryAction::DeclineReservation => self.flow.update(|f| f.decline()),
            GalleryAction::AcceptReservation => self.submit_reservation(),
        }
    }

    fn submit_reservation(&self) {
        if !self.flow.try_update(|f| f.accept()).unwrap_or(false) {
            return;
        }

        let vm = *self;
        spawn_local(async move {
            let cart = vm.session.with_untracked(|s| s.cart().clone());
            let token = vm.bootstrap.with_value(|b| b.token.clone());
            let endpoint = vm.settings.with_value(|s| s.reservation_endpoint.clone());

            let result = api::confirm_reservation(&endpoint, token.as_deref(), &cart).await;
            vm.flow.update(|f| f.finish());

            let confirmed = matches!(&result, Ok(outcome) if outcome.is_confirmed());
            let message = vm
                .session
                .try_update(|s| s.apply_reservation(&result))
                .unwrap_or_default();
            if confirmed {
                vm.cart_open.set(false);
            }
            show_alert(&message);
            if confirmed {
                reload_page();
            }
        });
    }
}

fn show_alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

fn reload_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().reload() {
            log::error!("Failed to reload page: {:?}", e);
        }
    }
}

fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

/// Body must not scroll behind the lightbox
fn set_body_scroll_locked(locked: bool) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let _ = body
        .style()
        .set_property("overflow", if locked { "hidden" } else { "" });
}
