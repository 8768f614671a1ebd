use contracts::shared::format::format_area;
use leptos::prelude::*;

use super::view_model::{GalleryAction, GalleryViewModel};
use crate::shared::components::ui::Button;
use crate::shared::icons::icon;

/// Slide-in list of the selected slabs with totals and the reservation button
#[component]
pub fn CartSidebar(vm: GalleryViewModel) -> impl IntoView {
    let open_class = move |base: &'static str| {
        if vm.cart_open.get() {
            format!("{} open", base)
        } else {
            base.to_string()
        }
    };
    let items = move || vm.session.with(|s| s.cart().items().to_vec());
    let is_empty = move || vm.cart_count() == 0;
    let submitting = move || vm.flow.with(|f| f.is_submitting());

    view! {
        <div
            id="cart-overlay"
            class=move || open_class("cart-overlay")
            on:click=move |_| vm.dispatch(GalleryAction::ToggleCart)
        ></div>
        <aside id="cart-sidebar" class=move || open_class("cart-sidebar")>
            <div class="cart-sidebar__header">
                <h3>"Mi selección"</h3>
                <button class="close-cart" on:click=move |_| vm.dispatch(GalleryAction::ToggleCart)>
                    {icon("x")}
                </button>
            </div>

            <div id="cart-items-container" class="cart-sidebar__items">
                <Show
                    when=move || !is_empty()
                    fallback=|| view! {
                        <div class="cart-empty">
                            {icon("cart")}
                            <p>"Tu selección está vacía."</p>
                        </div>
                    }
                >
                    <For
                        each=items
                        key=|item| item.id.clone()
                        children=move |item| {
                            let id = item.id.clone();
                            view! {
                                <div class="cart-item">
                                    <img src=item.url.clone() alt="Thumbnail" />
                                    <div class="item-details">
                                        <h4>{item.name.clone()}</h4>
                                        <p>"Lote: " <strong>{item.lot_name.clone()}</strong></p>
                                        <p class="small">{format!("{} | {}", item.dims, format_area(item.area))}</p>
                                    </div>
                                    <button
                                        class="btn-remove"
                                        title="Quitar"
                                        on:click=move |_| vm.dispatch(GalleryAction::RemoveItem(id.clone()))
                                    >
                                        {icon("trash")}
                                    </button>
                                </div>
                            }
                        }
                    />
                </Show>
            </div>

            <div class="cart-sidebar__footer">
                <div class="cart-totals">
                    <span>"Placas: " <strong id="total-plates">{move || vm.cart_count()}</strong></span>
                    <span>"Área total: " <strong id="total-area">{move || vm.total_area_label()}</strong></span>
                </div>
                <Button
                    class="btn-confirm"
                    disabled=Signal::derive(move || is_empty() || submitting())
                    on_click=Callback::new(move |_| vm.dispatch(GalleryAction::RequestReservation))
                >
                    {move || if submitting() { "Procesando..." } else { "Confirmar reserva" }}
                </Button>
            </div>
        </aside>
    }
}
