use contracts::domain::a030_gallery::GalleryItem;
use contracts::shared::format::format_area;
use leptos::prelude::*;

use super::view_model::{GalleryAction, GalleryViewModel};
use crate::shared::components::ui::Button;
use crate::shared::icons::icon;

/// Card of one slab with lightbox and add-to-selection buttons
#[component]
pub fn ItemCard(vm: GalleryViewModel, item: GalleryItem) -> impl IntoView {
    let GalleryItem { item, is_large } = item;
    let id = item.id.clone();
    let in_cart = move || vm.in_cart(&id);
    let in_cart_icon = in_cart.clone();

    let url = item.url.clone();
    let cart_item = item.clone();
    let caption = format!("{} | {}", item.dims, format_area(item.area));

    view! {
        <div class=if is_large { "bento-item bento-item--large" } else { "bento-item" }>
            <img src=item.url.clone() alt=item.name.clone() loading="lazy" />
            <div class="bento-overlay">
                <div class="bento-info">
                    <h3>{item.name.clone()}</h3>
                    <p>"Lote: " <strong>{item.lot_name.clone()}</strong></p>
                    <p class="small">{caption}</p>
                </div>
                <div class="bento-actions">
                    <Button
                        variant="ghost"
                        size="sm"
                        class="btn-expand"
                        title="Ampliar"
                        on_click=Callback::new(move |_| vm.dispatch(GalleryAction::OpenLightbox(url.clone())))
                    >
                        {icon("expand")}
                    </Button>
                    <Button
                        variant="ghost"
                        size="sm"
                        class=Signal::derive(move || {
                            if in_cart() { "btn-add-cart in-cart".to_string() } else { "btn-add-cart".to_string() }
                        })
                        title="Agregar a mi selección"
                        on_click=Callback::new(move |_| vm.dispatch(GalleryAction::ToggleItem(cart_item.clone())))
                    >
                        {move || if in_cart_icon() { icon("check") } else { icon("plus") }}
                    </Button>
                </div>
            </div>
        </div>
    }
}

/// Grid card standing for a whole block
#[component]
pub fn BlockCard(
    vm: GalleryViewModel,
    block_key: String,
    name: Option<String>,
    cover_url: String,
) -> impl IntoView {
    let (count, total_area) = vm.bootstrap().with_value(|b| {
        (b.block_members(&block_key).len(), b.block_total_area(&block_key))
    });
    let title = name.unwrap_or_else(|| format!("Bloque {}", block_key));
    let summary = format!("{} placas | {}", count, format_area(total_area));

    let selected_key = block_key.clone();
    let is_selected = move || vm.is_block_selected(&selected_key);
    let is_selected_icon = is_selected.clone();
    let open_key = block_key.clone();
    let toggle_key = block_key;

    view! {
        <div class="bento-item bento-item--block">
            <img src=cover_url alt=title.clone() loading="lazy" />
            <div class="bento-overlay">
                <div class="bento-info">
                    <h3>{icon("layers")} " " {title}</h3>
                    <p class="small">{summary}</p>
                </div>
                <div class="bento-actions">
                    <Button
                        variant="secondary"
                        size="sm"
                        on_click=Callback::new(move |_| vm.dispatch(GalleryAction::OpenBlock(open_key.clone())))
                    >
                        "Ver bloque"
                    </Button>
                    <Button
                        variant="ghost"
                        size="sm"
                        class=Signal::derive(move || {
                            if is_selected() { "btn-add-cart in-cart".to_string() } else { "btn-add-cart".to_string() }
                        })
                        title="Agregar bloque completo"
                        on_click=Callback::new(move |_| vm.dispatch(GalleryAction::ToggleBlock(toggle_key.clone())))
                    >
                        {move || if is_selected_icon() { icon("check") } else { icon("plus") }}
                    </Button>
                </div>
            </div>
        </div>
    }
}
