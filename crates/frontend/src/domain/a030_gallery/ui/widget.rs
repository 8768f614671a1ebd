use contracts::domain::a030_gallery::{GalleryBootstrap, GridEntry};
use contracts::shared::config::GallerySettings;
use leptos::prelude::*;

use super::card::{BlockCard, ItemCard};
use super::cart_sidebar::CartSidebar;
use super::confirm_dialog::ConfirmDialog;
use super::lightbox::Lightbox;
use super::view_model::{GalleryAction, GalleryViewModel};
use crate::shared::components::ui::{Badge, Button};
use crate::shared::icons::icon;

/// Public gallery: category grid, block drill-down and the reservation cart
#[component]
pub fn GalleryWidget(bootstrap: GalleryBootstrap, settings: GallerySettings) -> impl IntoView {
    let vm = GalleryViewModel::new(bootstrap, settings);

    view! {
        <div class="stone-gallery">
            <header class="gallery-header">
                <button
                    id="cart-toggle"
                    class=move || { if vm.cart_count() > 0 { "cart-toggle active-cart" } else { "cart-toggle" } }
                    on:click=move |_| vm.dispatch(GalleryAction::ToggleCart)
                >
                    {icon("cart")}
                    <span>"Mi selección"</span>
                    <Show when=move || { vm.cart_count() > 0 }>
                        <Badge variant="primary" class="cart-count">{move || vm.cart_count()}</Badge>
                    </Show>
                </button>
            </header>

            {move || match vm.view.with(|v| v.active_block().map(str::to_string)) {
                None => view! { <MainGrid vm=vm /> }.into_any(),
                Some(key) => view! { <BlockDetail vm=vm block_key=key /> }.into_any(),
            }}

            <CartSidebar vm=vm />
            <Lightbox vm=vm />
            <ConfirmDialog vm=vm />
        </div>
    }
}

#[component]
fn MainGrid(vm: GalleryViewModel) -> impl IntoView {
    let sections = vm.bootstrap().with_value(|b| b.sections().to_vec());

    if sections.is_empty() {
        return view! {
            <div class="gallery-empty">
                <p>"No hay material disponible en esta galería."</p>
            </div>
        }
        .into_any();
    }

    sections
        .into_iter()
        .map(|section| {
            let cards = section
                .entries
                .into_iter()
                .map(|entry| match entry {
                    GridEntry::Single(item) => view! { <ItemCard vm=vm item=item /> }.into_any(),
                    GridEntry::Block { key, name, cover_url } => {
                        view! { <BlockCard vm=vm block_key=key name=name cover_url=cover_url /> }.into_any()
                    }
                })
                .collect_view();
            view! {
                <section class="gallery-section">
                    <h2 class="gallery-section__title">{section.category}</h2>
                    <div class="bento-grid">{cards}</div>
                </section>
            }
        })
        .collect_view()
        .into_any()
}

/// Members of one block with a select-all toggle
#[component]
fn BlockDetail(vm: GalleryViewModel, block_key: String) -> impl IntoView {
    let members = vm.bootstrap().with_value(|b| b.block_members(&block_key).to_vec());

    let selected_key = block_key.clone();
    let all_selected = move || vm.is_block_selected(&selected_key);
    let toggle_key = block_key.clone();

    view! {
        <section class="gallery-block">
            <div class="gallery-block__header">
                <Button variant="ghost" on_click=Callback::new(move |_| vm.dispatch(GalleryAction::Back))>
                    {icon("arrow-left")} " Volver"
                </Button>
                <h2>"Bloque " {block_key}</h2>
                <Button
                    variant="secondary"
                    on_click=Callback::new(move |_| vm.dispatch(GalleryAction::ToggleBlock(toggle_key.clone())))
                >
                    {move || if all_selected() { "Quitar bloque completo" } else { "Agregar bloque completo" }}
                </Button>
            </div>
            <div class="bento-grid">
                {members
                    .into_iter()
                    .map(|item| view! { <ItemCard vm=vm item=item /> })
                    .collect_view()}
            </div>
        </section>
    }
}
