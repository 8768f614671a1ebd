use contracts::dashboards::d410_stone_selector::ScrollMetrics;
use contracts::domain::a030_gallery::{BlockItem, CatalogItem, SingleItem};
use contracts::shared::format::format_area;
use leptos::ev;
use leptos::prelude::*;
use thaw::Spinner;
use wasm_bindgen::JsCast;

use crate::dashboards::d410_stone_selector::state::SelectorState;
use crate::shared::icons::icon;

fn element_metrics(element: &web_sys::Element) -> ScrollMetrics {
    ScrollMetrics {
        scroll_top: element.scroll_top() as f64,
        client_height: element.client_height() as f64,
        scroll_height: element.scroll_height() as f64,
    }
}

fn scroll_metrics(event: &ev::Event) -> Option<ScrollMetrics> {
    let element = event.target()?.dyn_into::<web_sys::Element>().ok()?;
    Some(element_metrics(&element))
}

#[component]
fn SingleCard(state: SelectorState, item: SingleItem) -> impl IntoView {
    let entry = CatalogItem::Single(item.clone());
    let toggle_entry = entry.clone();
    let selected = move || state.is_selected(&entry);

    view! {
        <div
            class=move || { if selected() { "selector-card selector-card--selected" } else { "selector-card" } }
            on:click=move |_| state.toggle_item(&toggle_entry)
        >
            <img src=item.url.clone() alt=item.lot_name.clone() loading="lazy" />
            <div class="selector-card__check">{icon("check")}</div>
            <div class="selector-card__info">
                <strong>{item.product_name.clone()}</strong>
                <span>"Lote " {item.lot_name.clone()}</span>
                <span class="small">{format!("{} | {}", item.dims, format_area(item.area))}</span>
            </div>
        </div>
    }
}

#[component]
fn BlockCard(state: SelectorState, block: BlockItem) -> impl IntoView {
    let entry = CatalogItem::Block(block.clone());
    let toggle_entry = entry.clone();
    let selected = move || state.is_selected(&entry);
    let selected_label = selected.clone();
    let open_key = block.key.clone();
    let summary = format!("{} placas | {}", block.ids.len(), format_area(block.total_area));

    view! {
        <div class=move || { if selected() { "selector-card selector-card--block selector-card--selected" } else { "selector-card selector-card--block" } }>
            <img src=block.cover_url().unwrap_or_default().to_string() alt=block.key.clone() loading="lazy" />
            <div class="selector-card__info">
                <strong>{icon("layers")} " Bloque " {block.key.clone()}</strong>
                <span class="small">{summary}</span>
            </div>
            <div class="selector-card__actions">
                <button class="button button--ghost button--small" on:click=move |_| state.open_block(&open_key)>
                    "Ver bloque"
                </button>
                <button
                    class="button button--secondary button--small"
                    on:click=move |_| state.toggle_item(&toggle_entry)
                >
                    {move || if selected_label() { "Quitar bloque" } else { "Seleccionar bloque" }}
                </button>
            </div>
        </div>
    }
}

/// Result cards with infinite scroll
#[component]
pub fn ResultGrid(state: SelectorState) -> impl IntoView {
    let container_ref = NodeRef::<leptos::html::Div>::new();

    let on_scroll = move |event: ev::Event| {
        if let Some(metrics) = scroll_metrics(&event) {
            state.on_scroll(metrics);
        }
    };

    // a page that fits without scrolling never emits on:scroll
    Effect::new(move |_| {
        state.items.track();
        state.paginator.track();
        if state.loading.get() {
            return;
        }
        if let Some(container) = container_ref.get() {
            state.fill_viewport(element_metrics(&container));
        }
    });

    view! {
        <div class="selector-results" node_ref=container_ref on:scroll=on_scroll>
            {move || state.error.get().map(|message| view! {
                <div class="selector-error">{message}</div>
            })}
            <Show when=move || !state.loading.get() || !state.items.with(Vec::is_empty)>
                <div class="selector-grid">
                    <For
                        each=move || state.visible_items()
                        key=|item| item.key()
                        children=move |item| match item {
                            CatalogItem::Single(single) => view! { <SingleCard state=state item=single /> }.into_any(),
                            CatalogItem::Block(block) => view! { <BlockCard state=state block=block /> }.into_any(),
                        }
                    />
                </div>
            </Show>
            <Show when=move || state.loading.get()>
                <div class="selector-loading">
                    <Spinner />
                </div>
            </Show>
            <Show when=move || {
                !state.loading.get() && state.error.with(Option::is_none) && state.items.with(Vec::is_empty)
            }>
                <div class="selector-empty">"No se encontraron placas con estos filtros."</div>
            </Show>
            <Show when=move || !state.loading.get() && state.has_more()>
                <div class="selector-more">
                    <button class="button button--ghost button--small" on:click=move |_| state.show_more()>
                        "Ver más"
                    </button>
                </div>
            </Show>
        </div>
    }
}
