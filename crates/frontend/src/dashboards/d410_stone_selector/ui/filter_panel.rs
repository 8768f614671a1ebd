use contracts::dashboards::d410_stone_selector::{FilterKey, NamedOption};
use leptos::prelude::*;

use crate::dashboards::d410_stone_selector::state::SelectorState;
use crate::shared::components::ui::{Button, Input, Select};
use crate::shared::icons::icon;

fn option_pairs(options: &[NamedOption]) -> Vec<(String, String)> {
    options
        .iter()
        .map(|o| (o.id.to_string(), o.name.clone()))
        .collect()
}

/// Text or numeric filter bound to one key
#[component]
fn FilterInput(
    state: SelectorState,
    filter: FilterKey,
    #[prop(optional)] numeric: bool,
) -> impl IntoView {
    view! {
        <Input
            label=filter.label()
            id=format!("filter-{}", filter.as_str())
            input_type=if numeric { "number" } else { "text" }
            step=if numeric { Some("0.01".to_string()) } else { None }
            value=Signal::derive(move || state.filters.with(|f| f.raw(filter).to_string()))
            on_input=Callback::new(move |value: String| state.set_filter(filter, value))
        />
    }
}

/// Dropdown filter bound to one key
#[component]
fn FilterSelect(
    state: SelectorState,
    filter: FilterKey,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
) -> impl IntoView {
    view! {
        <Select
            label=filter.label()
            id=format!("filter-{}", filter.as_str())
            placeholder="Todos"
            options=options
            value=Signal::derive(move || state.filters.with(|f| f.raw(filter).to_string()))
            on_change=Callback::new(move |value: String| state.set_filter(filter, value))
        />
    }
}

#[component]
pub fn FilterPanel(state: SelectorState) -> impl IntoView {
    let settings = state.settings();
    let currencies: Vec<(String, String)> = settings
        .currencies
        .iter()
        .map(|c| (c.clone(), c.to_uppercase()))
        .collect();
    let tiers: Vec<(String, String)> = settings
        .price_tiers
        .iter()
        .map(|t| (t.clone(), format!("Precio {}", t)))
        .collect();

    view! {
        <aside class="selector-filters">
            <div class="selector-filters__title">
                {icon("filter")}
                <h3>"Filtros"</h3>
            </div>

            <Input
                placeholder="Producto, lote o bloque..."
                input_type="search"
                value=Signal::derive(move || state.filters.with(|f| f.raw(FilterKey::Search).to_string()))
                on_input=Callback::new(move |value: String| state.set_filter(FilterKey::Search, value))
            />

            {FilterKey::text_keys()
                .iter()
                .map(|filter| view! { <FilterInput state=state filter=*filter /> })
                .collect_view()}

            <div class="selector-filters__row">
                {FilterKey::numeric_keys()
                    .iter()
                    .map(|filter| view! { <FilterInput state=state filter=*filter numeric=true /> })
                    .collect_view()}
            </div>

            <FilterSelect
                state=state
                filter=FilterKey::Warehouse
                options=Signal::derive(move || state.warehouses.with(|w| option_pairs(w)))
            />
            <FilterSelect
                state=state
                filter=FilterKey::Category
                options=Signal::derive(move || state.categories.with(|c| option_pairs(c)))
            />

            <div class="selector-filters__row">
                <FilterSelect state=state filter=FilterKey::Currency options=currencies />
                <FilterSelect state=state filter=FilterKey::PriceTier options=tiers />
            </div>
            <div class="selector-filters__row">
                <FilterInput state=state filter=FilterKey::PriceMin numeric=true />
                <FilterInput state=state filter=FilterKey::PriceMax numeric=true />
            </div>

            <Button
                variant="secondary"
                on_click=Callback::new(move |_| state.clear_filters())
            >
                "Limpiar filtros"
            </Button>
        </aside>
    }
}
