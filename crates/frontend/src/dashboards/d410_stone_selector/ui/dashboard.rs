use contracts::shared::config::SelectorSettings;
use leptos::prelude::*;

use super::create_link_dialog::CreateLinkDialog;
use super::filter_panel::FilterPanel;
use super::result_grid::ResultGrid;
use crate::dashboards::d410_stone_selector::state::SelectorState;
use crate::shared::components::ui::{Badge, Button};
use crate::shared::icons::icon;

/// Staff dashboard: filter available slabs and share a selection with a contact
#[component]
pub fn SelectorDashboard(settings: SelectorSettings, company_ids: Vec<i64>) -> impl IntoView {
    let state = SelectorState::new(settings, company_ids);
    state.init();

    let selected_count = move || state.selection.with(|s| s.len());

    view! {
        <div id="d410_stone_selector--dashboard" class="selector-dashboard">
            <header class="selector-header">
                <h1>"Selector de Galería"</h1>
                <div class="selector-header__actions">
                    <Badge variant="primary">
                        {move || format!("{} seleccionadas", selected_count())}
                    </Badge>
                    <Button
                        variant="ghost"
                        disabled=Signal::derive(move || selected_count() == 0)
                        on_click=Callback::new(move |_| state.selection.update(|s| s.clear()))
                    >
                        "Limpiar selección"
                    </Button>
                    <Button
                        disabled=Signal::derive(move || selected_count() == 0)
                        on_click=Callback::new(move |_| state.link_dialog_open.set(true))
                    >
                        {icon("link")} " Crear enlace"
                    </Button>
                </div>
            </header>

            <div class="selector-body">
                <FilterPanel state=state />
                <main class="selector-main">
                    {move || state.active_block().map(|block| view! {
                        <div class="selector-breadcrumb">
                            <Button variant="ghost" size="sm" on_click=Callback::new(move |_| state.close_block())>
                                {icon("arrow-left")} " Volver"
                            </Button>
                            <span>"Bloque " <strong>{block}</strong></span>
                        </div>
                    })}
                    <ResultGrid state=state />
                </main>
            </div>

            <Show when=move || state.link_dialog_open.get()>
                <CreateLinkDialog state=state />
            </Show>
        </div>
    }
}
