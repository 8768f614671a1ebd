use contracts::dashboards::d410_stone_selector::options::{load_categories, load_warehouses};
use contracts::dashboards::d410_stone_selector::{
    CatalogPipeline, FilterKey, FilterState, NamedOption, Paginator, ScrollMetrics, SelectionSet,
};
use contracts::domain::a030_gallery::{CatalogItem, ViewState};
use contracts::shared::config::SelectorSettings;
use contracts::shared::latest::LatestOnly;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::debounce::Debouncer;
use crate::shared::orm::RpcOrm;

/// Store of the staff selector dashboard
#[derive(Clone, Copy)]
pub struct SelectorState {
    settings: StoredValue<SelectorSettings>,
    company_ids: StoredValue<Vec<i64>>,
    latest: StoredValue<LatestOnly>,
    debouncer: Debouncer,
    pub filters: RwSignal<FilterState>,
    /// Full result of the last completed query
    pub items: RwSignal<Vec<CatalogItem>>,
    pub paginator: RwSignal<Paginator>,
    pub selection: RwSignal<SelectionSet>,
    /// Main grid or the drill-down of one block, whose members are listed one by one
    pub view: RwSignal<ViewState>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub categories: RwSignal<Vec<NamedOption>>,
    pub warehouses: RwSignal<Vec<NamedOption>>,
    pub link_dialog_open: RwSignal<bool>,
}

impl SelectorState {
    pub fn new(settings: SelectorSettings, company_ids: Vec<i64>) -> Self {
        let page_size = settings.page_size;
        let debounce_ms = settings.debounce_ms;
        Self {
            settings: StoredValue::new(settings),
            company_ids: StoredValue::new(company_ids),
            latest: StoredValue::new(LatestOnly::new()),
            debouncer: Debouncer::new(debounce_ms),
            filters: RwSignal::new(FilterState::new()),
            items: RwSignal::new(Vec::new()),
            paginator: RwSignal::new(Paginator::new(page_size)),
            selection: RwSignal::new(SelectionSet::new()),
            view: RwSignal::new(ViewState::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            categories: RwSignal::new(Vec::new()),
            warehouses: RwSignal::new(Vec::new()),
            link_dialog_open: RwSignal::new(false),
        }
    }

    pub fn settings(&self) -> SelectorSettings {
        self.settings.get_value()
    }

    /// First load: dropdown options and the unfiltered catalogue
    pub fn init(&self) {
        self.load_options();
        self.reload();
    }

    pub fn set_filter(&self, key: FilterKey, value: String) {
        self.filters.update(|f| f.set(key, value));
        if key.is_typed() {
            let state = *self;
            self.debouncer.schedule(move || state.reload());
        } else {
            self.debouncer.cancel();
            self.reload();
        }
    }

    pub fn clear_filters(&self) {
        self.debouncer.cancel();
        self.filters.update(|f| f.clear());
        self.reload();
    }

    /// Reloads only when the view actually changed
    pub fn open_block(&self, key: &str) {
        if self.view.try_update(|v| v.enter_block(key)).unwrap_or(false) {
            self.reload();
        }
    }

    pub fn close_block(&self) {
        if self.view.try_update(|v| v.back()).unwrap_or(false) {
            self.reload();
        }
    }

    pub fn active_block(&self) -> Option<String> {
        self.view.with(|v| v.active_block().map(str::to_string))
    }

    /// Rebuild the result from scratch; responses of older runs are dropped
    pub fn reload(&self) {
        let ticket = self.latest.with_value(|l| l.begin());
        self.paginator.update(|p| p.reset());
        self.loading.set(true);
        self.error.set(None);

        let state = *self;
        let filters = self.filters.get_untracked();
        let drill_down = self
            .view
            .with_untracked(|v| v.active_block().map(str::to_string));
        let settings = self.settings.get_value();
        let company_ids = self.company_ids.get_value();

        spawn_local(async move {
            let orm = RpcOrm;
            let result = CatalogPipeline::new(&orm, &settings, &company_ids)
                .resolve(&filters, drill_down.as_deref())
                .await;

            if !state.latest.with_value(|l| l.is_current(ticket)) {
                log::debug!("Discarding stale selector result");
                return;
            }

            match result {
                Ok(items) => {
                    log::info!("Selector loaded {} entries", items.len());
                    state.items.set(items);
                }
                Err(e) => {
                    log::error!("Selector query failed: {}", e);
                    state.items.set(Vec::new());
                    state.error.set(Some(e.user_message()));
                }
            }
            state.loading.set(false);
        });
    }

    fn load_options(&self) {
        let categories = self.categories;
        let warehouses = self.warehouses;
        let company_ids = self.company_ids.get_value();

        spawn_local(async move {
            let orm = RpcOrm;
            match load_categories(&orm).await {
                Ok(options) => categories.set(options),
                Err(e) => log::error!("Failed to load categories: {}", e),
            }
            match load_warehouses(&orm, &company_ids).await {
                Ok(options) => warehouses.set(options),
                Err(e) => log::error!("Failed to load warehouses: {}", e),
            }
        });
    }

    /// Reveal the next page when the grid is scrolled near its end
    pub fn on_scroll(&self, metrics: ScrollMetrics) {
        let threshold = self.settings.with_value(|s| s.scroll_threshold_px);
        let total = self.items.with_untracked(Vec::len);
        let grew = self
            .paginator
            .try_update(|p| p.on_scroll(metrics, threshold, total))
            .unwrap_or(false);
        if grew {
            log::debug!("Selector page {}", self.paginator.with_untracked(|p| p.page()));
        }
    }

    /// Tops up a first page too short to scroll
    pub fn fill_viewport(&self, metrics: ScrollMetrics) {
        let total = self.items.with_untracked(Vec::len);
        let grew = self
            .paginator
            .try_update(|p| p.fill_viewport(metrics, total))
            .unwrap_or(false);
        if grew {
            log::debug!(
                "Selector page {} to fill the viewport",
                self.paginator.with_untracked(|p| p.page())
            );
        }
    }

    pub fn show_more(&self) {
        let total = self.items.with_untracked(Vec::len);
        self.paginator.update(|p| {
            p.next_page(total);
        });
    }

    pub fn visible_items(&self) -> Vec<CatalogItem> {
        self.items
            .with(|all| self.paginator.with(|p| p.visible(all).to_vec()))
    }

    pub fn has_more(&self) -> bool {
        self.items
            .with(|all| self.paginator.with(|p| p.has_more(all.len())))
    }

    pub fn toggle_item(&self, item: &CatalogItem) {
        self.selection.update(|s| s.toggle_item(item));
    }

    pub fn is_selected(&self, item: &CatalogItem) -> bool {
        self.selection.with(|s| s.is_item_selected(item))
    }
}
