use leptos::prelude::*;

use crate::dashboards::d410_stone_selector::ui::SelectorDashboard;
use crate::domain::a030_gallery::ui::GalleryWidget;
use crate::shared::injected::{detect_page, page_settings, PageConfig};

/// Mounts the widget matching the configuration injected by the page
#[component]
pub fn App() -> impl IntoView {
    let settings = page_settings();

    match detect_page() {
        Some(PageConfig::Gallery(bootstrap)) => {
            log::info!("Mounting gallery widget");
            view! { <GalleryWidget bootstrap=bootstrap settings=settings.gallery /> }.into_any()
        }
        Some(PageConfig::Selector(context)) => {
            log::info!("Mounting selector dashboard");
            view! {
                <SelectorDashboard settings=settings.selector company_ids=context.company_ids />
            }
            .into_any()
        }
        None => {
            log::warn!("Neither galleryConfig nor selectorConfig is defined, nothing to mount");
            view! { <></> }.into_any()
        }
    }
}
