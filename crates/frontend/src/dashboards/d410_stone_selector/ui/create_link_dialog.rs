use contracts::dashboards::d410_stone_selector::options::load_partners;
use contracts::dashboards::d410_stone_selector::share_link::create_share_link;
use contracts::dashboards::d410_stone_selector::{NamedOption, ShareLink, ShareLinkRequest};
use contracts::shared::GalleryError;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dashboards::d410_stone_selector::state::SelectorState;
use crate::shared::clipboard::copy_to_clipboard_with_callback;
use crate::shared::components::ui::{Button, Select};
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::orm::RpcOrm;

fn failure_message(error: &GalleryError) -> String {
    match error {
        GalleryError::MissingContext(message) => message.clone(),
        other => format!("Error al crear el enlace: {}", other.user_message()),
    }
}

/// Pick a contact and create a public gallery link for the selected images
#[component]
pub fn CreateLinkDialog(state: SelectorState) -> impl IntoView {
    let partners = RwSignal::new(Vec::<NamedOption>::new());
    let partner_id = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let created = RwSignal::new(None::<ShareLink>);
    let copied = RwSignal::new(false);

    let limit = state.settings().partner_limit;
    spawn_local(async move {
        match load_partners(&RpcOrm, limit).await {
            Ok(options) => partners.set(options),
            Err(e) => {
                // the dialog stays usable with an empty list
                log::error!("Failed to load contacts: {}", e);
                partners.set(Vec::new());
            }
        }
    });

    let close = move || state.link_dialog_open.set(false);

    let confirm = move |_: leptos::ev::MouseEvent| {
        let request = state.selection.with_untracked(|selection| {
            ShareLinkRequest::new(partner_id.get_untracked().parse().ok(), selection)
        });
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                error.set(Some(failure_message(&e)));
                return;
            }
        };

        error.set(None);
        saving.set(true);
        spawn_local(async move {
            match create_share_link(&RpcOrm, &request).await {
                Ok(link) => {
                    log::info!("Share link {} created", link.name);
                    created.set(Some(link));
                }
                Err(e) => {
                    log::error!("Failed to create share link: {}", e);
                    error.set(Some(failure_message(&e)));
                }
            }
            saving.set(false);
        });
    };

    let copy_link = move |_: leptos::ev::MouseEvent| {
        if let Some(link) = created.get_untracked() {
            copy_to_clipboard_with_callback(&link.url, move |ok| copied.set(ok));
        }
    };

    view! {
        <Modal title="Generar Enlace para Contacto" on_close=Callback::new(move |_| close())>
            {move || match created.get() {
                Some(link) => view! {
                    <div class="share-link-result">
                        <p>"Enlace creado: " <strong>{link.name.clone()}</strong></p>
                        <div class="share-link-result__url">
                            <input class="form__input" readonly=true prop:value=link.url.clone() />
                            <button class="button button--secondary" on:click=copy_link>
                                {icon("copy")}
                                {move || if copied.get() { " ¡Copiado!" } else { " Copiar" }}
                            </button>
                        </div>
                        <div class="modal-actions">
                            <Button on_click=Callback::new(move |_| close())>"Cerrar"</Button>
                        </div>
                    </div>
                }.into_any(),
                None => view! {
                    <div class="share-link-form">
                        <p>
                            {move || format!("{} imágenes seleccionadas", state.selection.with(|s| s.len()))}
                        </p>
                        <Select
                            label="Contacto"
                            placeholder="Selecciona un contacto"
                            value=partner_id
                            options=Signal::derive(move || {
                                partners.with(|p| p.iter().map(|o| (o.id.to_string(), o.name.clone())).collect::<Vec<_>>())
                            })
                            on_change=Callback::new(move |value: String| partner_id.set(value))
                        />
                        {move || error.get().map(|message| view! { <div class="form__error">{message}</div> })}
                        <div class="modal-actions">
                            <Button variant="secondary" on_click=Callback::new(move |_| close())>"Cancelar"</Button>
                            <Button disabled=Signal::derive(move || saving.get()) on_click=Callback::new(confirm)>
                                {icon("link")}
                                {move || if saving.get() { " Creando..." } else { " Crear enlace" }}
                            </Button>
                        </div>
                    </div>
                }.into_any(),
            }}
        </Modal>
    }
}
