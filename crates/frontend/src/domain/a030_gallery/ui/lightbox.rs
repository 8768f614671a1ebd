use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use super::view_model::{GalleryAction, GalleryViewModel};
use crate::shared::icons::icon;

const ZOOM_SCALE: f64 = 2.5;

/// Pointer position inside a box as percentages of its size
pub(crate) fn zoom_origin(
    client_x: f64,
    client_y: f64,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
) -> Option<(f64, f64)> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some((
        (client_x - left) / width * 100.0,
        (client_y - top) / height * 100.0,
    ))
}

fn image_style(origin: Option<(f64, f64)>) -> String {
    match origin {
        Some((x, y)) => format!(
            "transform-origin: {:.2}% {:.2}%; transform: scale({});",
            x, y, ZOOM_SCALE
        ),
        None => "transform-origin: center center; transform: scale(1);".to_string(),
    }
}

/// Full-screen image viewer that magnifies under the pointer
#[component]
pub fn Lightbox(vm: GalleryViewModel) -> impl IntoView {
    let zoom = RwSignal::new(None::<(f64, f64)>);

    let on_move = move |event: ev::MouseEvent| {
        let Some(target) = event
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        else {
            return;
        };
        let rect = target.get_bounding_client_rect();
        zoom.set(zoom_origin(
            event.client_x() as f64,
            event.client_y() as f64,
            rect.left(),
            rect.top(),
            rect.width(),
            rect.height(),
        ));
    };

    let close = move |_| {
        zoom.set(None);
        vm.dispatch(GalleryAction::CloseLightbox);
    };

    move || {
        vm.lightbox.get().map(|url| {
            view! {
                <div id="lightbox" class="lightbox active">
                    <button class="close-lightbox" on:click=close>
                        {icon("x")}
                    </button>
                    <div
                        class="lightbox__frame"
                        on:mousemove=on_move
                        on:mouseleave=move |_| zoom.set(None)
                    >
                        <img
                            id="lightbox-img"
                            src=url
                            alt="Vista ampliada"
                            style=move || image_style(zoom.get())
                        />
                    </div>
                </div>
            }
        })
    }
}
