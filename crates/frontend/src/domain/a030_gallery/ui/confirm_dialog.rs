use contracts::domain::a030_gallery::reservation::disclaimer_text;
use contracts::domain::a030_gallery::ReservationPhase;
use leptos::prelude::*;

use super::view_model::{GalleryAction, GalleryViewModel};
use crate::shared::components::ui::Button;
use crate::shared::modal::Modal;

/// Disclaimer with the hold period, shown before the reservation is sent
#[component]
pub fn ConfirmDialog(vm: GalleryViewModel) -> impl IntoView {
    let expires_on = move || match vm.flow.with(|f| f.phase().clone()) {
        ReservationPhase::Confirming { expires_on } => Some(expires_on),
        _ => None,
    };

    move || {
        expires_on().map(|date| {
            let text = disclaimer_text(date, vm.reservation_days());
            view! {
                <Modal
                    title="Confirmar reserva"
                    on_close=Callback::new(move |_| vm.dispatch(GalleryAction::DeclineReservation))
                >
                    <p class="reservation-disclaimer">{text}</p>
                    <div class="modal-actions">
                        <Button
                            variant="secondary"
                            on_click=Callback::new(move |_| vm.dispatch(GalleryAction::DeclineReservation))
                        >
                            "Cancelar"
                        </Button>
                        <Button on_click=Callback::new(move |_| vm.dispatch(GalleryAction::AcceptReservation))>
                            "Confirmar"
                        </Button>
                    </div>
                </Modal>
            }
        })
    }
}
