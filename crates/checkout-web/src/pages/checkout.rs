//! Checkout Page

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::{PaymentForm, SuccessPanel};
use crate::form::CheckoutView;

#[component]
pub fn CheckoutPage() -> impl IntoView {
    let query = use_query_map();
    let current_view = move || query.with(|q| CheckoutView::from_query(q.get("status"), q.get("issueID")));

    view! {
        <div class="checkout">
            {move || match current_view() {
                CheckoutView::Result { issue_id } => view! { <SuccessPanel issue_id=issue_id /> }.into_any(),
                CheckoutView::Form => view! { <PaymentForm /> }.into_any(),
            }}
        </div>
    }
}
