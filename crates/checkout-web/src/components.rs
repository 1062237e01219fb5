//! UI Components

use leptos::prelude::*;

use crate::api;
use crate::form::CheckoutForm;

/// Amount and email form with the pay button
#[component]
pub fn PaymentForm() -> impl IntoView {
    let initial = CheckoutForm::default();
    let (amount, set_amount) = signal(initial.amount);
    let (email, set_email) = signal(initial.email);
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let current = move || CheckoutForm {
        amount: amount.get(),
        email: email.get(),
    };

    let pay = move |_| {
        if submitting.get() {
            return;
        }

        let body = match current().to_request(&api::redirect_url()) {
            Ok(body) => body,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };

        set_error.set(None);
        set_submitting.set(true);

        leptos::task::spawn_local(async move {
            match api::initiate_payment(&body).await {
                Ok(link) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(&link);
                    }
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="checkout-form">
            <input
                type="number"
                placeholder="Amount in USD"
                prop:value=move || amount.get()
                on:input=move |ev| set_amount.set(event_target_value(&ev))
            />
            <input
                type="email"
                placeholder="Email Address"
                prop:value=move || email.get()
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />

            <button on:click=pay disabled=move || submitting.get() || !current().can_submit()>
                {move || if submitting.get() { "Processing...." } else { "Pay With Chimoney" }}
            </button>

            <Show when=move || error.get().is_some()>
                <p class="error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}

/// Shown after the provider redirects back
#[component]
pub fn SuccessPanel(issue_id: Option<String>) -> impl IntoView {
    view! {
        <div class="checkout-success">
            <strong>"Payment Successful"</strong>
            <strong>"ISSUE ID : " {issue_id.unwrap_or_default()}</strong>
            <span class="check" aria-hidden="true">"✓"</span>
        </div>
    }
}
