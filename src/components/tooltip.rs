use leptos::prelude::*;

/// "?" badge that reveals `text` on hover or tap
#[component]
pub fn Tooltip(#[prop(into)] text: String) -> impl IntoView {
    let (open, set_open) = signal(false);

    view! {
        <span
            class="tooltip"
            on:mouseenter=move |_| set_open.set(true)
            on:mouseleave=move |_| set_open.set(false)
            on:click=move |ev| {
                ev.stop_propagation();
                set_open.update(|v| *v = !*v);
            }
        >
            "?"
            <Show when=move || open.get()>
                <span class="tooltip-text">{text.clone()}</span>
            </Show>
        </span>
    }
}
