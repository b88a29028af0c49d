use leptos::prelude::*;

/// Collapsible view over the in-memory log buffer
#[component]
pub fn LogPanel() -> impl IntoView {
    let (open, set_open) = signal(false);
    let (lines, set_lines) = signal(Vec::<String>::new());

    let toggle = move |_| {
        let opening = !open.get_untracked();
        if opening {
            set_lines.set(rolling_logger::recent_lines());
        }
        set_open.set(opening);
    };

    view! {
        <div class="log-panel">
            <button class="log-toggle" on:click=toggle>
                {move || if open.get() { "Masquer le journal" } else { "Journal" }}
            </button>
            <Show when=move || open.get()>
                <pre class="log-lines">
                    {move || lines.with(|lines| lines.join("\n"))}
                </pre>
            </Show>
        </div>
    }
}
