use super::dom::TabSwitcher;
use crate::components::auth_tabs::AuthTabs;
use contracts::shared::auth_markup::{MarkupContract, CONFIG_ELEMENT_ID, MOUNT_ELEMENT_ID};
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

/// Start the switcher once the document structure is parsed.
pub fn boot() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("auth tabs: no document available");
        return;
    };

    if document.ready_state() == "loading" {
        let doc = document.clone();
        let on_ready = Closure::once_into_js(move || init(&doc));
        if let Err(err) =
            document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            log::error!("auth tabs: cannot wait for DOMContentLoaded: {:?}", err);
        }
    } else {
        init(&document);
    }
}

fn init(document: &Document) {
    let contract = load_contract(document);

    if let Some(root) = document
        .get_element_by_id(MOUNT_ELEMENT_ID)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        log::debug!("auth tabs: mounting component into #{}", MOUNT_ELEMENT_ID);
        leptos::mount::mount_to(root, move || view! { <AuthTabs contract=contract /> }).forget();
        return;
    }

    match TabSwitcher::attach(document, &contract) {
        Ok(switcher) => {
            if switcher.board().tab_count() == 0 {
                log::debug!("auth tabs: no `{}` elements on this page", contract.tab_selector());
            }
            switcher.keep_alive();
        }
        Err(err) => log::error!("auth tabs: {}", err),
    }
}

fn load_contract(document: &Document) -> MarkupContract {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return MarkupContract::default();
    };
    contract_or_default(&json)
}

fn contract_or_default(json: &str) -> MarkupContract {
    if json.trim().is_empty() {
        return MarkupContract::default();
    }
    MarkupContract::from_json(json).unwrap_or_else(|err| {
        log::warn!("auth tabs: ignoring #{}: {}", CONFIG_ELEMENT_ID, err);
        MarkupContract::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_or_default() {
        assert_eq!(contract_or_default("  \n"), MarkupContract::default());
        assert_eq!(contract_or_default("not json"), MarkupContract::default());
        assert_eq!(
            contract_or_default(r#"{"tab_class": "tab"}"#).tab_selector(),
            ".tab"
        );
    }

    #[test]
    fn test_invalid_class_token_falls_back_to_defaults() {
        assert_eq!(
            contract_or_default(r#"{"active_class": "", "tab_class": "is open"}"#),
            MarkupContract::default()
        );
        assert_eq!(
            contract_or_default(r#"{"active_class": "shown"}"#).active_class,
            "shown"
        );
    }
}
