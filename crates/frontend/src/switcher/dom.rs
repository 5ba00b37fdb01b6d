//! Binding of the [`Switchboard`] to server-rendered markup.

use super::model::{Activatable, SwitchError, Switchboard};
use contracts::shared::auth_markup::MarkupContract;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent};

/// A live element whose active state is one class token.
pub struct DomFlag {
    element: Element,
    active_class: Rc<str>,
}

impl Activatable for DomFlag {
    fn set_active(&self, active: bool) {
        if let Err(err) = self
            .element
            .class_list()
            .toggle_with_force(&self.active_class, active)
        {
            log::warn!(
                "auth tabs: cannot toggle `{}` on #{}: {:?}",
                self.active_class,
                self.element.id(),
                err
            );
        }
    }

    fn is_active(&self) -> bool {
        self.element.class_list().contains(&self.active_class)
    }
}

struct Listener {
    target: Element,
    closure: Closure<dyn FnMut(MouseEvent)>,
}

/// Click wiring over the tabs, forms and switch links of a document.
///
/// Dropping the switcher removes its listeners; call [`TabSwitcher::keep_alive`]
/// to leave them in place for the page lifetime.
pub struct TabSwitcher {
    board: Rc<Switchboard<DomFlag>>,
    listeners: Vec<Listener>,
}

impl TabSwitcher {
    pub fn attach(document: &Document, contract: &MarkupContract) -> Result<Self, SwitchError> {
        let active_class: Rc<str> = Rc::from(contract.active_class.as_str());
        let flag = |element: Element| DomFlag {
            element,
            active_class: active_class.clone(),
        };

        let tab_elements = query_elements(document, &contract.tab_selector())?;
        let form_elements = query_elements(document, &contract.form_selector())?;
        let switch_elements = query_elements(document, &contract.switch_selector())?;

        let tabs = tab_elements
            .iter()
            .map(|el| (el.get_attribute(&contract.tab_attribute), flag(el.clone())))
            .collect();
        let forms = form_elements
            .iter()
            .map(|el| {
                let id = el.id();
                let key = if id.is_empty() { None } else { Some(id) };
                (key, flag(el.clone()))
            })
            .collect();

        let board = Rc::new(Switchboard::new(
            contract.form_id_suffix.clone(),
            tabs,
            forms,
        ));
        let mut listeners = Vec::with_capacity(tab_elements.len() + switch_elements.len());

        for (index, tab) in tab_elements.into_iter().enumerate() {
            if tab.get_attribute(&contract.tab_attribute).is_none() {
                log::warn!(
                    "auth tabs: tab #{} has no `{}` attribute, not wired",
                    index,
                    contract.tab_attribute
                );
                continue;
            }
            let board = board.clone();
            let closure = Closure::wrap(Box::new(move |_: MouseEvent| {
                board.click_tab(index).log_issues();
            }) as Box<dyn FnMut(MouseEvent)>);
            listeners.push(listen(tab, closure));
        }

        for link in switch_elements {
            let target = link.get_attribute(&contract.tab_attribute).unwrap_or_default();
            let board = board.clone();
            let closure = Closure::wrap(Box::new(move |e: MouseEvent| {
                e.prevent_default();
                board.follow_switch(&target).log_issues();
            }) as Box<dyn FnMut(MouseEvent)>);
            listeners.push(listen(link, closure));
        }

        log::debug!(
            "auth tabs: wired {} listeners over tabs {:?} and {} forms",
            listeners.len(),
            board.tab_names(),
            board.form_count()
        );

        Ok(Self { board, listeners })
    }

    pub fn board(&self) -> &Switchboard<DomFlag> {
        &self.board
    }

    /// Leave the listeners attached for the rest of the page lifetime.
    pub fn keep_alive(mut self) {
        for listener in std::mem::take(&mut self.listeners) {
            listener.closure.forget();
        }
    }
}

impl Drop for TabSwitcher {
    fn drop(&mut self) {
        for listener in &self.listeners {
            let _ = listener.target.remove_event_listener_with_callback(
                "click",
                listener.closure.as_ref().unchecked_ref::<js_sys::Function>(),
            );
        }
    }
}

fn listen(target: Element, closure: Closure<dyn FnMut(MouseEvent)>) -> Listener {
    let _ = target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    Listener { target, closure }
}

fn query_elements(document: &Document, selector: &str) -> Result<Vec<Element>, SwitchError> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|err| SwitchError::Query {
            selector: selector.to_string(),
            reason: format!("{:?}", err),
        })?;

    let mut elements = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(node) = nodes.get(i) else { continue };
        if let Ok(element) = node.dyn_into::<Element>() {
            elements.push(element);
        }
    }
    Ok(elements)
}
