//! Client-rendered login/register panel.
//!
//! Emits the same markup the server template does (`auth-tab`, `auth-form`,
//! `switch-tab`, `<name>-form` ids) and drives it through a [`Switchboard`]
//! of signals, so tab and switch-link clicks behave like the DOM binding.

use crate::switcher::model::{Activatable, Switchboard};
use contracts::shared::auth_markup::{MarkupContract, TAB_LOGIN, TAB_REGISTER};
use leptos::ev::MouseEvent;
use leptos::prelude::*;

const DEFAULT_ACTION: &str = "/auth";

impl Activatable for RwSignal<bool> {
    fn set_active(&self, active: bool) {
        self.set(active);
    }

    fn is_active(&self) -> bool {
        self.get_untracked()
    }
}

/// `base` plus the active token when `active` is set.
fn class_names(base: &str, active_class: &str, active: bool) -> String {
    if active {
        format!("{} {}", base, active_class)
    } else {
        base.to_string()
    }
}

/// Active flags of the panel, indexed like [`TAB_NAMES`].
#[derive(Clone, Copy)]
struct PanelFlags {
    tabs: [RwSignal<bool>; 2],
    forms: [RwSignal<bool>; 2],
}

const TAB_NAMES: [&str; 2] = [TAB_LOGIN, TAB_REGISTER];

/// Flags for both pairs with `initial` active, and the board driving them.
fn panel_board(contract: &MarkupContract, initial: &str) -> (PanelFlags, Switchboard<RwSignal<bool>>) {
    let flags = PanelFlags {
        tabs: TAB_NAMES.map(|name| RwSignal::new(name == initial)),
        forms: TAB_NAMES.map(|name| RwSignal::new(name == initial)),
    };

    let board = Switchboard::new(
        contract.form_id_suffix.clone(),
        TAB_NAMES
            .iter()
            .zip(flags.tabs)
            .map(|(name, flag)| (Some(name.to_string()), flag))
            .collect(),
        TAB_NAMES
            .iter()
            .zip(flags.forms)
            .map(|(name, flag)| (Some(contract.form_id(name)), flag))
            .collect(),
    );
    (flags, board)
}

#[component]
pub fn AuthTabs(
    /// Class names and form id convention, defaults when omitted
    #[prop(optional)]
    contract: Option<MarkupContract>,
    /// Tab shown first, `login` by default
    #[prop(optional, into)]
    initial: Option<String>,
    /// Submission target of both forms
    #[prop(optional, into)]
    action: Option<String>,
) -> impl IntoView {
    let contract = contract.unwrap_or_default();
    let initial = initial.unwrap_or_else(|| TAB_LOGIN.to_string());
    let action = action.unwrap_or_else(|| DEFAULT_ACTION.to_string());

    let (flags, board) = panel_board(&contract, &initial);
    let PanelFlags {
        tabs: tab_flags,
        forms: form_flags,
    } = flags;
    let board = StoredValue::new(board);

    let classes = |base: &str, flag: RwSignal<bool>| {
        let base = base.to_string();
        let active_class = contract.active_class.clone();
        move || class_names(&base, &active_class, flag.get())
    };

    let click_tab = move |index: usize| {
        move |_: MouseEvent| board.with_value(|b| b.click_tab(index).log_issues())
    };
    let follow = move |target: &'static str| {
        move |ev: MouseEvent| {
            ev.prevent_default();
            board.with_value(|b| b.follow_switch(target).log_issues());
        }
    };

    view! {
        <div class="auth-container">
            <div class="auth-tabs">
                <button
                    type="button"
                    class=classes(contract.tab_class.as_str(), tab_flags[0])
                    data-tab=TAB_LOGIN
                    on:click=click_tab(0)
                >
                    "Login"
                </button>
                <button
                    type="button"
                    class=classes(contract.tab_class.as_str(), tab_flags[1])
                    data-tab=TAB_REGISTER
                    on:click=click_tab(1)
                >
                    "Register"
                </button>
            </div>

            <form
                id=contract.form_id(TAB_LOGIN)
                class=classes(contract.form_class.as_str(), form_flags[0])
                method="post"
                action=action.clone()
            >
                <AuthField form=TAB_LOGIN name="email" label="Email" input_type="email" />
                <AuthField form=TAB_LOGIN name="password" label="Password" input_type="password" min_length=8 />
                <button type="submit" class="btn-primary">"Login"</button>
                <p class="auth-switch">
                    "No account? "
                    <a href="#" class=contract.switch_class.clone() data-tab=TAB_REGISTER on:click=follow(TAB_REGISTER)>
                        "Register"
                    </a>
                </p>
            </form>

            <form
                id=contract.form_id(TAB_REGISTER)
                class=classes(contract.form_class.as_str(), form_flags[1])
                method="post"
                action=action
            >
                <AuthField form=TAB_REGISTER name="name" label="Name" />
                <AuthField form=TAB_REGISTER name="email" label="Email" input_type="email" />
                <AuthField form=TAB_REGISTER name="password" label="Password" input_type="password" min_length=8 />
                <AuthField form=TAB_REGISTER name="confirm_password" label="Confirm Password" input_type="password" min_length=8 />
                <button type="submit" class="btn-primary">"Register"</button>
                <p class="auth-switch">
                    "Already registered? "
                    <a href="#" class=contract.switch_class.clone() data-tab=TAB_LOGIN on:click=follow(TAB_LOGIN)>
                        "Login"
                    </a>
                </p>
            </form>
        </div>
    }
}

/// Labelled required input; length bounds follow the server-side form rules.
#[component]
fn AuthField(
    form: &'static str,
    name: &'static str,
    label: &'static str,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] min_length: Option<u32>,
) -> impl IntoView {
    let id = format!("{}-{}", form, name);
    let min_length = min_length.unwrap_or(2);

    view! {
        <div class="form__group">
            <label class="form__label" for=id.clone()>{label}</label>
            <input
                id=id
                class="form__input"
                name=name
                type=input_type.unwrap_or("text")
                required=true
                minlength=min_length.to_string()
                maxlength="255"
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_names() {
        assert_eq!(class_names("auth-tab", "active", true), "auth-tab active");
        assert_eq!(class_names("auth-tab", "active", false), "auth-tab");
        assert_eq!(class_names("auth-form", "is-open", true), "auth-form is-open");
    }

    fn states(flags: [RwSignal<bool>; 2]) -> [bool; 2] {
        flags.map(|flag| flag.get_untracked())
    }

    #[test]
    fn test_panel_board_drives_signals() {
        let owner = Owner::new();
        owner.set();

        let (flags, board) = panel_board(&MarkupContract::default(), TAB_LOGIN);
        assert_eq!(states(flags.tabs), [true, false]);
        assert_eq!(states(flags.forms), [true, false]);

        assert!(board.follow_switch(TAB_REGISTER).is_clean());
        assert_eq!(states(flags.tabs), [false, true]);
        assert_eq!(states(flags.forms), [false, true]);
        assert_eq!(board.active_form(), Some("register-form"));

        assert!(board.click_tab(0).is_clean());
        assert_eq!(states(flags.tabs), [true, false]);
        assert_eq!(states(flags.forms), [true, false]);

        assert!(board.select(TAB_REGISTER).is_clean());
        assert_eq!(states(flags.tabs), [false, true]);
        assert_eq!(states(flags.forms), [false, true]);
    }

    #[test]
    fn test_panel_switch_to_unknown_tab_keeps_signals() {
        let owner = Owner::new();
        owner.set();

        let (flags, board) = panel_board(&MarkupContract::default(), TAB_REGISTER);
        let report = board.follow_switch("forgot");
        assert!(!report.is_clean());
        assert_eq!(states(flags.tabs), [false, true]);
        assert_eq!(states(flags.forms), [false, true]);

        let _ = board.select("forgot");
        assert_eq!(states(flags.tabs), [false, false]);
        assert_eq!(states(flags.forms), [false, false]);
    }

    #[test]
    fn test_panel_board_respects_form_suffix() {
        let owner = Owner::new();
        owner.set();

        let contract = MarkupContract::from_json(r#"{"form_id_suffix": "_panel"}"#).unwrap();
        let (flags, board) = panel_board(&contract, TAB_LOGIN);
        assert!(board.click_tab(1).is_clean());
        assert_eq!(board.active_form(), Some("register_panel"));
        assert_eq!(states(flags.forms), [false, true]);
    }
}
