//! DOM-independent selection model of the auth panel.
//!
//! A [`Switchboard`] holds the tab and form elements queried once at start-up
//! together with name lookup tables. At most one tab and one form carry the
//! active flag after any operation.

use std::collections::HashMap;
use std::fmt;

/// Anything carrying a boolean "active" designation.
pub trait Activatable {
    fn set_active(&self, active: bool);
    fn is_active(&self) -> bool;
}

// ── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchError {
    NoMatchingTab(String),
    NoMatchingForm(String),
    NoMatchingSwitchTarget(String),
    Query { selector: String, reason: String },
}

impl fmt::Display for SwitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchError::NoMatchingTab(name) => write!(f, "no tab named `{}`", name),
            SwitchError::NoMatchingForm(id) => write!(f, "no form with id `{}`", id),
            SwitchError::NoMatchingSwitchTarget(name) => {
                write!(f, "switch link targets unknown tab `{}`", name)
            }
            SwitchError::Query { selector, reason } => {
                write!(f, "query `{}` failed: {}", selector, reason)
            }
        }
    }
}

impl std::error::Error for SwitchError {}

/// Outcome of one select/switch operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct SwitchReport {
    pub issues: Vec<SwitchError>,
}

impl SwitchReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Emit every issue as a warning. Mismatches never reach the page.
    pub fn log_issues(&self) {
        for issue in &self.issues {
            log::warn!("auth tabs: {}", issue);
        }
    }
}

// ── Switchboard ──────────────────────────────────────────────────────────────

struct Entry<E> {
    key: Option<String>,
    element: E,
}

pub struct Switchboard<E> {
    form_id_suffix: String,
    tabs: Vec<Entry<E>>,
    forms: Vec<Entry<E>>,
    tab_index: HashMap<String, usize>,
    form_index: HashMap<String, usize>,
}

impl<E: Activatable> Switchboard<E> {
    /// Build from tabs keyed by their tab name and forms keyed by their id.
    ///
    /// Flags are left as the markup set them. When a name repeats, lookups
    /// resolve to the first element carrying it.
    pub fn new(
        form_id_suffix: impl Into<String>,
        tabs: Vec<(Option<String>, E)>,
        forms: Vec<(Option<String>, E)>,
    ) -> Self {
        let tabs: Vec<Entry<E>> = tabs
            .into_iter()
            .map(|(key, element)| Entry { key, element })
            .collect();
        let forms: Vec<Entry<E>> = forms
            .into_iter()
            .map(|(key, element)| Entry { key, element })
            .collect();

        Self {
            form_id_suffix: form_id_suffix.into(),
            tab_index: index_by_key(&tabs),
            form_index: index_by_key(&forms),
            tabs,
            forms,
        }
    }

    /// Activate the tab named `name` and its form, deactivating all others.
    ///
    /// Unknown names leave the corresponding half with nothing active.
    pub fn select(&self, name: &str) -> SwitchReport {
        match self.tab_index.get(name) {
            Some(&index) => self.activate(Some(index), name),
            None => self.activate(None, name),
        }
    }

    /// Behaviour of a click on the tab at `index`: that very element becomes
    /// the active tab and the form paired with its name is shown.
    pub fn click_tab(&self, index: usize) -> SwitchReport {
        let Some(entry) = self.tabs.get(index) else {
            return SwitchReport {
                issues: vec![SwitchError::NoMatchingTab(format!("#{}", index))],
            };
        };
        match &entry.key {
            Some(name) => self.activate(Some(index), name),
            None => SwitchReport {
                issues: vec![SwitchError::NoMatchingTab(String::new())],
            },
        }
    }

    /// Behaviour of a click on a switch link: acts as a click on the tab
    /// named `name`, or changes nothing when no such tab exists.
    pub fn follow_switch(&self, name: &str) -> SwitchReport {
        match self.tab_index.get(name) {
            Some(&index) => self.click_tab(index),
            None => SwitchReport {
                issues: vec![SwitchError::NoMatchingSwitchTarget(name.to_string())],
            },
        }
    }

    fn activate(&self, tab: Option<usize>, name: &str) -> SwitchReport {
        let mut report = SwitchReport::default();

        for (i, entry) in self.tabs.iter().enumerate() {
            entry.element.set_active(Some(i) == tab);
        }
        if tab.is_none() {
            report.issues.push(SwitchError::NoMatchingTab(name.to_string()));
        }

        let form_id = format!("{}{}", name, self.form_id_suffix);
        let form = self.form_index.get(&form_id).copied();
        for (i, entry) in self.forms.iter().enumerate() {
            entry.element.set_active(Some(i) == form);
        }
        if form.is_none() {
            report.issues.push(SwitchError::NoMatchingForm(form_id));
        }

        log::debug!("auth tabs: selected `{}`", name);
        report
    }

    /// Tab names in markup order; unnamed tabs are skipped.
    pub fn tab_names(&self) -> Vec<&str> {
        self.tabs.iter().filter_map(|e| e.key.as_deref()).collect()
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn form_count(&self) -> usize {
        self.forms.len()
    }

    /// Name of the first active tab.
    pub fn active_tab(&self) -> Option<&str> {
        first_active(&self.tabs)
    }

    /// Id of the first active form.
    pub fn active_form(&self) -> Option<&str> {
        first_active(&self.forms)
    }

    pub fn active_tab_count(&self) -> usize {
        self.tabs.iter().filter(|e| e.element.is_active()).count()
    }

    pub fn active_form_count(&self) -> usize {
        self.forms.iter().filter(|e| e.element.is_active()).count()
    }
}

fn index_by_key<E>(entries: &[Entry<E>]) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (i, entry) in entries.iter().enumerate() {
        if let Some(key) = &entry.key {
            index.entry(key.clone()).or_insert(i);
        }
    }
    index
}

fn first_active<E: Activatable>(entries: &[Entry<E>]) -> Option<&str> {
    entries
        .iter()
        .find(|e| e.element.is_active())
        .and_then(|e| e.key.as_deref())
}
