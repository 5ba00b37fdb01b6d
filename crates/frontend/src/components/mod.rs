pub mod auth_tabs;
