pub mod auth_markup;
