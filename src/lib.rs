pub mod api;
pub mod catalog;
pub mod components;
pub mod logging;
pub mod normalization;

pub mod util {
    pub mod env;
}
