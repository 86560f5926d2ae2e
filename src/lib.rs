use errors::Error;

#[macro_use]
extern crate rust_i18n;

// Catalogs are compiled in from assets/locales/<code>.json.
i18n!("assets/locales", fallback = "en");

pub mod authentication;
pub mod configuration;
pub mod controller;
pub mod domain;
pub mod errors;
pub mod events;
pub mod i18n;
pub mod middleware;
pub mod repository;
pub mod startup;
pub mod telemetry;
pub mod view_engine;

/// Application results options list
pub type Result<T, E = Error> = std::result::Result<T, E>;
