pub mod api;
pub mod config;
pub mod error;
pub mod invoice;
pub mod models;
pub mod route;
pub mod table;
mod views;

pub use api::{ApiRequest, FormMode, Listed, Method, Resource};
pub use config::AppConfig;
pub use error::{ApiError, FacturacionError, RouteError};
pub use models::*;
pub use table::{TableRecord, TableState};
