pub mod config;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod query;
pub mod reference;
pub mod routes;

pub use config::ApiConfig;
pub use error::{ResponseError, ValidationError};
pub use normalize::{COLUMNS, FlatRecord};
pub use query::{RouteFilter, WriteMode};
pub use routes::{Direction, Route};
