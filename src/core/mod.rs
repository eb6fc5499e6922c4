pub mod dispatcher;
pub mod formulas;
pub mod server;

pub use crate::domain::model::{ComputationResult, Numeric, QueryParams};
pub use crate::domain::ports::ConfigProvider;
pub use crate::utils::error::Result;
