mod query;

pub use query::{PageParamError, QueryParams};
