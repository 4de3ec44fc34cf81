//! HTTP building blocks: JSON response builders and query string parsing

pub mod query;
pub mod response;

pub use response::{ErrorBody, MessageBody};
