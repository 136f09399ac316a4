pub mod errors;
pub mod flow_request;

pub use errors::*;
pub use flow_request::*;
