//! Response decoding.
//!
//! - [`ResponseFormat`] - typed parsing strategies used by the service proxies
//! - [`ResponseBody`] - a body decoded into an endpoint's declared shape

mod format;
mod value;

pub use format::{JsonBody, JsonFormat, PlainTextFormat, ResponseFormat};
pub use value::ResponseBody;
