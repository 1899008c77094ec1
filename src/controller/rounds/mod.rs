pub mod forms;
pub mod http_handlers;

pub use forms::*;
pub use http_handlers::*;
