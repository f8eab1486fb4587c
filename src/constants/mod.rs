mod service;
pub use service::*;

mod swap;
pub use swap::*;
