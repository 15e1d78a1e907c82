pub mod error;
pub mod request_id;

pub use error::*;
pub use request_id::*;
