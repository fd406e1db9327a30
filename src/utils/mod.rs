pub mod error;
pub mod credentials;
pub mod request_id;

pub use error::*;
pub use credentials::*;
pub use request_id::*;
