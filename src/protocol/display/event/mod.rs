pub mod delete_id;
pub mod error;

pub use delete_id::DeleteId;
pub use error::Error;
