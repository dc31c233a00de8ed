pub mod errors;
pub mod http;
pub mod tasks;

pub use errors::{
    FailureKind,
    RequestFailure,
    StudyError,
};
pub use http::Backend;
