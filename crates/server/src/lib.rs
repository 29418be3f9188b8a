//! Framework-agnostic request handling for the maskout service.
//!
//! The HTTP framework (multipart parsing, routing, static serving) stays
//! outside this crate: it hands a [`request::ProcessRequest`] to the
//! [`handler::RequestHandler`] and serializes the returned
//! [`response::ApiResponse`] with the status code from the reply. The
//! download endpoint resolves filenames through
//! [`output_files::resolve_output_file`].

pub mod config;
pub mod handler;
pub mod output_files;
pub mod request;
pub mod response;

pub use config::ServiceConfig;
pub use handler::{HandlerReply, RequestHandler};
pub use request::{ProcessRequest, UploadedMedia};
pub use response::ApiResponse;
