//! VIP Go remote uploads filesystem
//!
//! Uploads are not on local disk; they live behind the files service and
//! are addressed by a canonical `/wp-content/uploads/...` key. This crate
//! provides:
//! - `FilesApi`, the seam to the files service, and `HttpFilesApi`, its
//!   `reqwest` implementation
//! - `sanitize_path`, mapping local upload paths to canonical keys
//! - `VipUploadsFilesystem`, whole-file (text or bytes) and line-array
//!   reads plus writes,
//!   deletes and existence checks, with failures kept on an `ErrorCollector`
//!
//! # Example
//!
//! ```rust,ignore
//! use vipgo_files::VipUploadsFilesystem;
//!
//! let fs = VipUploadsFilesystem::from_config(&config.files)?;
//! match fs.get_contents("/var/www/wp-content/uploads/2024/01/notes.txt").await {
//!     Some(contents) => println!("{contents}"),
//!     None => eprintln!("read failed: {:?}", fs.errors().get_error_code()),
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod filesystem;
pub mod path;

pub use api::FilesApi;
pub use client::HttpFilesApi;
pub use error::{ApiError, ClientError, ErrorCollector};
pub use filesystem::{VipUploadsFilesystem, split_lines};
pub use path::{CANONICAL_UPLOADS_PREFIX, UploadsPaths, sanitize_path};
