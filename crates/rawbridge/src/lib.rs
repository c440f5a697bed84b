//! Rawbridge - RAW decoder lifecycle wrapper
//!
//! This crate wraps a RAW-decoding engine behind an explicit lifecycle
//! (open, unpack, unpack thumbnail, recycle) and exposes the marshaled
//! metadata tree built by `rawbridge-core`.
//!
//! # Module Structure
//!
//! - `engine` - status codes and the [`RawEngine`] contract
//! - `native` - the built-in engine (sensor decode, EXIF, previews)
//! - `processor` - the lifecycle wrapper and one-shot entry point
//!
//! # Usage
//!
//! ```ignore
//! use rawbridge::Processor;
//!
//! let mut processor = Processor::new();
//! let status = processor.open_file("photo.arw", None)?;
//! assert_eq!(status, 0);
//! processor.unpack()?;
//! let metadata = processor.metadata()?;
//! println!("{}", metadata["idata"]["model"]);
//! ```

pub mod engine;
pub mod native;
pub mod processor;

pub use engine::{make_version, strerror, RawEngine, Status};
pub use native::NativeEngine;
pub use processor::{
    process_raw_image, ProcessOptions, ProcessOutput, Processor, ProcessorError,
};

// Re-export the marshaling surface for hosts that build their own
// snapshots or engines.
pub use rawbridge_core::{marshal, Snapshot};
