//! Engine status codes and the decoding engine contract.
//!
//! The lifecycle wrapper treats engine status codes as data: a non-zero
//! status from open or unpack is surfaced to the caller unchanged, never
//! converted into a wrapper error. Wrapper errors are reserved for caller
//! misuse (see [`crate::processor::ProcessorError`]).

use std::fs;
use std::path::Path;

use rawbridge_core::Snapshot;

/// Status codes reported by the decoding engine.
///
/// Negative codes above -100000 are non-fatal: the instance stays usable
/// and the caller decides whether to proceed. Codes at or below -100000
/// indicate the current decode is dead and the instance should be
/// recycled before reuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    UnspecifiedError,
    FileUnsupported,
    RequestForNonexistentImage,
    OutOfOrderCall,
    NoThumbnail,
    UnsupportedThumbnail,
    InputClosed,
    InsufficientMemory,
    DataError,
    IoError,
    CancelledByCallback,
    BadCrop,
}

impl Status {
    /// The numeric code as surfaced to callers.
    pub fn code(self) -> i32 {
        match self {
            Status::Success => 0,
            Status::UnspecifiedError => -1,
            Status::FileUnsupported => -2,
            Status::RequestForNonexistentImage => -3,
            Status::OutOfOrderCall => -4,
            Status::NoThumbnail => -5,
            Status::UnsupportedThumbnail => -6,
            Status::InputClosed => -7,
            Status::InsufficientMemory => -100007,
            Status::DataError => -100008,
            Status::IoError => -100009,
            Status::CancelledByCallback => -100010,
            Status::BadCrop => -100011,
        }
    }

    /// Map a numeric code back to a status. Unknown codes collapse to
    /// `UnspecifiedError`, matching how callers are expected to treat
    /// codes they do not recognize.
    pub fn from_code(code: i32) -> Status {
        match code {
            0 => Status::Success,
            -2 => Status::FileUnsupported,
            -3 => Status::RequestForNonexistentImage,
            -4 => Status::OutOfOrderCall,
            -5 => Status::NoThumbnail,
            -6 => Status::UnsupportedThumbnail,
            -7 => Status::InputClosed,
            -100007 => Status::InsufficientMemory,
            -100008 => Status::DataError,
            -100009 => Status::IoError,
            -100010 => Status::CancelledByCallback,
            -100011 => Status::BadCrop,
            _ => Status::UnspecifiedError,
        }
    }

    /// Fatal codes require a recycle before the instance is reused.
    pub fn is_fatal(self) -> bool {
        self.code() <= -100000
    }

    /// Human-readable description of a status code.
    pub fn message(self) -> &'static str {
        match self {
            Status::Success => "No error",
            Status::UnspecifiedError => "Unspecified error",
            Status::FileUnsupported => "Unsupported file format or not RAW file",
            Status::RequestForNonexistentImage => "Request for nonexistent image number",
            Status::OutOfOrderCall => "Out of order call of decoder function",
            Status::NoThumbnail => "No thumbnail in file",
            Status::UnsupportedThumbnail => "Unsupported thumbnail format",
            Status::InputClosed => "No input stream, or input stream closed",
            Status::InsufficientMemory => "Unsufficient memory",
            Status::DataError => "Data error",
            Status::IoError => "I/O error",
            Status::CancelledByCallback => "Cancelled by user callback",
            Status::BadCrop => "Bad crop box",
        }
    }
}

/// Look up the description for a numeric status code.
pub fn strerror(code: i32) -> &'static str {
    Status::from_code(code).message()
}

/// Pack a dotted version into the engine's single-integer form:
/// `(major << 16) | (minor << 8) | patch`.
pub fn make_version(major: u32, minor: u32, patch: u32) -> u32 {
    (major << 16) | (minor << 8) | patch
}

/// The decoding engine contract.
///
/// One instance owns one source at a time. Implementations are not
/// required to be thread-safe; the wrapper serializes access through
/// `&mut self`. Snapshot and buffer accessors borrow from the instance
/// and are invalidated by [`RawEngine::recycle`].
pub trait RawEngine {
    /// Load a source from an in-memory buffer. Moves the engine to its
    /// opened state even when the returned status is non-zero, so the
    /// caller can still query whatever identification was recovered.
    fn open_buffer(&mut self, data: &[u8]) -> Status;

    /// Load a source from a filesystem path. The size hint mirrors the
    /// engine's large-file interface and may be ignored.
    fn open_file(&mut self, path: &Path, _bigfile_size: Option<u64>) -> Status {
        match fs::read(path) {
            Ok(data) => self.open_buffer(&data),
            Err(_) => Status::IoError,
        }
    }

    /// Decode the full image data, completing the metadata snapshot.
    fn unpack(&mut self) -> Status;

    /// Extract the embedded thumbnail, independent of [`RawEngine::unpack`].
    fn unpack_thumb(&mut self) -> Status;

    /// Release all per-source state, returning to the unopened state.
    /// Idempotent.
    fn recycle(&mut self);

    /// Number of nonfatal errors recorded since the last open.
    fn error_count(&self) -> u32;

    /// Engine version string.
    fn version(&self) -> &'static str;

    /// Engine version packed via [`make_version`].
    fn version_number(&self) -> u32;

    /// Number of supported camera formats.
    fn camera_count(&self) -> usize;

    /// Names of supported camera formats.
    fn camera_list(&self) -> &'static [&'static str];

    /// The current metadata snapshot. Valid after open; fields filled in
    /// by unpack stay at their defaults until then.
    fn snapshot(&self) -> &Snapshot;

    /// Thumbnail bytes captured by [`RawEngine::unpack_thumb`], if any.
    fn thumbnail_bytes(&self) -> Option<&[u8]>;

    /// XMP block captured at open time, if the source carries one.
    fn xmp_bytes(&self) -> Option<&[u8]>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_round_trip() {
        for status in [
            Status::Success,
            Status::FileUnsupported,
            Status::RequestForNonexistentImage,
            Status::OutOfOrderCall,
            Status::NoThumbnail,
            Status::UnsupportedThumbnail,
            Status::InputClosed,
            Status::InsufficientMemory,
            Status::DataError,
            Status::IoError,
            Status::CancelledByCallback,
            Status::BadCrop,
        ] {
            assert_eq!(Status::from_code(status.code()), status);
        }
    }

    #[test]
    fn test_unknown_code_collapses_to_unspecified() {
        assert_eq!(Status::from_code(-42), Status::UnspecifiedError);
        assert_eq!(Status::from_code(7), Status::UnspecifiedError);
    }

    #[test]
    fn test_fatal_threshold() {
        assert!(!Status::FileUnsupported.is_fatal());
        assert!(!Status::NoThumbnail.is_fatal());
        assert!(Status::InsufficientMemory.is_fatal());
        assert!(Status::IoError.is_fatal());
    }

    #[test]
    fn test_strerror_lookup() {
        assert_eq!(strerror(0), "No error");
        assert_eq!(strerror(-5), "No thumbnail in file");
        assert_eq!(strerror(-100009), "I/O error");
        assert_eq!(strerror(12345), "Unspecified error");
    }

    #[test]
    fn test_make_version_packing() {
        assert_eq!(make_version(0, 21, 2), 0x1502);
        assert_eq!(make_version(1, 0, 0), 0x10000);
        assert_eq!(make_version(0, 0, 1), 1);
    }
}
