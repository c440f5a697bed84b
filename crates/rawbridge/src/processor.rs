//! Decoder lifecycle wrapper.
//!
//! The wrapper enforces call ordering and keeps engine status codes and
//! caller faults on separate channels: a corrupt file is a status code
//! the caller inspects, while calling `metadata` before `open` is a
//! [`ProcessorError`]. Engine statuses are never converted to errors and
//! errors never carry engine codes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::engine::{RawEngine, Status};
use crate::native::NativeEngine;

/// Caller-misuse and resource faults. Decode failures are not here; they
/// travel as engine status codes.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// An operation that requires an open source was called first.
    #[error("no source has been opened")]
    NotOpened,

    /// `thumbnail` was called before `unpack_thumb`.
    #[error("thumbnail has not been unpacked")]
    ThumbnailNotUnpacked,

    /// Path-based open pre-check: the file does not exist.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// Path-based open pre-check: the file exists but is unreadable.
    #[error("cannot read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Main-image lifecycle state. Thumbnail state is tracked separately
/// since thumbnail unpack is independent of the full decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unopened,
    Opened,
    Unpacked,
}

/// A single-owner decoder instance wrapping one engine.
///
/// Not internally synchronized; `&mut self` on every mutating operation
/// serializes access per instance. Distinct instances are independent.
pub struct Processor<E: RawEngine = NativeEngine> {
    engine: E,
    state: State,
    thumb_unpacked: bool,
}

impl Processor<NativeEngine> {
    pub fn new() -> Self {
        Self::with_engine(NativeEngine::new())
    }
}

impl Default for Processor<NativeEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: RawEngine> Processor<E> {
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            state: State::Unopened,
            thumb_unpacked: false,
        }
    }

    /// Open a source file. The existence pre-check fails with a named
    /// fault before the engine is involved; once the engine is called,
    /// its status is returned unchanged and the instance counts as
    /// opened even for non-zero statuses.
    pub fn open_file(
        &mut self,
        path: impl AsRef<Path>,
        bigfile_size: Option<u64>,
    ) -> Result<i32, ProcessorError> {
        let path = path.as_ref();
        match std::fs::metadata(path) {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProcessorError::FileNotFound(path.to_path_buf()));
            }
            Err(e) => {
                return Err(ProcessorError::Io {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        }

        let status = self.engine.open_file(path, bigfile_size);
        self.state = State::Opened;
        self.thumb_unpacked = false;
        debug!(path = %path.display(), code = status.code(), "source opened from file");
        Ok(status.code())
    }

    /// Open a source from an in-memory buffer. A zero-length buffer is
    /// an engine-level condition, reported through the status code.
    pub fn open_buffer(&mut self, data: &[u8]) -> i32 {
        let status = self.engine.open_buffer(data);
        self.state = State::Opened;
        self.thumb_unpacked = false;
        debug!(bytes = data.len(), code = status.code(), "source opened from buffer");
        status.code()
    }

    /// Decode the full image data. Decode failures come back as status
    /// codes; only calling before open is a fault.
    pub fn unpack(&mut self) -> Result<i32, ProcessorError> {
        if self.state == State::Unopened {
            return Err(ProcessorError::NotOpened);
        }
        let status = self.engine.unpack();
        if status == Status::Success {
            self.state = State::Unpacked;
        }
        Ok(status.code())
    }

    /// Extract the embedded thumbnail; independent of [`Processor::unpack`].
    /// A source without a thumbnail yields the no-thumbnail status and
    /// leaves [`Processor::thumbnail`] returning an absent value.
    pub fn unpack_thumb(&mut self) -> Result<i32, ProcessorError> {
        if self.state == State::Unopened {
            return Err(ProcessorError::NotOpened);
        }
        let status = self.engine.unpack_thumb();
        if matches!(status, Status::Success | Status::NoThumbnail) {
            self.thumb_unpacked = true;
        }
        Ok(status.code())
    }

    /// Marshal the current metadata snapshot. Valid from open onward;
    /// fields only unpack fills stay at their defaults until then.
    pub fn metadata(&self) -> Result<Value, ProcessorError> {
        if self.state == State::Unopened {
            return Err(ProcessorError::NotOpened);
        }
        Ok(rawbridge_core::marshal(self.engine.snapshot()))
    }

    /// Thumbnail bytes. Absent (not a fault) when the source carries no
    /// thumbnail; a fault only when thumbnail unpack was never attempted.
    pub fn thumbnail(&self) -> Result<Option<Vec<u8>>, ProcessorError> {
        if !self.thumb_unpacked {
            return Err(ProcessorError::ThumbnailNotUnpacked);
        }
        Ok(self.engine.thumbnail_bytes().map(<[u8]>::to_vec))
    }

    /// XMP packet bytes, absent when the source carries none.
    pub fn xmp(&self) -> Result<Option<Vec<u8>>, ProcessorError> {
        if self.state == State::Unopened {
            return Err(ProcessorError::NotOpened);
        }
        Ok(self
            .engine
            .xmp_bytes()
            .filter(|b| !b.is_empty())
            .map(<[u8]>::to_vec))
    }

    /// Release buffers and return to a reusable unopened state. Safe to
    /// call repeatedly and before any open.
    pub fn recycle(&mut self) {
        self.engine.recycle();
        self.state = State::Unopened;
        self.thumb_unpacked = false;
    }

    pub fn error_count(&self) -> u32 {
        self.engine.error_count()
    }

    pub fn version(&self) -> &'static str {
        self.engine.version()
    }

    pub fn version_number(&self) -> u32 {
        self.engine.version_number()
    }

    pub fn camera_count(&self) -> usize {
        self.engine.camera_count()
    }

    pub fn camera_list(&self) -> &'static [&'static str] {
        self.engine.camera_list()
    }
}

impl<E: RawEngine> Drop for Processor<E> {
    fn drop(&mut self) {
        // Engine buffers are released on every teardown path.
        self.engine.recycle();
    }
}

fn default_true() -> bool {
    true
}

/// Flags for the one-shot [`process_raw_image`] entry point. Both
/// extractions default to on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProcessOptions {
    #[serde(default = "default_true")]
    pub extract_thumbnail: bool,
    #[serde(default = "default_true")]
    pub extract_metadata: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            extract_thumbnail: true,
            extract_metadata: true,
        }
    }
}

/// Result of a one-shot decode.
#[derive(Debug, Serialize)]
pub struct ProcessOutput {
    /// First non-zero engine status encountered, or zero.
    pub status: i32,
    pub thumbnail: Option<Vec<u8>>,
    pub metadata: Option<Value>,
}

/// Open, extract, and recycle in one call.
///
/// The open status gates everything; after a failed open the output
/// carries that status and nothing else. Metadata is marshaled from the
/// post-open snapshot without a sensor decode, so the metadata-only
/// path stays cheap. Thumbnail extraction downgrades its artifact to
/// absent and records its non-zero status.
pub fn process_raw_image(data: &[u8], options: &ProcessOptions) -> ProcessOutput {
    let mut processor = Processor::new();

    let open_code = processor.open_buffer(data);
    if open_code != 0 {
        return ProcessOutput {
            status: open_code,
            thumbnail: None,
            metadata: None,
        };
    }

    let metadata = if options.extract_metadata {
        processor.metadata().ok()
    } else {
        None
    };

    let mut status = 0;
    let mut thumbnail = None;
    if options.extract_thumbnail {
        if let Ok(code) = processor.unpack_thumb() {
            if code != 0 {
                status = code;
            }
        }
        thumbnail = processor.thumbnail().ok().flatten();
    }

    processor.recycle();
    ProcessOutput {
        status,
        thumbnail,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rawbridge_core::Snapshot;
    use std::io::Write;

    /// Scriptable engine for exercising the state machine without real
    /// RAW sources.
    struct MockEngine {
        open_status: Status,
        unpack_status: Status,
        thumb_status: Status,
        snapshot: Snapshot,
        thumb: Option<Vec<u8>>,
        xmp: Option<Vec<u8>>,
        recycle_calls: u32,
    }

    impl Default for MockEngine {
        fn default() -> Self {
            Self {
                open_status: Status::Success,
                unpack_status: Status::Success,
                thumb_status: Status::Success,
                snapshot: Snapshot::default(),
                thumb: None,
                xmp: None,
                recycle_calls: 0,
            }
        }
    }

    impl RawEngine for MockEngine {
        fn open_buffer(&mut self, _data: &[u8]) -> Status {
            self.open_status
        }

        fn unpack(&mut self) -> Status {
            self.unpack_status
        }

        fn unpack_thumb(&mut self) -> Status {
            self.thumb_status
        }

        fn recycle(&mut self) {
            self.recycle_calls += 1;
        }

        fn error_count(&self) -> u32 {
            0
        }

        fn version(&self) -> &'static str {
            "0.0.0-mock"
        }

        fn version_number(&self) -> u32 {
            0
        }

        fn camera_count(&self) -> usize {
            0
        }

        fn camera_list(&self) -> &'static [&'static str] {
            &[]
        }

        fn snapshot(&self) -> &Snapshot {
            &self.snapshot
        }

        fn thumbnail_bytes(&self) -> Option<&[u8]> {
            self.thumb.as_deref()
        }

        fn xmp_bytes(&self) -> Option<&[u8]> {
            self.xmp.as_deref()
        }
    }

    #[test]
    fn test_metadata_before_open_is_a_fault() {
        let processor = Processor::with_engine(MockEngine::default());
        assert!(matches!(
            processor.metadata(),
            Err(ProcessorError::NotOpened)
        ));
    }

    #[test]
    fn test_unpack_before_open_is_a_fault() {
        let mut processor = Processor::with_engine(MockEngine::default());
        assert!(matches!(processor.unpack(), Err(ProcessorError::NotOpened)));
        assert!(matches!(
            processor.unpack_thumb(),
            Err(ProcessorError::NotOpened)
        ));
    }

    #[test]
    fn test_metadata_available_right_after_open() {
        let mut engine = MockEngine::default();
        engine.snapshot.idata.make = "Nikon".into();
        let mut processor = Processor::with_engine(engine);

        assert_eq!(processor.open_buffer(&[1, 2, 3]), 0);
        let tree = processor.metadata().unwrap();
        assert_eq!(tree["idata"]["make"], "Nikon");
        // Geometry not yet unpacked: present and zero-valued.
        assert_eq!(tree["sizes"]["raw_width"], 0);
    }

    #[test]
    fn test_failed_open_status_is_surfaced_not_raised() {
        let mut engine = MockEngine::default();
        engine.open_status = Status::FileUnsupported;
        let mut processor = Processor::with_engine(engine);

        assert_eq!(processor.open_buffer(&[]), -2);
        // Still counts as opened; caller decides what to do next.
        assert!(processor.metadata().is_ok());
    }

    #[test]
    fn test_unpack_failure_is_a_status_code() {
        let mut engine = MockEngine::default();
        engine.unpack_status = Status::DataError;
        let mut processor = Processor::with_engine(engine);

        processor.open_buffer(&[1]);
        assert_eq!(processor.unpack().unwrap(), -100008);
        // The instance remains usable for recycle and reopen.
        processor.recycle();
        assert_eq!(processor.open_buffer(&[1]), 0);
    }

    #[test]
    fn test_thumbnail_before_unpack_thumb_is_a_fault() {
        let mut processor = Processor::with_engine(MockEngine::default());
        processor.open_buffer(&[1]);
        assert!(matches!(
            processor.thumbnail(),
            Err(ProcessorError::ThumbnailNotUnpacked)
        ));
    }

    #[test]
    fn test_missing_thumbnail_is_absent_not_fault() {
        let mut engine = MockEngine::default();
        engine.thumb_status = Status::NoThumbnail;
        let mut processor = Processor::with_engine(engine);

        processor.open_buffer(&[1]);
        assert_eq!(processor.unpack_thumb().unwrap(), -5);
        assert_eq!(processor.thumbnail().unwrap(), None);
    }

    #[test]
    fn test_present_thumbnail_round_trips() {
        let mut engine = MockEngine::default();
        engine.thumb = Some(vec![0xFF, 0xD8, 0xFF, 0xD9]);
        let mut processor = Processor::with_engine(engine);

        processor.open_buffer(&[1]);
        processor.unpack_thumb().unwrap();
        assert_eq!(
            processor.thumbnail().unwrap(),
            Some(vec![0xFF, 0xD8, 0xFF, 0xD9])
        );
    }

    #[test]
    fn test_xmp_absent_and_present() {
        let mut processor = Processor::with_engine(MockEngine::default());
        assert!(processor.xmp().is_err());
        processor.open_buffer(&[1]);
        assert_eq!(processor.xmp().unwrap(), None);

        let mut engine = MockEngine::default();
        engine.xmp = Some(b"<x:xmpmeta/>".to_vec());
        let mut processor = Processor::with_engine(engine);
        processor.open_buffer(&[1]);
        assert_eq!(processor.xmp().unwrap(), Some(b"<x:xmpmeta/>".to_vec()));
    }

    #[test]
    fn test_recycle_twice_is_safe_and_resets() {
        let mut processor = Processor::with_engine(MockEngine::default());
        processor.recycle();
        processor.recycle();
        assert!(matches!(
            processor.metadata(),
            Err(ProcessorError::NotOpened)
        ));
    }

    #[test]
    fn test_open_file_missing_path_is_a_named_fault() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.arw");

        let mut processor = Processor::with_engine(MockEngine::default());
        match processor.open_file(&missing, None) {
            Err(ProcessorError::FileNotFound(path)) => assert_eq!(path, missing),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
        // Failed pre-check leaves the instance unopened.
        assert!(matches!(
            processor.metadata(),
            Err(ProcessorError::NotOpened)
        ));
    }

    #[test]
    fn test_open_file_existing_path_reaches_engine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.arw");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0x49, 0x49, 0x2A, 0x00]).unwrap();

        let mut processor = Processor::with_engine(MockEngine::default());
        assert_eq!(processor.open_file(&path, Some(1 << 20)).unwrap(), 0);
        assert!(processor.metadata().is_ok());
    }

    #[test]
    fn test_process_options_deserialize_defaults() {
        let opts: ProcessOptions = serde_json::from_str("{}").unwrap();
        assert!(opts.extract_thumbnail);
        assert!(opts.extract_metadata);

        let opts: ProcessOptions =
            serde_json::from_str(r#"{"extract_thumbnail": false}"#).unwrap();
        assert!(!opts.extract_thumbnail);
        assert!(opts.extract_metadata);
    }

    #[test]
    fn test_process_raw_image_garbage_reports_status_only() {
        let out = process_raw_image(&[0x00, 0x01, 0x02], &ProcessOptions::default());
        assert_ne!(out.status, 0);
        assert!(out.thumbnail.is_none());
        assert!(out.metadata.is_none());
    }

    #[test]
    fn test_process_raw_image_empty_buffer() {
        let out = process_raw_image(&[], &ProcessOptions::default());
        assert_eq!(out.status, Status::IoError.code());
        assert!(out.metadata.is_none());
    }

    #[test]
    fn test_process_raw_image_metadata_only_flag() {
        // Minimal valid TIFF container: this source would fail a sensor
        // decode, so the metadata path must marshal the post-open
        // snapshot directly, without paying for (or being tainted by)
        // an unpack.
        let mut data = vec![0x49, 0x49, 0x2A, 0x00];
        data.extend_from_slice(&8u32.to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());

        let opts = ProcessOptions {
            extract_thumbnail: false,
            extract_metadata: true,
        };
        let out = process_raw_image(&data, &opts);
        assert_eq!(out.status, 0);
        assert!(out.thumbnail.is_none());
        let tree = out.metadata.expect("metadata requested");
        assert!(tree["idata"].is_object());
        assert!(tree["makernotes"]["canon"].is_object());
    }
}
