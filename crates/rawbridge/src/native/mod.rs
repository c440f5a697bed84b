//! The built-in decoding engine.
//!
//! Open-time work recovers EXIF metadata and scans the TIFF container
//! for the XMP packet and preview location; unpack decodes the sensor
//! data and completes the geometry and color records; thumbnail unpack
//! publishes the preview found at open time. Each engine instance owns
//! one source at a time and is reset by recycle.

mod exif;
mod preview;

use std::io::Cursor;

use tracing::{debug, warn};

use rawbridge_core::Snapshot;

use crate::engine::{make_version, RawEngine, Status};
use preview::{is_tiff_container, scan_container, ContainerScan};

// dcraw-style CFA filter descriptors keyed by pattern.
const FILTERS_RGGB: u32 = 0x9494_9494;
const FILTERS_BGGR: u32 = 0x1616_1616;
const FILTERS_GRBG: u32 = 0x6161_6161;
const FILTERS_GBRG: u32 = 0x4949_4949;

const THUMB_FORMAT_JPEG: i32 = 1;

/// Container formats the engine accepts.
static SUPPORTED_FORMATS: &[&str] = &[
    "Adobe DNG",
    "Canon CR2",
    "Canon CRW",
    "Epson ERF",
    "Fujifilm RAF",
    "Hasselblad 3FR",
    "Kodak DCR",
    "Kodak KDC",
    "Leaf MOS",
    "Mamiya MEF",
    "Minolta MRW",
    "Nikon NEF",
    "Nikon NRW",
    "Olympus ORF",
    "Panasonic RW2",
    "Pentax PEF",
    "Phase One IIQ",
    "Samsung SRW",
    "Sony ARW",
];

/// The default [`RawEngine`] implementation.
#[derive(Default)]
pub struct NativeEngine {
    source: Option<Vec<u8>>,
    snapshot: Snapshot,
    pending_preview: Option<Vec<u8>>,
    thumb: Option<Vec<u8>>,
    xmp: Option<Vec<u8>>,
    errors: u32,
    unpacked: bool,
}

impl NativeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn load_container(&mut self, data: &[u8]) {
        match scan_container(data) {
            Ok(ContainerScan { preview, xmp }) => {
                self.pending_preview = preview;
                if let Some(xmp) = xmp {
                    self.snapshot.idata.xmp_len = xmp.len();
                    self.xmp = Some(xmp);
                }
            }
            Err(err) => {
                warn!(%err, "container scan failed");
                self.errors += 1;
            }
        }
    }
}

impl RawEngine for NativeEngine {
    fn open_buffer(&mut self, data: &[u8]) -> Status {
        self.recycle();

        if data.is_empty() {
            return Status::IoError;
        }

        let exif_ok = match exif::populate_snapshot(data, &mut self.snapshot) {
            Ok(()) => true,
            Err(err) => {
                debug!(%err, "no readable EXIF block");
                self.errors += 1;
                false
            }
        };

        let tiff = is_tiff_container(data);
        if tiff {
            self.load_container(data);
        }

        self.source = Some(data.to_vec());
        if tiff || exif_ok {
            Status::Success
        } else {
            Status::FileUnsupported
        }
    }

    fn unpack(&mut self) -> Status {
        let Some(source) = self.source.as_deref() else {
            return Status::OutOfOrderCall;
        };
        if self.unpacked {
            return Status::Success;
        }

        let raw = match rawloader::decode(&mut Cursor::new(source)) {
            Ok(raw) => raw,
            Err(err) => {
                debug!(%err, "sensor decode failed");
                self.errors += 1;
                return Status::FileUnsupported;
            }
        };

        let snap = &mut self.snapshot;
        if snap.idata.make.is_empty() {
            snap.idata.make = raw.make.clone();
        }
        if snap.idata.model.is_empty() {
            snap.idata.model = raw.model.clone();
        }
        snap.idata.normalized_make = raw.clean_make.clone();
        snap.idata.normalized_model = raw.clean_model.clone();
        snap.idata.raw_count = 1;
        snap.idata.colors = 3;
        snap.idata.cdesc = "RGBG".to_string();
        snap.idata.filters = cfa_filters(&raw.cfa.name);

        // crops are top, right, bottom, left.
        let [top, right, bottom, left] = raw.crops;
        snap.sizes.raw_width = clamp_dim(raw.width);
        snap.sizes.raw_height = clamp_dim(raw.height);
        snap.sizes.width = cropped_dim(raw.width, left, right);
        snap.sizes.height = cropped_dim(raw.height, top, bottom);
        snap.sizes.top_margin = clamp_dim(top);
        snap.sizes.left_margin = clamp_dim(left);
        snap.sizes.iwidth = snap.sizes.width;
        snap.sizes.iheight = snap.sizes.height;
        snap.sizes.raw_pitch = u32::from(snap.sizes.raw_width) * 2;
        snap.sizes.pixel_aspect = 1.0;

        snap.color.cam_mul = raw.wb_coeffs;
        snap.color.cam_xyz = raw.xyz_to_cam;
        snap.color.maximum = raw.whitelevels.iter().copied().max().unwrap_or(0).into();
        for (dst, src) in snap.color.cblack.iter_mut().zip(raw.blacklevels) {
            *dst = u32::from(src);
        }
        snap.color.black = raw.blacklevels.iter().copied().min().unwrap_or(0).into();

        snap.rawdata.iparams = snap.idata.clone();
        snap.rawdata.sizes = snap.sizes.clone();
        snap.rawdata.color = snap.color.clone();

        debug!(
            width = snap.sizes.raw_width,
            height = snap.sizes.raw_height,
            make = %snap.idata.normalized_make,
            "sensor data unpacked"
        );
        self.unpacked = true;
        Status::Success
    }

    fn unpack_thumb(&mut self) -> Status {
        if self.source.is_none() {
            return Status::OutOfOrderCall;
        }
        if self.thumb.is_some() {
            return Status::Success;
        }
        let Some(jpeg) = self.pending_preview.take() else {
            return Status::NoThumbnail;
        };

        let thumb = &mut self.snapshot.thumbnail;
        thumb.tformat = THUMB_FORMAT_JPEG;
        thumb.tlength = jpeg.len() as u32;
        thumb.tcolors = 3;
        if let Some((w, h)) = jpeg_dimensions(&jpeg) {
            thumb.twidth = w as u16;
            thumb.theight = h as u16;
        }

        debug!(
            width = thumb.twidth,
            height = thumb.theight,
            bytes = thumb.tlength,
            "thumbnail unpacked"
        );
        self.thumb = Some(jpeg);
        Status::Success
    }

    fn recycle(&mut self) {
        self.source = None;
        self.snapshot = Snapshot::default();
        self.pending_preview = None;
        self.thumb = None;
        self.xmp = None;
        self.errors = 0;
        self.unpacked = false;
    }

    fn error_count(&self) -> u32 {
        self.errors
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn version_number(&self) -> u32 {
        let parse = |s: &str| s.parse::<u32>().unwrap_or(0);
        make_version(
            parse(env!("CARGO_PKG_VERSION_MAJOR")),
            parse(env!("CARGO_PKG_VERSION_MINOR")),
            parse(env!("CARGO_PKG_VERSION_PATCH")),
        )
    }

    fn camera_count(&self) -> usize {
        SUPPORTED_FORMATS.len()
    }

    fn camera_list(&self) -> &'static [&'static str] {
        SUPPORTED_FORMATS
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

/// Narrow a sensor dimension into its snapshot field. Clamps so a
/// corrupt-but-decodable source cannot wrap the narrow type.
fn clamp_dim(v: usize) -> u16 {
    v.min(usize::from(u16::MAX)) as u16
}

/// Active dimension after removing both crop borders. Computed wide so
/// hostile crop values saturate instead of overflowing.
fn cropped_dim(full: usize, near: usize, far: usize) -> u16 {
    clamp_dim(full.saturating_sub(near.saturating_add(far)))
}

fn cfa_filters(pattern: &str) -> u32 {
    match pattern {
        "RGGB" => FILTERS_RGGB,
        "BGGR" => FILTERS_BGGR,
        "GRBG" => FILTERS_GRBG,
        "GBRG" => FILTERS_GBRG,
        _ => 0,
    }
}

/// Read JPEG dimensions from the header without a full decode.
fn jpeg_dimensions(jpeg: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(jpeg))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_empty_buffer_is_io_error() {
        let mut engine = NativeEngine::new();
        assert_eq!(engine.open_buffer(&[]), Status::IoError);
        assert_eq!(engine.error_count(), 0);
    }

    #[test]
    fn test_open_garbage_is_unsupported_but_opened() {
        let mut engine = NativeEngine::new();
        let status = engine.open_buffer(&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05]);
        assert_eq!(status, Status::FileUnsupported);
        // The instance is opened; unpack is allowed to try and fail.
        assert_ne!(engine.unpack(), Status::OutOfOrderCall);
    }

    #[test]
    fn test_unpack_before_open_is_out_of_order() {
        let mut engine = NativeEngine::new();
        assert_eq!(engine.unpack(), Status::OutOfOrderCall);
        assert_eq!(engine.unpack_thumb(), Status::OutOfOrderCall);
    }

    #[test]
    fn test_recycle_resets_state() {
        let mut engine = NativeEngine::new();
        engine.open_buffer(&[0x00, 0x01, 0x02, 0x03]);
        engine.recycle();
        assert_eq!(engine.error_count(), 0);
        assert_eq!(engine.snapshot(), &Snapshot::default());
        assert_eq!(engine.unpack(), Status::OutOfOrderCall);
    }

    #[test]
    fn test_recycle_twice_is_safe() {
        let mut engine = NativeEngine::new();
        engine.recycle();
        engine.recycle();
        assert!(engine.thumbnail_bytes().is_none());
        assert!(engine.xmp_bytes().is_none());
    }

    #[test]
    fn test_tiff_without_preview_reports_no_thumbnail() {
        // Minimal valid TIFF: header + empty IFD.
        let mut data = vec![0x49, 0x49, 0x2A, 0x00];
        data.extend_from_slice(&8u32.to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());

        let mut engine = NativeEngine::new();
        assert_eq!(engine.open_buffer(&data), Status::Success);
        assert_eq!(engine.unpack_thumb(), Status::NoThumbnail);
        assert!(engine.thumbnail_bytes().is_none());
    }

    #[test]
    fn test_cfa_filter_codes() {
        assert_eq!(cfa_filters("RGGB"), 0x9494_9494);
        assert_eq!(cfa_filters("BGGR"), 0x1616_1616);
        assert_eq!(cfa_filters("GRBG"), 0x6161_6161);
        assert_eq!(cfa_filters("GBRG"), 0x4949_4949);
        assert_eq!(cfa_filters("XTRANS"), 0);
    }

    #[test]
    fn test_crop_geometry_saturates_on_hostile_values() {
        assert_eq!(cropped_dim(6000, 8, 8), 5984);
        assert_eq!(cropped_dim(6000, 40_000, 40_000), 0);
        assert_eq!(cropped_dim(6000, usize::MAX, 1), 0);
        assert_eq!(cropped_dim(usize::MAX, 0, 0), u16::MAX);
        assert_eq!(clamp_dim(70_000), u16::MAX);
        assert_eq!(clamp_dim(5984), 5984);
    }

    #[test]
    fn test_version_queries_work_unopened() {
        let engine = NativeEngine::new();
        assert!(!engine.version().is_empty());
        assert_eq!(engine.camera_count(), engine.camera_list().len());
        assert!(engine.camera_count() > 0);
    }
}
