//! The metadata snapshot: an owned copy of the decoding engine's internal
//! state at a point in time.
//!
//! The schema is a composition of named record types mirroring the engine's
//! fixed layout. Every record is `Default`-constructible with zero values so
//! that unpopulated blocks (foreign-manufacturer makernotes, missing GPS)
//! still carry their full shape. The marshaler in [`crate::marshal`] is the
//! only serializer for these types.

mod color;
mod lens;
mod makernotes;
mod params;

pub use color::{ColorData, DngColor, DngLevels, P1Color, PhaseOneData};
pub use lens::{DngLens, LensInfo, MakernoteLens, NikonLens};
pub use makernotes::{
    CanonMakernotes, CommonMetadata, FujiMakernotes, HasselbladMakernotes, KodakMakernotes,
    Makernotes, NikonMakernotes, OlympusMakernotes, PanasonicMakernotes, PentaxMakernotes,
    PhaseOneMakernotes, SamsungMakernotes, SonyMakernotes,
};
pub use params::{InternalOutputParams, OutputParams};

/// Camera and file identification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Identification {
    pub make: String,
    pub model: String,
    pub software: String,
    /// Vendor name normalized across alias spellings (e.g. "KonicaMinolta").
    pub normalized_make: String,
    pub normalized_model: String,
    pub maker_index: u32,
    /// Number of RAW images in the file (multi-shot formats).
    pub raw_count: u32,
    /// DNG version tag, zero for non-DNG sources.
    pub dng_version: u32,
    pub is_foveon: u32,
    /// Number of sensor colors.
    pub colors: i32,
    /// Bit mask describing the color filter array layout.
    pub filters: u32,
    /// Color filter descriptor string, e.g. "RGBG".
    pub cdesc: String,
    /// Length in bytes of the XMP packet held by the engine.
    pub xmp_len: usize,
}

/// Inset crop rectangle recommended by the vendor metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InsetCrop {
    pub cleft: u16,
    pub ctop: u16,
    pub cwidth: u16,
    pub cheight: u16,
}

/// Frame geometry: sensor dimensions, margins, and orientation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSizes {
    pub raw_height: u16,
    pub raw_width: u16,
    pub height: u16,
    pub width: u16,
    pub top_margin: u16,
    pub left_margin: u16,
    /// Output dimensions after user flip/shrink settings.
    pub iheight: u16,
    pub iwidth: u16,
    pub raw_pitch: u32,
    pub pixel_aspect: f64,
    /// Orientation code: 0, 3, 5 or 6, dcraw convention.
    pub flip: i32,
    /// Per-quadrant masked (optically black) rectangles.
    pub mask: [[i32; 4]; 8],
    pub raw_inset_crop: InsetCrop,
}

/// Capture settings shared across manufacturers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShootingInfo {
    pub drive_mode: i16,
    pub focus_mode: i16,
    pub metering_mode: i16,
    pub af_point: i16,
    pub exposure_mode: i16,
    pub exposure_program: i16,
    pub image_stabilization: i16,
    pub body_serial: String,
    pub internal_body_serial: String,
}

/// Parsed GPS block. Latitude, longitude and timestamp are
/// degree/minute/second component triples as stored in the source tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpsInfo {
    pub latitude: [f32; 3],
    pub longitude: [f32; 3],
    pub gps_time_stamp: [f32; 3],
    pub altitude: f32,
    /// Altitude reference: 0 above, 1 below sea level.
    pub altref: u8,
    /// Hemisphere code, ASCII 'N'/'S'.
    pub latref: u8,
    /// Hemisphere code, ASCII 'E'/'W'.
    pub longref: u8,
    pub gps_status: u8,
    /// Nonzero once any GPS tag was successfully parsed.
    pub gps_parsed: u8,
}

/// Exposure data and free-form description tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageOther {
    pub iso_speed: f32,
    /// Shutter time in seconds.
    pub shutter: f32,
    pub aperture: f32,
    pub focal_len: f32,
    /// Capture time as Unix seconds.
    pub timestamp: i64,
    pub shot_order: u32,
    /// Raw GPS tag words as read from the file, unparsed.
    pub gpsdata: [u32; 32],
    pub parsed_gps: GpsInfo,
    pub desc: String,
    pub artist: String,
}

/// Thumbnail descriptor. The byte buffer itself stays with the engine and
/// is fetched separately.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThumbnailInfo {
    /// Container format code; 1 = JPEG.
    pub tformat: i32,
    pub twidth: u16,
    pub theight: u16,
    pub tlength: u32,
    pub tcolors: i32,
}

/// Pre-debayer view of the decoded data: identification, geometry and
/// color state scoped to the raw stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawData {
    pub iparams: Identification,
    pub sizes: ImageSizes,
    pub ioparams: InternalOutputParams,
    pub color: ColorData,
}

/// The full metadata snapshot, read-only input to the marshaler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub idata: Identification,
    pub sizes: ImageSizes,
    pub lens: LensInfo,
    pub makernotes: Makernotes,
    pub shootinginfo: ShootingInfo,
    pub params: OutputParams,
    /// Bitmask of completed pipeline stages.
    pub progress_flags: u32,
    /// Bitmask of non-fatal warnings raised during decode.
    pub process_warnings: u32,
    pub color: ColorData,
    pub other: ImageOther,
    pub thumbnail: ThumbnailInfo,
    pub rawdata: RawData,
}
