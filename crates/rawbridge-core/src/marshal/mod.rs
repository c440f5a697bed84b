//! The metadata marshaler: pure transformations from the snapshot records
//! to a generic `serde_json::Value` tree.
//!
//! Design rules applied throughout:
//! - every documented field is emitted even when zero/empty, so the output
//!   schema is identical for every source image;
//! - floating-point fields go through the shortest-decimal rule in
//!   [`crate::convert`];
//! - variable-length buffers go through the byte-sequence rule (`Null`
//!   when empty, exact length otherwise).

mod color;
mod lens;
mod makernotes;
mod params;

pub use color::color_data;
pub use lens::lens_info;
pub use makernotes::makernotes;
pub use params::{internal_output_params, output_params};

use serde_json::{json, Value};

use crate::convert::{f32_number, f32_seq, f64_number, int_grid, int_seq};
use crate::snapshot::{
    GpsInfo, Identification, ImageOther, ImageSizes, RawData, ShootingInfo, Snapshot,
    ThumbnailInfo,
};

/// Marshal a full snapshot into the aggregate value tree.
///
/// This is the sole externally invoked entry point; it delegates to the
/// per-substructure wrappers and assigns the sub-record keys.
pub fn marshal(snap: &Snapshot) -> Value {
    json!({
        "idata": identification(&snap.idata),
        "sizes": image_sizes(&snap.sizes),
        "lens": lens_info(&snap.lens),
        "makernotes": makernotes(&snap.makernotes),
        "shootinginfo": shooting_info(&snap.shootinginfo),
        "params": output_params(&snap.params),
        "progress_flags": snap.progress_flags,
        "process_warnings": snap.process_warnings,
        "color": color_data(&snap.color),
        "other": image_other(&snap.other),
        "thumbnail": thumbnail_info(&snap.thumbnail),
        "rawdata": raw_data(&snap.rawdata),
    })
}

/// Marshal the identification sub-record.
pub fn identification(id: &Identification) -> Value {
    json!({
        "make": &id.make,
        "model": &id.model,
        "software": &id.software,
        "normalized_make": &id.normalized_make,
        "normalized_model": &id.normalized_model,
        "maker_index": id.maker_index,
        "raw_count": id.raw_count,
        "dng_version": id.dng_version,
        "is_foveon": id.is_foveon,
        "colors": id.colors,
        "filters": id.filters,
        "cdesc": &id.cdesc,
        "xmplen": id.xmp_len,
    })
}

/// Marshal the geometry sub-record.
pub fn image_sizes(sizes: &ImageSizes) -> Value {
    json!({
        "raw_height": sizes.raw_height,
        "raw_width": sizes.raw_width,
        "height": sizes.height,
        "width": sizes.width,
        "top_margin": sizes.top_margin,
        "left_margin": sizes.left_margin,
        "iheight": sizes.iheight,
        "iwidth": sizes.iwidth,
        "raw_pitch": sizes.raw_pitch,
        "pixel_aspect": f64_number(sizes.pixel_aspect),
        "flip": sizes.flip,
        "mask": int_grid(&sizes.mask),
        "raw_inset_crop": {
            "cleft": sizes.raw_inset_crop.cleft,
            "ctop": sizes.raw_inset_crop.ctop,
            "cwidth": sizes.raw_inset_crop.cwidth,
            "cheight": sizes.raw_inset_crop.cheight,
        },
    })
}

/// Marshal the shooting info sub-record.
pub fn shooting_info(info: &ShootingInfo) -> Value {
    json!({
        "DriveMode": info.drive_mode,
        "FocusMode": info.focus_mode,
        "MeteringMode": info.metering_mode,
        "AFPoint": info.af_point,
        "ExposureMode": info.exposure_mode,
        "ExposureProgram": info.exposure_program,
        "ImageStabilization": info.image_stabilization,
        "BodySerial": &info.body_serial,
        "InternalBodySerial": &info.internal_body_serial,
    })
}

/// Marshal the parsed GPS sub-record.
pub fn gps_info(gps: &GpsInfo) -> Value {
    json!({
        "latitude": f32_seq(&gps.latitude),
        "longitude": f32_seq(&gps.longitude),
        "gpstimestamp": f32_seq(&gps.gps_time_stamp),
        "altitude": f32_number(gps.altitude),
        "altref": gps.altref,
        "latref": gps.latref,
        "longref": gps.longref,
        "gpsstatus": gps.gps_status,
        "gpsparsed": gps.gps_parsed,
    })
}

/// Marshal the exposure/description sub-record.
pub fn image_other(other: &ImageOther) -> Value {
    json!({
        "iso_speed": f32_number(other.iso_speed),
        "shutter": f32_number(other.shutter),
        "aperture": f32_number(other.aperture),
        "focal_len": f32_number(other.focal_len),
        "timestamp": other.timestamp,
        "shot_order": other.shot_order,
        "gpsdata": int_seq(&other.gpsdata),
        "parsed_gps": gps_info(&other.parsed_gps),
        "desc": &other.desc,
        "artist": &other.artist,
    })
}

/// Marshal the thumbnail descriptor (the byte buffer travels separately).
pub fn thumbnail_info(thumb: &ThumbnailInfo) -> Value {
    json!({
        "tformat": thumb.tformat,
        "twidth": thumb.twidth,
        "theight": thumb.theight,
        "tlength": thumb.tlength,
        "tcolors": thumb.tcolors,
    })
}

/// Marshal the raw-stage (pre-debayer) data block.
pub fn raw_data(raw: &RawData) -> Value {
    json!({
        "iparams": identification(&raw.iparams),
        "sizes": image_sizes(&raw.sizes),
        "ioparams": internal_output_params(&raw.ioparams),
        "color": color_data(&raw.color),
    })
}
