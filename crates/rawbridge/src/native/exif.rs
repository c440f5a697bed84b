//! Open-time metadata recovery from the EXIF block.
//!
//! Most identification, exposure and GPS fields are available straight
//! from the EXIF directory without touching sensor data, which is what
//! lets `get_metadata` work right after open.

use std::io::{BufReader, Cursor};

use exif::{Field, In, Reader, Tag, Value};
use tracing::debug;

use rawbridge_core::Snapshot;

/// Fill the snapshot's EXIF-derived fields from the source bytes.
///
/// Fields the source does not carry are left at their defaults; only a
/// structurally unreadable EXIF block is an error.
pub fn populate_snapshot(data: &[u8], snap: &mut Snapshot) -> Result<(), exif::Error> {
    let mut reader = BufReader::new(Cursor::new(data));
    let exif = Reader::new().read_from_container(&mut reader)?;

    if let Some(s) = string_field(&exif, Tag::Make) {
        snap.idata.normalized_make = s.trim().to_string();
        snap.idata.make = s;
    }
    if let Some(s) = string_field(&exif, Tag::Model) {
        snap.idata.normalized_model = s.trim().to_string();
        snap.idata.model = s;
    }
    if let Some(s) = string_field(&exif, Tag::Software) {
        snap.idata.software = s;
    }

    if let Some(s) = string_field(&exif, Tag::Artist) {
        snap.other.artist = s;
    }
    if let Some(s) = string_field(&exif, Tag::ImageDescription) {
        snap.other.desc = s;
    }
    if let Some(v) = uint_field(&exif, Tag::PhotographicSensitivity) {
        snap.other.iso_speed = v as f32;
    }
    if let Some(v) = float_field(&exif, Tag::ExposureTime) {
        snap.other.shutter = v;
    }
    if let Some(v) = float_field(&exif, Tag::FNumber) {
        snap.other.aperture = v;
    }
    if let Some(v) = float_field(&exif, Tag::FocalLength) {
        snap.other.focal_len = v;
    }
    if let Some(ts) = timestamp_field(&exif) {
        snap.other.timestamp = ts;
    }

    if let Some(s) = string_field(&exif, Tag::LensMake) {
        snap.lens.lens_make = s;
    }
    if let Some(s) = string_field(&exif, Tag::LensModel) {
        snap.lens.lens = s;
    }
    if let Some(s) = string_field(&exif, Tag::LensSerialNumber) {
        snap.lens.lens_serial = s;
    }
    if let Some(v) = float_field(&exif, Tag::MaxApertureValue) {
        // MaxApertureValue is APEX; convert to an f-number.
        snap.lens.exif_max_ap = apex_to_aperture(v);
    }
    if let Some(v) = uint_field(&exif, Tag::FocalLengthIn35mmFilm) {
        snap.lens.focal_length_in_35mm_format = v as u16;
    }

    if let Some(v) = uint_field(&exif, Tag::MeteringMode) {
        snap.shootinginfo.metering_mode = v as i16;
    }
    if let Some(v) = uint_field(&exif, Tag::ExposureProgram) {
        snap.shootinginfo.exposure_program = v as i16;
    }
    if let Some(s) = string_field(&exif, Tag::BodySerialNumber) {
        snap.shootinginfo.body_serial = s;
    }

    if let Some(v) = uint_field(&exif, Tag::Orientation) {
        snap.sizes.flip = orientation_to_flip(v);
    }

    populate_gps(&exif, snap);

    debug!(
        make = %snap.idata.make,
        model = %snap.idata.model,
        "EXIF block parsed"
    );
    Ok(())
}

fn populate_gps(exif: &exif::Exif, snap: &mut Snapshot) {
    let gps = &mut snap.other.parsed_gps;
    let mut parsed = false;

    if let Some(t) = triple_field(exif, Tag::GPSLatitude) {
        gps.latitude = t;
        parsed = true;
    }
    if let Some(t) = triple_field(exif, Tag::GPSLongitude) {
        gps.longitude = t;
        parsed = true;
    }
    if let Some(t) = triple_field(exif, Tag::GPSTimeStamp) {
        gps.gps_time_stamp = t;
        parsed = true;
    }
    if let Some(v) = float_field(exif, Tag::GPSAltitude) {
        gps.altitude = v;
        parsed = true;
    }
    if let Some(v) = uint_field(exif, Tag::GPSAltitudeRef) {
        gps.altref = v as u8;
    }
    if let Some(c) = char_field(exif, Tag::GPSLatitudeRef) {
        gps.latref = c;
    }
    if let Some(c) = char_field(exif, Tag::GPSLongitudeRef) {
        gps.longref = c;
    }
    if let Some(c) = char_field(exif, Tag::GPSStatus) {
        gps.gps_status = c;
    }

    if parsed {
        gps.gps_parsed = 1;
    }
}

fn field<'a>(exif: &'a exif::Exif, tag: Tag) -> Option<&'a Field> {
    exif.get_field(tag, In::PRIMARY)
}

fn string_field(exif: &exif::Exif, tag: Tag) -> Option<String> {
    let f = field(exif, tag)?;
    let s = f.display_value().to_string().trim_matches('"').to_string();
    (!s.is_empty()).then_some(s)
}

fn uint_field(exif: &exif::Exif, tag: Tag) -> Option<u32> {
    field(exif, tag)?.value.get_uint(0)
}

fn float_value(value: &Value, index: usize) -> Option<f32> {
    match value {
        Value::Rational(v) => v.get(index).map(|r| r.to_f64() as f32),
        Value::SRational(v) => v.get(index).map(|r| r.to_f64() as f32),
        Value::Float(v) => v.get(index).copied(),
        Value::Double(v) => v.get(index).map(|&d| d as f32),
        other => other.get_uint(index).map(|u| u as f32),
    }
}

fn float_field(exif: &exif::Exif, tag: Tag) -> Option<f32> {
    float_value(&field(exif, tag)?.value, 0)
}

/// GPS degree/minute/second style triples.
fn triple_field(exif: &exif::Exif, tag: Tag) -> Option<[f32; 3]> {
    let value = &field(exif, tag)?.value;
    Some([
        float_value(value, 0)?,
        float_value(value, 1)?,
        float_value(value, 2)?,
    ])
}

/// Single-character ASCII fields (GPS reference letters).
fn char_field(exif: &exif::Exif, tag: Tag) -> Option<u8> {
    match &field(exif, tag)?.value {
        Value::Ascii(v) => v.first().and_then(|s| s.first()).copied(),
        _ => None,
    }
}

fn timestamp_field(exif: &exif::Exif) -> Option<i64> {
    let f = field(exif, Tag::DateTimeOriginal).or_else(|| field(exif, Tag::DateTime))?;
    match &f.value {
        Value::Ascii(v) => {
            let dt = exif::DateTime::from_ascii(v.first()?).ok()?;
            Some(datetime_to_unix(&dt))
        }
        _ => None,
    }
}

/// APEX aperture value to f-number.
fn apex_to_aperture(apex: f32) -> f32 {
    2.0_f32.powf(apex / 2.0)
}

/// EXIF orientation to the dcraw-style flip code used in the geometry
/// record: 3 = 180, 5 = 90 CCW, 6 = 90 CW, 0 = none.
fn orientation_to_flip(orientation: u32) -> i32 {
    match orientation {
        3 => 3,
        6 => 6,
        8 => 5,
        _ => 0,
    }
}

/// Days-from-civil conversion; EXIF timestamps are treated as UTC since
/// the directory carries no zone.
fn datetime_to_unix(dt: &exif::DateTime) -> i64 {
    let days = days_from_civil(i64::from(dt.year), i64::from(dt.month), i64::from(dt.day));
    days * 86_400 + i64::from(dt.hour) * 3_600 + i64::from(dt.minute) * 60 + i64::from(dt.second)
}

fn days_from_civil(y: i64, m: i64, d: i64) -> i64 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}
