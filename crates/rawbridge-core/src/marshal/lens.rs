//! Lens record wrappers. Field keys follow the engine's CamelCase naming
//! for lens data, unlike the snake_case geometry and color records.

use serde_json::{json, Value};

use crate::convert::f32_number;
use crate::snapshot::{DngLens, LensInfo, MakernoteLens, NikonLens};

/// Marshal the DNG-derived lens ranges.
pub fn dng_lens(t: &DngLens) -> Value {
    json!({
        "MinFocal": f32_number(t.min_focal),
        "MaxFocal": f32_number(t.max_focal),
        "MaxAp4MinFocal": f32_number(t.max_ap4_min_focal),
        "MaxAp4MaxFocal": f32_number(t.max_ap4_max_focal),
    })
}

/// Marshal the generic makernote-derived lens block.
pub fn makernote_lens(t: &MakernoteLens) -> Value {
    json!({
        "LensID": t.lens_id,
        "Lens": &t.lens,
        "LensFormat": t.lens_format,
        "LensMount": t.lens_mount,
        "CamID": t.cam_id,
        "CameraFormat": t.camera_format,
        "CameraMount": t.camera_mount,
        "body": &t.body,
        "FocalType": t.focal_type,
        "LensFeatures_pre": &t.lens_features_pre,
        "LensFeatures_suf": &t.lens_features_suf,
        "MinFocal": f32_number(t.min_focal),
        "MaxFocal": f32_number(t.max_focal),
        "MaxAp4MinFocal": f32_number(t.max_ap4_min_focal),
        "MaxAp4MaxFocal": f32_number(t.max_ap4_max_focal),
        "MinAp4MinFocal": f32_number(t.min_ap4_min_focal),
        "MinAp4MaxFocal": f32_number(t.min_ap4_max_focal),
        "MaxAp": f32_number(t.max_ap),
        "MinAp": f32_number(t.min_ap),
        "CurFocal": f32_number(t.cur_focal),
        "CurAp": f32_number(t.cur_ap),
        "MaxAp4CurFocal": f32_number(t.max_ap4_cur_focal),
        "MinAp4CurFocal": f32_number(t.min_ap4_cur_focal),
        "MinFocusDistance": f32_number(t.min_focus_distance),
        "FocusRangeIndex": f32_number(t.focus_range_index),
        "LensFStops": f32_number(t.lens_f_stops),
        "TeleconverterID": t.teleconverter_id,
        "Teleconverter": &t.teleconverter,
        "AdapterID": t.adapter_id,
        "Adapter": &t.adapter,
        "AttachmentID": t.attachment_id,
        "Attachment": &t.attachment,
        "FocalLengthIn35mmFormat": t.focal_length_in_35mm_format,
    })
}

/// Marshal the Nikon-specific lens sub-block.
pub fn nikon_lens(t: &NikonLens) -> Value {
    json!({
        "EffectiveMaxAp": f32_number(t.effective_max_ap),
        "LensIDNumber": t.lens_id_number,
        "LensFStops": t.lens_f_stops,
        "MCUVersion": t.mcu_version,
        "LensType": t.lens_type,
    })
}

/// Marshal the aggregate lens record with its nested sub-blocks.
pub fn lens_info(t: &LensInfo) -> Value {
    json!({
        "MinFocal": f32_number(t.min_focal),
        "MaxFocal": f32_number(t.max_focal),
        "MaxAp4MinFocal": f32_number(t.max_ap4_min_focal),
        "MaxAp4MaxFocal": f32_number(t.max_ap4_max_focal),
        "EXIF_MaxAp": f32_number(t.exif_max_ap),
        "LensMake": &t.lens_make,
        "Lens": &t.lens,
        "LensSerial": &t.lens_serial,
        "InternalLensSerial": &t.internal_lens_serial,
        "FocalLengthIn35mmFormat": t.focal_length_in_35mm_format,
        "nikon": nikon_lens(&t.nikon),
        "dng": dng_lens(&t.dng),
        "makernotes": makernote_lens(&t.makernotes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lens_info_nested_blocks() {
        let mut lens = LensInfo::default();
        lens.lens = "FE 35mm F1.8".into();
        lens.makernotes.cur_ap = 1.8;
        lens.dng.min_focal = 35.0;

        let v = lens_info(&lens);
        assert_eq!(v["Lens"], "FE 35mm F1.8");
        assert_eq!(v["makernotes"]["CurAp"], 1.8);
        assert_eq!(v["dng"]["MinFocal"], 35.0);
        assert!(v["nikon"].is_object());
    }

    #[test]
    fn test_makernote_lens_ids_survive_u64_range() {
        let mut t = MakernoteLens::default();
        t.lens_id = 0xFFFF_FFFF_FFFF;
        let v = makernote_lens(&t);
        assert_eq!(v["LensID"], 0xFFFF_FFFF_FFFFu64);
    }

    #[test]
    fn test_lens_float_fields_keep_shortest_decimal() {
        let mut t = MakernoteLens::default();
        t.cur_ap = 1.8;
        t.min_focus_distance = 0.22;
        let v = makernote_lens(&t);
        assert_eq!(v["CurAp"], 1.8);
        assert_eq!(v["MinFocusDistance"], 0.22);
    }
}
