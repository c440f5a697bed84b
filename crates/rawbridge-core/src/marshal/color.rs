//! Color calibration wrappers, including the large fixed white balance
//! tables and the per-illuminant DNG blocks.

use serde_json::{json, Value};

use crate::convert::{byte_seq, f32_grid, f32_number, f32_seq, int_grid, int_seq};
use crate::snapshot::{ColorData, DngColor, DngLevels, P1Color, PhaseOneData};

/// Marshal one per-illuminant DNG calibration block.
pub fn dng_color(t: &DngColor) -> Value {
    json!({
        "parsedfields": t.parsed_fields,
        "illuminant": t.illuminant,
        "calibration": f32_grid(&t.calibration),
        "colormatrix": f32_grid(&t.colormatrix),
        "forwardmatrix": f32_grid(&t.forwardmatrix),
    })
}

/// Marshal the DNG level data.
pub fn dng_levels(t: &DngLevels) -> Value {
    json!({
        "parsedfields": t.parsed_fields,
        "dng_cblack": int_seq(&t.dng_cblack),
        "dng_black": t.dng_black,
        "dng_fblack": f32_number(t.dng_fblack),
        "dng_whitelevel": int_seq(&t.dng_whitelevel),
        "default_crop": int_seq(&t.default_crop),
        "preview_colorspace": t.preview_colorspace,
        "analogbalance": f32_seq(&t.analogbalance),
        "asshotneutral": f32_seq(&t.asshotneutral),
        "baseline_exposure": f32_number(t.baseline_exposure),
        "LinearResponseLimit": f32_number(t.linear_response_limit),
    })
}

/// Marshal the Phase One framing data.
pub fn phase_one_data(t: &PhaseOneData) -> Value {
    json!({
        "format": t.format,
        "key_off": t.key_off,
        "tag_21a": t.tag_21a,
        "t_black": t.black,
        "split_col": t.split_col,
        "black_col": t.black_col,
        "split_row": t.split_row,
        "black_row": t.black_row,
        "tag_210": f32_number(t.tag_210),
    })
}

fn p1_color(t: &P1Color) -> Value {
    json!({ "romm_cam": f32_seq(&t.romm_cam) })
}

/// Marshal the full color record.
pub fn color_data(t: &ColorData) -> Value {
    let wb_coeffs: Vec<Value> = t.wb_coeffs.iter().map(|row| int_seq(row)).collect();
    let wbct_coeffs: Vec<Value> = t.wbct_coeffs.iter().map(|row| f32_seq(row)).collect();

    json!({
        "black": t.black,
        "cblack": int_seq(&t.cblack),
        "data_maximum": t.data_maximum,
        "maximum": t.maximum,
        "linear_max": int_seq(&t.linear_max),
        "fmaximum": f32_number(t.fmaximum),
        "fnorm": f32_number(t.fnorm),
        "white": int_grid(&t.white),
        "cam_mul": f32_seq(&t.cam_mul),
        "pre_mul": f32_seq(&t.pre_mul),
        "cmatrix": f32_grid(&t.cmatrix),
        "ccm": f32_grid(&t.ccm),
        "rgb_cam": f32_grid(&t.rgb_cam),
        "cam_xyz": f32_grid(&t.cam_xyz),
        "phase_one_data": phase_one_data(&t.phase_one_data),
        "flash_used": f32_number(t.flash_used),
        "canon_ev": f32_number(t.canon_ev),
        "model2": &t.model2,
        "UniqueCameraModel": &t.unique_camera_model,
        "LocalizedCameraModel": &t.localized_camera_model,
        "profile_length": t.profile.len(),
        "profile": byte_seq(&t.profile),
        "black_stat": int_seq(&t.black_stat),
        "dng_color": [dng_color(&t.dng_color[0]), dng_color(&t.dng_color[1])],
        "dng_levels": dng_levels(&t.dng_levels),
        "WB_Coeffs": wb_coeffs,
        "WBCT_Coeffs": wbct_coeffs,
        "P1_color": [p1_color(&t.p1_color[0]), p1_color(&t.p1_color[1])],
    })
}
