//! Processing parameter wrappers.

use serde_json::{json, Value};

use crate::convert::{f32_number, f32_seq, f64_seq, int_seq};
use crate::snapshot::{InternalOutputParams, OutputParams};

/// Marshal the user-facing decode parameter record.
pub fn output_params(t: &OutputParams) -> Value {
    json!({
        "greybox": int_seq(&t.greybox),
        "cropbox": int_seq(&t.cropbox),
        "aber": f64_seq(&t.aber),
        "gamm": f64_seq(&t.gamm),
        "user_mul": f32_seq(&t.user_mul),
        "shot_select": t.shot_select,
        "bright": f32_number(t.bright),
        "threshold": f32_number(t.threshold),
        "half_size": t.half_size,
        "four_color_rgb": t.four_color_rgb,
        "highlight": t.highlight,
        "use_auto_wb": t.use_auto_wb,
        "use_camera_wb": t.use_camera_wb,
        "use_camera_matrix": t.use_camera_matrix,
        "output_color": t.output_color,
        "output_profile": &t.output_profile,
        "camera_profile": &t.camera_profile,
        "bad_pixels": &t.bad_pixels,
        "dark_frame": &t.dark_frame,
        "output_bps": t.output_bps,
        "output_tiff": t.output_tiff,
        "user_flip": t.user_flip,
        "user_qual": t.user_qual,
        "user_black": t.user_black,
        "user_cblack": int_seq(&t.user_cblack),
        "user_sat": t.user_sat,
        "med_passes": t.med_passes,
        "auto_bright_thr": f32_number(t.auto_bright_thr),
        "adjust_maximum_thr": f32_number(t.adjust_maximum_thr),
        "no_auto_bright": t.no_auto_bright,
        "use_fuji_rotate": t.use_fuji_rotate,
        "green_matching": t.green_matching,
        "dcb_iterations": t.dcb_iterations,
        "dcb_enhance_fl": t.dcb_enhance_fl,
        "fbdd_noiserd": t.fbdd_noiserd,
        "exp_correc": t.exp_correc,
        "exp_shift": f32_number(t.exp_shift),
        "exp_preser": f32_number(t.exp_preser),
        "use_rawspeed": t.use_rawspeed,
        "use_dngsdk": t.use_dngsdk,
        "no_auto_scale": t.no_auto_scale,
        "no_interpolation": t.no_interpolation,
        "raw_processing_options": t.raw_processing_options,
        "max_raw_memory_mb": t.max_raw_memory_mb,
        "sony_arw2_posterization_thr": t.sony_arw2_posterization_thr,
        "coolscan_nef_gamma": f32_number(t.coolscan_nef_gamma),
    })
}

/// Marshal the internal decode-stage flags.
pub fn internal_output_params(t: &InternalOutputParams) -> Value {
    json!({
        "mix_green": t.mix_green,
        "raw_color": t.raw_color,
        "zero_is_bad": t.zero_is_bad,
        "shrink": t.shrink,
        "fuji_width": t.fuji_width,
    })
}
