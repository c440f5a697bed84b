//! User-controllable decode options, captured as configuration state.

/// The dcraw-style processing parameter set. These are inputs to the
/// decode pipeline; the snapshot records them so a consumer can see which
/// settings produced the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputParams {
    /// Area used for white balance when averaging a region.
    pub greybox: [u32; 4],
    pub cropbox: [u32; 4],
    /// Chromatic aberration correction coefficients.
    pub aber: [f64; 4],
    /// Gamma curve: power, toe slope, and derived spline coefficients.
    pub gamm: [f64; 6],
    pub user_mul: [f32; 4],
    pub shot_select: u32,
    pub bright: f32,
    /// Wavelet denoise threshold.
    pub threshold: f32,
    pub half_size: i32,
    pub four_color_rgb: i32,
    pub highlight: i32,
    pub use_auto_wb: i32,
    pub use_camera_wb: i32,
    pub use_camera_matrix: i32,
    pub output_color: i32,
    pub output_profile: String,
    pub camera_profile: String,
    pub bad_pixels: String,
    pub dark_frame: String,
    pub output_bps: i32,
    pub output_tiff: i32,
    pub user_flip: i32,
    pub user_qual: i32,
    pub user_black: i32,
    pub user_cblack: [i32; 4],
    pub user_sat: i32,
    pub med_passes: i32,
    pub auto_bright_thr: f32,
    pub adjust_maximum_thr: f32,
    pub no_auto_bright: i32,
    pub use_fuji_rotate: i32,
    pub green_matching: i32,
    pub dcb_iterations: i32,
    pub dcb_enhance_fl: i32,
    pub fbdd_noiserd: i32,
    pub exp_correc: i32,
    pub exp_shift: f32,
    pub exp_preser: f32,
    pub use_rawspeed: i32,
    pub use_dngsdk: i32,
    pub no_auto_scale: i32,
    pub no_interpolation: i32,
    pub raw_processing_options: u32,
    pub max_raw_memory_mb: u32,
    pub sony_arw2_posterization_thr: i32,
    pub coolscan_nef_gamma: f32,
}

impl Default for OutputParams {
    fn default() -> Self {
        // Engine defaults: camera matrix on, sRGB output, 8 bps, AHD-class
        // interpolation, brightness 1.0, BT.709 gamma.
        Self {
            greybox: [0, 0, u32::MAX, u32::MAX],
            cropbox: [0, 0, u32::MAX, u32::MAX],
            aber: [1.0, 1.0, 1.0, 1.0],
            gamm: [0.45, 4.5, 0.0, 0.0, 0.0, 0.0],
            user_mul: [0.0; 4],
            shot_select: 0,
            bright: 1.0,
            threshold: 0.0,
            half_size: 0,
            four_color_rgb: 0,
            highlight: 0,
            use_auto_wb: 0,
            use_camera_wb: 0,
            use_camera_matrix: 1,
            output_color: 1,
            output_profile: String::new(),
            camera_profile: String::new(),
            bad_pixels: String::new(),
            dark_frame: String::new(),
            output_bps: 8,
            output_tiff: 0,
            user_flip: -1,
            user_qual: -1,
            user_black: -1,
            user_cblack: [0; 4],
            user_sat: -1,
            med_passes: 0,
            auto_bright_thr: 0.01,
            adjust_maximum_thr: 0.75,
            no_auto_bright: 0,
            use_fuji_rotate: 1,
            green_matching: 0,
            dcb_iterations: -1,
            dcb_enhance_fl: 0,
            fbdd_noiserd: 0,
            exp_correc: 0,
            exp_shift: 1.0,
            exp_preser: 0.0,
            use_rawspeed: 0,
            use_dngsdk: 0,
            no_auto_scale: 0,
            no_interpolation: 0,
            raw_processing_options: 0,
            max_raw_memory_mb: 0,
            sony_arw2_posterization_thr: 0,
            coolscan_nef_gamma: 1.0,
        }
    }
}

/// Internal decode-stage flags mirrored from the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InternalOutputParams {
    pub mix_green: i32,
    pub raw_color: i32,
    pub zero_is_bad: i32,
    pub shrink: u16,
    pub fuji_width: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_params_defaults() {
        let params = OutputParams::default();
        assert_eq!(params.bright, 1.0);
        assert_eq!(params.output_bps, 8);
        assert_eq!(params.user_qual, -1);
        assert_eq!(params.gamm[0], 0.45);
        assert_eq!(params.use_camera_matrix, 1);
    }
}
