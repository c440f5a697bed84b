//! Color calibration state: levels, multipliers, matrices and white
//! balance tables.

/// Phase One raw-format framing data.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseOneData {
    pub format: i32,
    pub key_off: i32,
    pub tag_21a: i32,
    pub black: i32,
    pub split_col: i32,
    pub black_col: i32,
    pub split_row: i32,
    pub black_row: i32,
    pub tag_210: f32,
}

/// One per-illuminant DNG calibration block.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DngColor {
    /// Bitmask of tags actually seen in the source.
    pub parsed_fields: u32,
    pub illuminant: u16,
    pub calibration: [[f32; 4]; 4],
    pub colormatrix: [[f32; 3]; 4],
    pub forwardmatrix: [[f32; 4]; 3],
}

/// DNG black/white level and neutral-point data.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DngLevels {
    pub parsed_fields: u32,
    pub dng_cblack: [u32; 4],
    pub dng_black: u32,
    pub dng_fblack: f32,
    pub dng_whitelevel: [u32; 4],
    pub default_crop: [u16; 4],
    pub preview_colorspace: u32,
    pub analogbalance: [f32; 4],
    pub asshotneutral: [f32; 4],
    pub baseline_exposure: f32,
    pub linear_response_limit: f32,
}

/// Phase One ROMM-to-camera matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct P1Color {
    pub romm_cam: [f32; 9],
}

/// Full color data record.
///
/// The engine's 65,536-entry tone curve is intentionally not modeled; it
/// is lookup state for the decode pipeline, not calibration metadata, and
/// would dominate every marshaled tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorData {
    pub black: u32,
    /// Per-channel black level additions.
    pub cblack: [u32; 4],
    pub data_maximum: u32,
    pub maximum: u32,
    pub linear_max: [i64; 4],
    pub fmaximum: f32,
    pub fnorm: f32,
    pub white: [[u16; 8]; 8],
    /// As-shot white balance multipliers.
    pub cam_mul: [f32; 4],
    /// Daylight white balance multipliers.
    pub pre_mul: [f32; 4],
    /// Camera-to-sRGB color correction matrix.
    pub cmatrix: [[f32; 4]; 3],
    pub ccm: [[f32; 4]; 3],
    pub rgb_cam: [[f32; 4]; 3],
    pub cam_xyz: [[f32; 3]; 4],
    pub phase_one_data: PhaseOneData,
    pub flash_used: f32,
    pub canon_ev: f32,
    pub model2: String,
    pub unique_camera_model: String,
    pub localized_camera_model: String,
    /// Embedded ICC profile; empty when the source carries none.
    pub profile: Vec<u8>,
    pub black_stat: [i64; 8],
    pub dng_color: [DngColor; 2],
    pub dng_levels: DngLevels,
    /// White balance coefficients indexed by EXIF lightsource.
    pub wb_coeffs: [[i32; 4]; 256],
    /// White balance coefficients indexed by color temperature bucket.
    pub wbct_coeffs: [[f32; 5]; 64],
    pub p1_color: [P1Color; 2],
}

impl Default for ColorData {
    fn default() -> Self {
        Self {
            black: 0,
            cblack: [0; 4],
            data_maximum: 0,
            maximum: 0,
            linear_max: [0; 4],
            fmaximum: 0.0,
            fnorm: 0.0,
            white: [[0; 8]; 8],
            cam_mul: [0.0; 4],
            pre_mul: [0.0; 4],
            cmatrix: [[0.0; 4]; 3],
            ccm: [[0.0; 4]; 3],
            rgb_cam: [[0.0; 4]; 3],
            cam_xyz: [[0.0; 3]; 4],
            phase_one_data: PhaseOneData::default(),
            flash_used: 0.0,
            canon_ev: 0.0,
            model2: String::new(),
            unique_camera_model: String::new(),
            localized_camera_model: String::new(),
            profile: Vec::new(),
            black_stat: [0; 8],
            dng_color: [DngColor::default(); 2],
            dng_levels: DngLevels::default(),
            wb_coeffs: [[0; 4]; 256],
            wbct_coeffs: [[0.0; 5]; 64],
            p1_color: [P1Color::default(); 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_data_default_tables_are_zeroed() {
        let color = ColorData::default();
        assert!(color.wb_coeffs.iter().all(|row| *row == [0; 4]));
        assert!(color.wbct_coeffs.iter().all(|row| *row == [0.0; 5]));
        assert!(color.profile.is_empty());
    }
}
