//! Manufacturer-specific makernote blocks.
//!
//! One record per supported manufacturer. Exactly one block is populated
//! for a given source image; the others stay zero-valued and are still
//! marshaled, so the output schema does not depend on which camera
//! produced the file. The active block is identified through
//! `Identification::make`/`normalized_make`, not by absence of the rest.

/// Canon sensor geometry and exposure block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonMakernotes {
    pub color_data_ver: i32,
    pub color_data_sub_ver: i32,
    pub specular_white_level: i32,
    pub normal_white_level: i32,
    pub channel_black_level: [i32; 4],
    pub average_black_level: i32,
    pub multishot: [u32; 4],
    pub metering_mode: i16,
    pub spot_metering_mode: i16,
    pub flash_metering_mode: u8,
    pub flash_mode: i16,
    pub exposure_mode: i16,
    pub ae_setting: i16,
    pub image_stabilization: i16,
    pub flash_activity: i16,
    pub flash_bits: i16,
    pub continuous_drive: i16,
    pub sensor_width: i16,
    pub sensor_height: i16,
    pub sensor_left_border: i16,
    pub sensor_top_border: i16,
    pub sensor_right_border: i16,
    pub sensor_bottom_border: i16,
    pub black_mask_left_border: i16,
    pub black_mask_top_border: i16,
    pub black_mask_right_border: i16,
    pub black_mask_bottom_border: i16,
}

/// Nikon autofocus, flash and NEF-specific block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NikonMakernotes {
    pub exposure_bracket_value: f64,
    pub active_d_lighting: u16,
    pub shooting_mode: u16,
    pub image_stabilization: [u8; 7],
    pub vibration_reduction: u8,
    pub vr_mode: u8,
    pub focus_mode: [u8; 7],
    pub af_point: u8,
    pub af_points_in_focus: u16,
    pub contrast_detect_af: u8,
    pub af_area_mode: u8,
    pub phase_detect_af: u8,
    pub primary_af_point: u8,
    pub af_points_used: [u8; 29],
    pub af_image_width: u16,
    pub af_image_height: u16,
    pub af_area_x_position: u16,
    pub af_area_y_position: u16,
    pub af_area_width: u16,
    pub af_area_height: u16,
    pub contrast_detect_af_in_focus: u8,
    pub flash_setting: String,
    pub flash_type: String,
    pub flash_exposure_compensation: [u8; 4],
    pub external_flash_exposure_comp: [u8; 4],
    pub flash_exposure_bracket_value: [u8; 4],
    pub flash_mode: u8,
    pub flash_exposure_compensation2: i8,
    pub flash_exposure_compensation3: i8,
    pub flash_exposure_compensation4: i8,
    pub flash_source: u8,
    pub flash_firmware: [u8; 2],
    pub external_flash_flags: u8,
    pub flash_control_commander_mode: u8,
    pub flash_output_and_compensation: u8,
    pub flash_focal_length: u8,
    pub flash_gn_distance: u8,
    pub flash_group_control_mode: [u8; 4],
    pub flash_group_output_and_compensation: [u8; 4],
    pub flash_color_filter: u8,
    pub nef_compression: u16,
    pub exposure_mode: i32,
    pub exposure_program: i32,
    pub multi_exposure_shots: i32,
    pub multi_exposure_gain_on: i32,
    pub multi_exposure_wb: [f64; 4],
    pub af_fine_tune: u8,
    pub af_fine_tune_index: u8,
    pub af_fine_tune_adj: i8,
    pub lens_data_version: u32,
    pub flash_info_version: u32,
    pub color_balance_version: u32,
    pub key: u8,
    pub nef_bit_depth: [u16; 4],
    pub high_speed_crop_format: u16,
    pub sensor_high_speed_crop: [u16; 4],
    pub sensor_width: u16,
    pub sensor_height: u16,
}

/// Hasselblad back/body identification block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HasselbladMakernotes {
    pub base_iso: i32,
    pub gain: f64,
    pub sensor: String,
    pub sensor_unit: String,
    pub host_body: String,
    pub sensor_code: i32,
    pub sensor_sub_code: i32,
    pub coating_code: i32,
    pub uncropped: i32,
    pub capture_sequence_initiator: String,
    pub sensor_unit_connector: String,
    pub format: i32,
    pub n_ifd_cm: [i32; 2],
    pub recommended_crop: [i32; 2],
    pub mn_color_matrix: [[f64; 3]; 4],
}

/// Fujifilm dynamic-range and film-simulation block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FujiMakernotes {
    pub expo_mid_point_shift: f32,
    pub dynamic_range: u16,
    pub film_mode: u16,
    pub dynamic_range_setting: u16,
    pub development_dynamic_range: u16,
    pub auto_dynamic_range: u16,
    pub d_range_priority: u16,
    pub d_range_priority_auto: u16,
    pub d_range_priority_fixed: u16,
    pub brightness: f32,
    pub focus_mode: u16,
    pub af_mode: u16,
    pub focus_pixel: [u16; 2],
    pub image_stabilization: [u16; 3],
    pub flash_mode: u16,
    pub wb_preset: u16,
    pub shutter_type: u16,
    pub exr_mode: u16,
    pub macro_mode: u16,
    pub rating: u32,
    pub crop_mode: u16,
    pub serial_signature: String,
}

/// Olympus autofocus and sensor calibration block.
#[derive(Debug, Clone, PartialEq)]
pub struct OlympusMakernotes {
    pub sensor_calibration: [i32; 2],
    pub focus_mode: [u16; 2],
    pub auto_focus: u16,
    pub af_point: u16,
    pub af_areas: [u32; 64],
    pub af_point_selected: [f64; 5],
    pub af_result: u16,
    pub drive_mode: [u16; 5],
    pub color_space: u16,
    pub af_fine_tune: u8,
    pub af_fine_tune_adj: [i16; 3],
}

impl Default for OlympusMakernotes {
    fn default() -> Self {
        Self {
            sensor_calibration: [0; 2],
            focus_mode: [0; 2],
            auto_focus: 0,
            af_point: 0,
            af_areas: [0; 64],
            af_point_selected: [0.0; 5],
            af_result: 0,
            drive_mode: [0; 5],
            color_space: 0,
            af_fine_tune: 0,
            af_fine_tune_adj: [0; 3],
        }
    }
}

/// Sony drive, pixel-shift and file-format block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SonyMakernotes {
    pub camera_type: u16,
    pub sony0x9400_version: u8,
    pub sony0x9400_release_mode2: u8,
    pub sony0x9400_sequence_image_number: u32,
    pub sony0x9400_sequence_length1: u8,
    pub sony0x9400_sequence_file_number: u32,
    pub sony0x9400_sequence_length2: u8,
    pub af_micro_adj_value: i8,
    pub af_micro_adj_on: i8,
    pub af_micro_adj_registered_lenses: u8,
    pub variable_low_pass_filter: u16,
    pub long_exposure_noise_reduction: u32,
    pub high_iso_noise_reduction: u16,
    pub hdr: [u16; 2],
    pub group2010: u16,
    pub real_iso_offset: u16,
    pub metering_mode_2: u16,
    pub sony_date_time: String,
    pub shot_number_since_power_up: u32,
    pub pixel_shift_group_prefix: u16,
    pub pixel_shift_group_id: u32,
    pub n_shots_in_pixel_shift_group: u8,
    pub num_in_pixel_shift_group: u8,
    pub prd_image_height: u16,
    pub prd_image_width: u16,
    pub prd_raw_bit_depth: u16,
    pub prd_storage_method: u16,
    pub prd_bayer_pattern: u16,
    pub sony_raw_file_type: u16,
    pub raw_file_type: u16,
    pub quality: u32,
    pub file_format: u16,
}

/// Kodak calibration matrices for the ROMM color pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KodakMakernotes {
    pub black_level_top: u16,
    pub black_level_bottom: u16,
    pub offset_left: i16,
    pub offset_top: i16,
    pub clip_black: u16,
    pub clip_white: u16,
    pub romm_cam_daylight: [[f32; 3]; 3],
    pub romm_cam_tungsten: [[f32; 3]; 3],
    pub romm_cam_fluorescent: [[f32; 3]; 3],
    pub romm_cam_flash: [[f32; 3]; 3],
    pub romm_cam_custom: [[f32; 3]; 3],
    pub romm_cam_auto: [[f32; 3]; 3],
    pub val_018percent: u16,
    pub val_100percent: u16,
    pub val_170percent: u16,
    pub maker_note_kodak8a: i16,
    pub iso_calibration_gain: f32,
    pub analog_iso: f32,
}

/// Panasonic compression and black-level block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanasonicMakernotes {
    pub compression: u16,
    pub black_level_dim: u16,
    pub black_level: [f32; 8],
    pub multishot: u32,
    pub gamma: f32,
    pub high_iso_multiplier: [f32; 3],
}

/// Pentax autofocus and drive block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PentaxMakernotes {
    pub focus_mode: u16,
    pub af_point_selected: u16,
    pub af_points_in_focus: u32,
    pub focus_position: u16,
    pub drive_mode: [u8; 4],
    pub af_adjustment: i16,
    pub multi_exposure: u8,
    pub quality: u16,
}

/// Phase One system identification strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseOneMakernotes {
    pub software: String,
    pub system_type: String,
    pub firmware_string: String,
    pub system_model: String,
}

/// Samsung frame geometry and gain block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamsungMakernotes {
    pub image_size_full: [u32; 4],
    pub image_size_crop: [u32; 4],
    pub color_space: [i32; 2],
    pub key: [u32; 11],
    pub digital_gain: f64,
    pub device_type: i32,
    pub lens_firmware: String,
}

/// Manufacturer-agnostic measurements shared by all vendors.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CommonMetadata {
    pub flash_ec: f32,
    pub flash_gn: f32,
    pub camera_temperature: f32,
    pub sensor_temperature: f32,
    pub sensor_temperature2: f32,
    pub lens_temperature: f32,
    pub ambient_temperature: f32,
    pub battery_temperature: f32,
    pub exif_ambient_temperature: f32,
    pub exif_humidity: f32,
    pub exif_pressure: f32,
    pub exif_water_depth: f32,
    pub exif_acceleration: f32,
    pub exif_camera_elevation_angle: f32,
    pub real_iso: f32,
}

/// All manufacturer blocks plus the common block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Makernotes {
    pub canon: CanonMakernotes,
    pub nikon: NikonMakernotes,
    pub hasselblad: HasselbladMakernotes,
    pub fuji: FujiMakernotes,
    pub olympus: OlympusMakernotes,
    pub sony: SonyMakernotes,
    pub kodak: KodakMakernotes,
    pub panasonic: PanasonicMakernotes,
    pub pentax: PentaxMakernotes,
    pub phaseone: PhaseOneMakernotes,
    pub samsung: SamsungMakernotes,
    pub common: CommonMetadata,
}
