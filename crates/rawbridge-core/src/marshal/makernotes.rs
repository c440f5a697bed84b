//! Manufacturer makernote wrappers.
//!
//! Every manufacturer key is emitted for every snapshot. Downstream
//! consumers select the block matching the camera make; the unpopulated
//! blocks marshal to their zero-valued fields rather than being omitted.

use serde_json::{json, Value};

use crate::convert::{f32_grid, f32_number, f32_seq, f64_grid, f64_number, f64_seq, int_seq};
use crate::snapshot::{
    CanonMakernotes, CommonMetadata, FujiMakernotes, HasselbladMakernotes, KodakMakernotes,
    Makernotes, NikonMakernotes, OlympusMakernotes, PanasonicMakernotes, PentaxMakernotes,
    PhaseOneMakernotes, SamsungMakernotes, SonyMakernotes,
};

/// Marshal all manufacturer blocks plus the common block.
pub fn makernotes(t: &Makernotes) -> Value {
    json!({
        "canon": canon(&t.canon),
        "nikon": nikon(&t.nikon),
        "hasselblad": hasselblad(&t.hasselblad),
        "fuji": fuji(&t.fuji),
        "olympus": olympus(&t.olympus),
        "sony": sony(&t.sony),
        "kodak": kodak(&t.kodak),
        "panasonic": panasonic(&t.panasonic),
        "pentax": pentax(&t.pentax),
        "phaseone": phaseone(&t.phaseone),
        "samsung": samsung(&t.samsung),
        "common": common(&t.common),
    })
}

pub fn canon(t: &CanonMakernotes) -> Value {
    json!({
        "ColorDataVer": t.color_data_ver,
        "ColorDataSubVer": t.color_data_sub_ver,
        "SpecularWhiteLevel": t.specular_white_level,
        "NormalWhiteLevel": t.normal_white_level,
        "ChannelBlackLevel": int_seq(&t.channel_black_level),
        "AverageBlackLevel": t.average_black_level,
        "multishot": int_seq(&t.multishot),
        "MeteringMode": t.metering_mode,
        "SpotMeteringMode": t.spot_metering_mode,
        "FlashMeteringMode": t.flash_metering_mode,
        "FlashMode": t.flash_mode,
        "ExposureMode": t.exposure_mode,
        "AESetting": t.ae_setting,
        "ImageStabilization": t.image_stabilization,
        "FlashActivity": t.flash_activity,
        "FlashBits": t.flash_bits,
        "ContinuousDrive": t.continuous_drive,
        "SensorWidth": t.sensor_width,
        "SensorHeight": t.sensor_height,
        "SensorLeftBorder": t.sensor_left_border,
        "SensorTopBorder": t.sensor_top_border,
        "SensorRightBorder": t.sensor_right_border,
        "SensorBottomBorder": t.sensor_bottom_border,
        "BlackMaskLeftBorder": t.black_mask_left_border,
        "BlackMaskTopBorder": t.black_mask_top_border,
        "BlackMaskRightBorder": t.black_mask_right_border,
        "BlackMaskBottomBorder": t.black_mask_bottom_border,
    })
}

pub fn nikon(t: &NikonMakernotes) -> Value {
    json!({
        "ExposureBracketValue": f64_number(t.exposure_bracket_value),
        "ActiveDLighting": t.active_d_lighting,
        "ShootingMode": t.shooting_mode,
        "ImageStabilization": int_seq(&t.image_stabilization),
        "VibrationReduction": t.vibration_reduction,
        "VRMode": t.vr_mode,
        "FocusMode": int_seq(&t.focus_mode),
        "AFPoint": t.af_point,
        "AFPointsInFocus": t.af_points_in_focus,
        "ContrastDetectAF": t.contrast_detect_af,
        "AFAreaMode": t.af_area_mode,
        "PhaseDetectAF": t.phase_detect_af,
        "PrimaryAFPoint": t.primary_af_point,
        "AFPointsUsed": int_seq(&t.af_points_used),
        "AFImageWidth": t.af_image_width,
        "AFImageHeight": t.af_image_height,
        "AFAreaXPosition": t.af_area_x_position,
        "AFAreaYPosition": t.af_area_y_position,
        "AFAreaWidth": t.af_area_width,
        "AFAreaHeight": t.af_area_height,
        "ContrastDetectAFInFocus": t.contrast_detect_af_in_focus,
        "FlashSetting": &t.flash_setting,
        "FlashType": &t.flash_type,
        "FlashExposureCompensation": int_seq(&t.flash_exposure_compensation),
        "ExternalFlashExposureComp": int_seq(&t.external_flash_exposure_comp),
        "FlashExposureBracketValue": int_seq(&t.flash_exposure_bracket_value),
        "FlashMode": t.flash_mode,
        "FlashExposureCompensation2": t.flash_exposure_compensation2,
        "FlashExposureCompensation3": t.flash_exposure_compensation3,
        "FlashExposureCompensation4": t.flash_exposure_compensation4,
        "FlashSource": t.flash_source,
        "FlashFirmware": int_seq(&t.flash_firmware),
        "ExternalFlashFlags": t.external_flash_flags,
        "FlashControlCommanderMode": t.flash_control_commander_mode,
        "FlashOutputAndCompensation": t.flash_output_and_compensation,
        "FlashFocalLength": t.flash_focal_length,
        "FlashGNDistance": t.flash_gn_distance,
        "FlashGroupControlMode": int_seq(&t.flash_group_control_mode),
        "FlashGroupOutputAndCompensation": int_seq(&t.flash_group_output_and_compensation),
        "FlashColorFilter": t.flash_color_filter,
        "NEFCompression": t.nef_compression,
        "ExposureMode": t.exposure_mode,
        "ExposureProgram": t.exposure_program,
        "nMEshots": t.multi_exposure_shots,
        "MEgainOn": t.multi_exposure_gain_on,
        "ME_WB": f64_seq(&t.multi_exposure_wb),
        "AFFineTune": t.af_fine_tune,
        "AFFineTuneIndex": t.af_fine_tune_index,
        "AFFineTuneAdj": t.af_fine_tune_adj,
        "LensDataVersion": t.lens_data_version,
        "FlashInfoVersion": t.flash_info_version,
        "ColorBalanceVersion": t.color_balance_version,
        "key": t.key,
        "NEFBitDepth": int_seq(&t.nef_bit_depth),
        "HighSpeedCropFormat": t.high_speed_crop_format,
        "SensorHighSpeedCrop": int_seq(&t.sensor_high_speed_crop),
        "SensorWidth": t.sensor_width,
        "SensorHeight": t.sensor_height,
    })
}

pub fn hasselblad(t: &HasselbladMakernotes) -> Value {
    json!({
        "BaseISO": t.base_iso,
        "Gain": f64_number(t.gain),
        "Sensor": &t.sensor,
        "SensorUnit": &t.sensor_unit,
        "HostBody": &t.host_body,
        "SensorCode": t.sensor_code,
        "SensorSubCode": t.sensor_sub_code,
        "CoatingCode": t.coating_code,
        "uncropped": t.uncropped,
        "CaptureSequenceInitiator": &t.capture_sequence_initiator,
        "SensorUnitConnector": &t.sensor_unit_connector,
        "format": t.format,
        "nIFD_CM": int_seq(&t.n_ifd_cm),
        "RecommendedCrop": int_seq(&t.recommended_crop),
        "mnColorMatrix": f64_grid(&t.mn_color_matrix),
    })
}

pub fn fuji(t: &FujiMakernotes) -> Value {
    json!({
        "ExpoMidPointShift": f32_number(t.expo_mid_point_shift),
        "DynamicRange": t.dynamic_range,
        "FilmMode": t.film_mode,
        "DynamicRangeSetting": t.dynamic_range_setting,
        "DevelopmentDynamicRange": t.development_dynamic_range,
        "AutoDynamicRange": t.auto_dynamic_range,
        "DRangePriority": t.d_range_priority,
        "DRangePriorityAuto": t.d_range_priority_auto,
        "DRangePriorityFixed": t.d_range_priority_fixed,
        "brightness": f32_number(t.brightness),
        "FocusMode": t.focus_mode,
        "AFMode": t.af_mode,
        "FocusPixel": int_seq(&t.focus_pixel),
        "ImageStabilization": int_seq(&t.image_stabilization),
        "FlashMode": t.flash_mode,
        "WB_Preset": t.wb_preset,
        "ShutterType": t.shutter_type,
        "ExrMode": t.exr_mode,
        "Macro": t.macro_mode,
        "Rating": t.rating,
        "CropMode": t.crop_mode,
        "SerialSignature": &t.serial_signature,
    })
}

pub fn olympus(t: &OlympusMakernotes) -> Value {
    json!({
        "SensorCalibration": int_seq(&t.sensor_calibration),
        "FocusMode": int_seq(&t.focus_mode),
        "AutoFocus": t.auto_focus,
        "AFPoint": t.af_point,
        "AFAreas": int_seq(&t.af_areas),
        "AFPointSelected": f64_seq(&t.af_point_selected),
        "AFResult": t.af_result,
        "DriveMode": int_seq(&t.drive_mode),
        "ColorSpace": t.color_space,
        "AFFineTune": t.af_fine_tune,
        "AFFineTuneAdj": int_seq(&t.af_fine_tune_adj),
    })
}

pub fn sony(t: &SonyMakernotes) -> Value {
    json!({
        "CameraType": t.camera_type,
        "Sony0x9400_version": t.sony0x9400_version,
        "Sony0x9400_ReleaseMode2": t.sony0x9400_release_mode2,
        "Sony0x9400_SequenceImageNumber": t.sony0x9400_sequence_image_number,
        "Sony0x9400_SequenceLength1": t.sony0x9400_sequence_length1,
        "Sony0x9400_SequenceFileNumber": t.sony0x9400_sequence_file_number,
        "Sony0x9400_SequenceLength2": t.sony0x9400_sequence_length2,
        "AFMicroAdjValue": t.af_micro_adj_value,
        "AFMicroAdjOn": t.af_micro_adj_on,
        "AFMicroAdjRegisteredLenses": t.af_micro_adj_registered_lenses,
        "VariableLowPassFilter": t.variable_low_pass_filter,
        "LongExposureNoiseReduction": t.long_exposure_noise_reduction,
        "HighISONoiseReduction": t.high_iso_noise_reduction,
        "HDR": int_seq(&t.hdr),
        "group2010": t.group2010,
        "real_iso_offset": t.real_iso_offset,
        "MeteringMode2": t.metering_mode_2,
        "SonyDateTime": &t.sony_date_time,
        "ShotNumberSincePowerUp": t.shot_number_since_power_up,
        "PixelShiftGroupPrefix": t.pixel_shift_group_prefix,
        "PixelShiftGroupID": t.pixel_shift_group_id,
        "nShotsInPixelShiftGroup": t.n_shots_in_pixel_shift_group,
        "numInPixelShiftGroup": t.num_in_pixel_shift_group,
        "prd_ImageHeight": t.prd_image_height,
        "prd_ImageWidth": t.prd_image_width,
        "prd_RawBitDepth": t.prd_raw_bit_depth,
        "prd_StorageMethod": t.prd_storage_method,
        "prd_BayerPattern": t.prd_bayer_pattern,
        "SonyRawFileType": t.sony_raw_file_type,
        "RawFileType": t.raw_file_type,
        "Quality": t.quality,
        "FileFormat": t.file_format,
    })
}

pub fn kodak(t: &KodakMakernotes) -> Value {
    json!({
        "BlackLevelTop": t.black_level_top,
        "BlackLevelBottom": t.black_level_bottom,
        "offset_left": t.offset_left,
        "offset_top": t.offset_top,
        "clipBlack": t.clip_black,
        "clipWhite": t.clip_white,
        "romm_camDaylight": f32_grid(&t.romm_cam_daylight),
        "romm_camTungsten": f32_grid(&t.romm_cam_tungsten),
        "romm_camFluorescent": f32_grid(&t.romm_cam_fluorescent),
        "romm_camFlash": f32_grid(&t.romm_cam_flash),
        "romm_camCustom": f32_grid(&t.romm_cam_custom),
        "romm_camAuto": f32_grid(&t.romm_cam_auto),
        "val018percent": t.val_018percent,
        "val100percent": t.val_100percent,
        "val170percent": t.val_170percent,
        "MakerNoteKodak8a": t.maker_note_kodak8a,
        "ISOCalibrationGain": f32_number(t.iso_calibration_gain),
        "AnalogISO": f32_number(t.analog_iso),
    })
}

pub fn panasonic(t: &PanasonicMakernotes) -> Value {
    json!({
        "Compression": t.compression,
        "BlackLevelDim": t.black_level_dim,
        "BlackLevel": f32_seq(&t.black_level),
        "Multishot": t.multishot,
        "gamma": f32_number(t.gamma),
        "HighISOMultiplier": f32_seq(&t.high_iso_multiplier),
    })
}

pub fn pentax(t: &PentaxMakernotes) -> Value {
    json!({
        "FocusMode": t.focus_mode,
        "AFPointSelected": t.af_point_selected,
        "AFPointsInFocus": t.af_points_in_focus,
        "FocusPosition": t.focus_position,
        "DriveMode": int_seq(&t.drive_mode),
        "AFAdjustment": t.af_adjustment,
        "MultiExposure": t.multi_exposure,
        "Quality": t.quality,
    })
}

pub fn phaseone(t: &PhaseOneMakernotes) -> Value {
    json!({
        "Software": &t.software,
        "SystemType": &t.system_type,
        "FirmwareString": &t.firmware_string,
        "SystemModel": &t.system_model,
    })
}

pub fn samsung(t: &SamsungMakernotes) -> Value {
    json!({
        "ImageSizeFull": int_seq(&t.image_size_full),
        "ImageSizeCrop": int_seq(&t.image_size_crop),
        "ColorSpace": int_seq(&t.color_space),
        "key": int_seq(&t.key),
        "DigitalGain": f64_number(t.digital_gain),
        "DeviceType": t.device_type,
        "LensFirmware": &t.lens_firmware,
    })
}

pub fn common(t: &CommonMetadata) -> Value {
    json!({
        "FlashEC": f32_number(t.flash_ec),
        "FlashGN": f32_number(t.flash_gn),
        "CameraTemperature": f32_number(t.camera_temperature),
        "SensorTemperature": f32_number(t.sensor_temperature),
        "SensorTemperature2": f32_number(t.sensor_temperature2),
        "LensTemperature": f32_number(t.lens_temperature),
        "AmbientTemperature": f32_number(t.ambient_temperature),
        "BatteryTemperature": f32_number(t.battery_temperature),
        "exifAmbientTemperature": f32_number(t.exif_ambient_temperature),
        "exifHumidity": f32_number(t.exif_humidity),
        "exifPressure": f32_number(t.exif_pressure),
        "exifWaterDepth": f32_number(t.exif_water_depth),
        "exifAcceleration": f32_number(t.exif_acceleration),
        "exifCameraElevationAngle": f32_number(t.exif_camera_elevation_angle),
        "real_ISO": f32_number(t.real_iso),
    })
}
