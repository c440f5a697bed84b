//! Lens identification records.

/// Lens ranges carried in DNG metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DngLens {
    pub min_focal: f32,
    pub max_focal: f32,
    pub max_ap4_min_focal: f32,
    pub max_ap4_max_focal: f32,
}

/// Lens description recovered from the manufacturer makernote block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MakernoteLens {
    pub lens_id: u64,
    pub lens: String,
    pub lens_format: u16,
    pub lens_mount: u16,
    pub cam_id: u64,
    pub camera_format: u16,
    pub camera_mount: u16,
    pub body: String,
    pub focal_type: i16,
    pub lens_features_pre: String,
    pub lens_features_suf: String,
    pub min_focal: f32,
    pub max_focal: f32,
    pub max_ap4_min_focal: f32,
    pub max_ap4_max_focal: f32,
    pub min_ap4_min_focal: f32,
    pub min_ap4_max_focal: f32,
    pub max_ap: f32,
    pub min_ap: f32,
    pub cur_focal: f32,
    pub cur_ap: f32,
    pub max_ap4_cur_focal: f32,
    pub min_ap4_cur_focal: f32,
    pub min_focus_distance: f32,
    pub focus_range_index: f32,
    pub lens_f_stops: f32,
    pub teleconverter_id: u64,
    pub teleconverter: String,
    pub adapter_id: u64,
    pub adapter: String,
    pub attachment_id: u64,
    pub attachment: String,
    pub focal_length_in_35mm_format: u16,
}

/// Nikon-specific lens data block.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NikonLens {
    pub effective_max_ap: f32,
    pub lens_id_number: u8,
    pub lens_f_stops: u8,
    pub mcu_version: u8,
    pub lens_type: u8,
}

/// Aggregate lens information with the three vendor-derived sub-blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LensInfo {
    pub min_focal: f32,
    pub max_focal: f32,
    pub max_ap4_min_focal: f32,
    pub max_ap4_max_focal: f32,
    pub exif_max_ap: f32,
    pub lens_make: String,
    pub lens: String,
    pub lens_serial: String,
    pub internal_lens_serial: String,
    pub focal_length_in_35mm_format: u16,
    pub nikon: NikonLens,
    pub dng: DngLens,
    pub makernotes: MakernoteLens,
}
