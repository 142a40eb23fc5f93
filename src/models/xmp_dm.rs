//! XMP Dynamic Media schema (`xmpDM`), the properties written by common
//! video and audio tools

use crate::core::error::XmpResult;
use crate::core::model::Model;
use crate::core::namespace::{ns, Namespace};
use crate::core::property::is_zero;
use crate::types::structs::Dimensions;
use crate::{xmp_model, xmp_struct};
use serde::{Deserialize, Serialize};

/// XMP Dynamic Media namespace
pub const NS_XMP_DM: Namespace =
    Namespace::new(ns::XMP_DM_PREFIX, ns::XMP_DM, Some(XmpDynamicMedia::new_model));

/// A duration as a count of `scale` units
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaTime {
    #[serde(skip_serializing_if = "is_zero")]
    pub value: i64,
    /// Unit as a rational, e.g. `1/24`
    #[serde(skip_serializing_if = "is_zero")]
    pub scale: String,
}

xmp_struct!(MediaTime {
    value => ns::XMP_DM, "value";
    scale => ns::XMP_DM, "scale";
});

/// A timecode with its format, e.g. `01:02:03:04` in `24Timecode`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timecode {
    #[serde(skip_serializing_if = "is_zero")]
    pub time_value: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub time_format: String,
}

xmp_struct!(Timecode {
    time_value => ns::XMP_DM, "timeValue";
    time_format => ns::XMP_DM, "timeFormat";
});

/// Link to the project a clip belongs to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLink {
    #[serde(rename = "type", skip_serializing_if = "is_zero")]
    pub kind: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub path: String,
}

xmp_struct!(ProjectLink {
    kind => ns::XMP_DM, "type";
    path => ns::XMP_DM, "path";
});

/// XMP Dynamic Media properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct XmpDynamicMedia {
    #[serde(skip_serializing_if = "is_zero")]
    pub album: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub artist: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub genre: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub log_comment: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub scene: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub shot_name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub tape_name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub audio_sample_rate: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub audio_sample_type: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub audio_channel_type: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub start_time_scale: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub start_time_sample_size: i64,
    /// Frames per second as written, e.g. `24.000000` or `29.97`
    #[serde(skip_serializing_if = "is_zero")]
    pub video_frame_rate: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub video_field_order: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub video_pixel_aspect_ratio: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub duration: MediaTime,
    #[serde(skip_serializing_if = "is_zero")]
    pub alt_timecode: Timecode,
    #[serde(skip_serializing_if = "is_zero")]
    pub start_timecode: Timecode,
    #[serde(skip_serializing_if = "is_zero")]
    pub video_frame_size: Dimensions,
    #[serde(skip_serializing_if = "is_zero")]
    pub project_ref: ProjectLink,
}

impl XmpDynamicMedia {
    fn new_model() -> XmpResult<Box<dyn Model>> {
        Ok(Box::<Self>::default())
    }
}

xmp_model!(XmpDynamicMedia {
    album => ns::XMP_DM, "album";
    artist => ns::XMP_DM, "artist";
    genre => ns::XMP_DM, "genre";
    log_comment => ns::XMP_DM, "logComment";
    scene => ns::XMP_DM, "scene";
    shot_name => ns::XMP_DM, "shotName";
    tape_name => ns::XMP_DM, "tapeName";
    audio_sample_rate => ns::XMP_DM, "audioSampleRate";
    audio_sample_type => ns::XMP_DM, "audioSampleType";
    audio_channel_type => ns::XMP_DM, "audioChannelType";
    start_time_scale => ns::XMP_DM, "startTimeScale";
    start_time_sample_size => ns::XMP_DM, "startTimeSampleSize";
    video_frame_rate => ns::XMP_DM, "videoFrameRate";
    video_field_order => ns::XMP_DM, "videoFieldOrder";
    video_pixel_aspect_ratio => ns::XMP_DM, "videoPixelAspectRatio";
    duration => ns::XMP_DM, "duration";
    alt_timecode => ns::XMP_DM, "altTimecode";
    start_timecode => ns::XMP_DM, "startTimecode";
    video_frame_size => ns::XMP_DM, "videoFrameSize";
    project_ref => ns::XMP_DM, "projectRef";
});

impl Model for XmpDynamicMedia {
    fn namespaces(&self) -> Vec<Namespace> {
        vec![NS_XMP_DM]
    }
}
