pub mod blur_level;
pub mod frame_blurrer;
