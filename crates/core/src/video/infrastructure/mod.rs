pub mod ffmpeg_reader;
pub mod ffmpeg_writer;
pub mod memory_image_codec;
