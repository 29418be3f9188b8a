pub mod frame_inpainter;
