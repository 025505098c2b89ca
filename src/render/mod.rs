/// Frame buffers and pixel compositing.
pub mod frame;
pub(crate) mod raster;
