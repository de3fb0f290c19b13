use crate::webcam::frame::Frame;
use image::{imageops, DynamicImage, RgbImage};
use tract_onnx::prelude::*;

pub fn frame_to_image(
    frame: &Frame,
) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
    let rgb = RgbImage::from_raw(frame.width(), frame.height(), frame.pixels().to_vec())
        .ok_or("frame buffer does not match its dimensions")?;
    Ok(DynamicImage::ImageRgb8(rgb))
}

/// Crops the largest centered square, then scales it to `size` x `size`.
pub fn crop_to_square(image: &DynamicImage, size: u32) -> DynamicImage {
    let side = image.width().min(image.height());
    let x_offset = (image.width() - side) / 2;
    let y_offset = (image.height() - side) / 2;

    image
        .crop_imm(x_offset, y_offset, side, side)
        .resize_exact(size, size, imageops::FilterType::Triangle)
}

/// NHWC tensor with values in [-1, 1].
fn image_to_tensor(image: &DynamicImage) -> Tensor {
    let rgb = image.to_rgb8();
    tract_ndarray::Array4::from_shape_fn(
        (1, rgb.height() as usize, rgb.width() as usize, 3),
        |(_, y, x, c)| {
            let pixel = rgb.get_pixel(x as u32, y as u32);
            pixel[c] as f32 / 127.5 - 1.0
        },
    )
    .into_tensor()
}

pub fn frame_to_tensor(
    frame: &Frame,
    size: u32,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    let image = frame_to_image(frame)?;
    let square = crop_to_square(&image, size);
    Ok(image_to_tensor(&square))
}
