use super::*;

use image::{ImageFormat, Rgba, RgbaImage};

fn encode_png(img: &RgbaImage) -> Vec<u8> {
    let mut bytes = std::io::Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

#[test]
fn decodes_and_premultiplies() {
    let mut img = RgbaImage::new(2, 1);
    img.put_pixel(0, 0, Rgba([200, 100, 50, 128]));
    img.put_pixel(1, 0, Rgba([255, 255, 255, 0]));

    let sprite = decode_sprite(&encode_png(&img)).unwrap();
    assert_eq!((sprite.width, sprite.height), (2, 1));

    let px = &sprite.rgba8_premul;
    // Half-transparent pixel scaled by alpha.
    assert_eq!(&px[0..4], &[100, 50, 25, 128]);
    // Fully transparent pixel zeroed.
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
}

#[test]
fn opaque_pixels_pass_through() {
    let mut img = RgbaImage::new(1, 1);
    img.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
    let sprite = decode_sprite(&encode_png(&img)).unwrap();
    assert_eq!(&sprite.rgba8_premul[..], &[10, 20, 30, 255]);
}

#[test]
fn garbage_bytes_are_an_error() {
    assert!(decode_sprite(b"definitely not an image").is_err());
}
