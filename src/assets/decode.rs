use std::sync::Arc;

use anyhow::Context;

use crate::assets::store::PreparedSprite;
use crate::foundation::error::BespokeResult;
use crate::foundation::math::mul_div255_u8;

/// Decode encoded sprite bytes and convert to premultiplied RGBA8.
pub fn decode_sprite(bytes: &[u8]) -> BespokeResult<PreparedSprite> {
    let dyn_img = image::load_from_memory(bytes).context("decode sprite from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedSprite {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = mul_div255_u8(px[0] as u16, a);
        px[1] = mul_div255_u8(px[1] as u16, a);
        px[2] = mul_div255_u8(px[2] as u16, a);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
