//! Render the default configuration to `preview.png` and print the quote.
//!
//! Sprites are looked up relative to the current directory; layers whose
//! sprites are missing are simply omitted, so this runs (and produces a
//! mostly empty frame) even without an asset bundle present.

use bespoke::{
    AlwaysExists, AssetResolver, Canvas, Configuration, ContrastLevel, PreparedSpriteStore,
    PriceTable, builtin_catalog, compile_preview, compute_price, fallback_swatches,
    render_preview, tone_profile,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let catalog = builtin_catalog();
    let config = Configuration::default();
    let model = catalog
        .style(&config.style_id)
        .ok_or_else(|| anyhow::anyhow!("unknown style '{}'", config.style_id))?;
    let fabric = fallback_swatches()
        .into_iter()
        .find(|f| Some(&f.id) == config.color_id.as_ref())
        .ok_or_else(|| anyhow::anyhow!("no swatch for default color"))?;
    let profile = tone_profile(fabric.tone, ContrastLevel::default());

    let plan = compile_preview(
        model,
        &config,
        &fabric,
        &profile,
        &AssetResolver::builtin(),
        None,
        &AlwaysExists,
        Canvas {
            width: 600,
            height: 900,
        },
    );
    let sprites = PreparedSpriteStore::prepare(
        plan.sprite_refs().iter().map(String::as_str),
        std::env::current_dir()?,
    )?;
    let frame = render_preview(&plan, &sprites)?;
    image::save_buffer_with_format(
        "preview.png",
        &frame.rgba8_premul,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )?;

    let quote = compute_price(&config, &catalog, &PriceTable::default());
    println!("{} paint ops -> preview.png", plan.ops.len());
    for item in &quote.items {
        println!("  {:<40} {:>6}", item.label, item.price);
    }
    println!("  {:<40} {:>6}", "total", quote.total);
    Ok(())
}
