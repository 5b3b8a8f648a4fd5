use super::*;

use image::{ImageFormat, Rgba, RgbaImage};

fn temp_root(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "bespoke-sprites-{name}-{}-{:?}",
        std::process::id(),
        std::thread::current().id()
    ));
    path
}

fn write_png(path: &Path, rgba: [u8; 4]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut img = RgbaImage::new(1, 1);
    img.put_pixel(0, 0, Rgba(rgba));
    let mut bytes = std::io::Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png).unwrap();
    std::fs::write(path, bytes.into_inner()).unwrap();
}

#[test]
fn normalize_rejects_escapes_and_absolutes() {
    assert!(normalize_rel_path("/etc/passwd").is_err());
    assert!(normalize_rel_path("../up.webp").is_err());
    assert!(normalize_rel_path("a/../b.webp").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn normalize_collapses_dot_segments_and_separators() {
    assert_eq!(normalize_rel_path("a/./b.webp").unwrap(), "a/b.webp");
    assert_eq!(normalize_rel_path("a//b.webp").unwrap(), "a/b.webp");
    assert_eq!(normalize_rel_path("a\\b.webp").unwrap(), "a/b.webp");
}

#[test]
fn prepare_loads_and_skips_missing() {
    let root = temp_root("prepare");
    write_png(&root.join("suit/torso.png"), [10, 20, 30, 255]);

    let store = PreparedSpriteStore::prepare(
        ["suit/torso.png", "suit/ghost.png"],
        &root,
    )
    .unwrap();

    assert_eq!(store.len(), 1, "missing sprite skipped, not fatal");
    let sprite = store.get("suit/torso.png").unwrap();
    assert_eq!((sprite.width, sprite.height), (1, 1));
    assert!(store.get("suit/ghost.png").is_none());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn prepare_skips_undecodable_bytes() {
    let root = temp_root("undecodable");
    std::fs::create_dir_all(root.join("suit")).unwrap();
    std::fs::write(root.join("suit/bad.webp"), b"not an image").unwrap();

    let store = PreparedSpriteStore::prepare(["suit/bad.webp"], &root).unwrap();
    assert!(store.is_empty());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn get_normalizes_before_lookup() {
    let root = temp_root("lookup");
    write_png(&root.join("suit/torso.png"), [0, 0, 0, 255]);
    let store = PreparedSpriteStore::prepare(["suit/torso.png"], &root).unwrap();

    assert!(store.get("suit/./torso.png").is_some());
    assert!(store.get("suit//torso.png").is_some());
    assert!(store.get("../torso.png").is_none());

    let _ = std::fs::remove_dir_all(&root);
}
