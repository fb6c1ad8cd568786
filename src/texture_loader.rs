use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use tracing::{debug, warn};

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

fn extension(path: &Path) -> String {
    path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase()
}

// --- Image files of a directory, sorted by name ---
pub fn load_sorted_image_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir).with_context(|| format!("failed to read directory {}", dir.display()))?;

    for entry in entries {
        let path = entry.context("failed to read directory entry")?.path();
        if path.is_file() && IMAGE_EXTENSIONS.contains(&extension(&path).as_str()) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if paths.is_empty() {
        bail!("no image files found in directory {}", dir.display());
    }
    Ok(paths)
}

// EXIF orientation, 1 (upright) when missing or unreadable. Only JPEG carries it reliably.
fn exif_orientation(path: &Path, bytes: &[u8]) -> u16 {
    if !matches!(extension(path).as_str(), "jpg" | "jpeg") {
        return 1;
    }
    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => match exif.get_field(Tag::Orientation, In::PRIMARY).map(|f| &f.value) {
            Some(Value::Short(values)) => values.first().copied().unwrap_or(1),
            _ => 1,
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read EXIF data");
            1
        }
    }
}

// --- Load image, apply EXIF rotation, upload as texture ---
pub fn load_texture_with_exif_rotation(rl: &mut RaylibHandle, thread: &RaylibThread, path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let orientation = exif_orientation(path, &bytes);

    let mut image = Image::load_image_from_mem(&format!(".{}", extension(path)), &bytes)
        .map_err(|e| anyhow!("failed to decode {}: {e}", path.display()))?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise. Flips are ignored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        debug!(path = %path.display(), orientation, "applied EXIF rotation");
    }

    rl.load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("failed to create texture for {}: {e}", path.display()))
}
