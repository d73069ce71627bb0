//! Sprite and sound assets with graceful fallback
//!
//! The simulation only cares about declared sprite sizes and optional
//! collision masks. Missing or broken files degrade to placeholder geometry
//! (or silence) and are logged, never fatal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glam::Vec2;

use crate::consts::*;
use crate::error::AssetError;
use crate::sim::{Collider, Mask};
use crate::tuning::Tuning;

/// Sprite files and the size each is drawn at
pub const PLAYER_SPRITE: (&str, f32, f32) = ("ong.png", PLAYER_WIDTH, PLAYER_HEIGHT);
pub const STONE_SPRITE: (&str, f32, f32) = ("stone.png", STONE_WIDTH, STONE_HEIGHT);
pub const ROAD_SPRITE: (&str, f32, f32) = ("road.png", 400.0, ROAD_HEIGHT);
pub const BG_DAY_SPRITE: (&str, f32, f32) = ("bg_day.png", SCREEN_WIDTH, SCREEN_HEIGHT);
pub const BG_NIGHT_SPRITE: (&str, f32, f32) = ("bg_night.png", SCREEN_WIDTH, SCREEN_HEIGHT);

/// A sprite at its declared on-screen size
#[derive(Debug, Clone)]
pub struct Sprite {
    pub name: String,
    /// Image file, `None` when the placeholder is in use
    pub texture: Option<PathBuf>,
    pub size: Vec2,
    /// Opaque-pixel mask resized to `size`
    pub mask: Option<Mask>,
}

impl Sprite {
    pub fn placeholder(name: &str, size: Vec2) -> Self {
        Self {
            name: name.to_string(),
            texture: None,
            size,
            mask: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.texture.is_none()
    }
}

/// Everything the game draws
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    pub root: PathBuf,
    pub player: Sprite,
    pub stone: Sprite,
    pub road: Sprite,
    pub bg_day: Sprite,
    pub bg_night: Sprite,
}

impl AssetCatalog {
    /// Load from a directory; every failure falls back to a placeholder
    pub fn load(root: &Path) -> Self {
        let sprite = |(file, w, h): (&str, f32, f32)| {
            load_sprite(root, file, Vec2::new(w, h)).unwrap_or_else(|e| {
                log::warn!("Using placeholder for {}: {}", file, e);
                Sprite::placeholder(file, Vec2::new(w, h))
            })
        };

        let catalog = Self {
            root: root.to_path_buf(),
            player: sprite(PLAYER_SPRITE),
            stone: sprite(STONE_SPRITE),
            road: sprite(ROAD_SPRITE),
            bg_day: sprite(BG_DAY_SPRITE),
            bg_night: sprite(BG_NIGHT_SPRITE),
        };
        log::info!(
            "Assets loaded from {} ({} placeholders)",
            root.display(),
            catalog.placeholder_count()
        );
        catalog
    }

    /// All placeholders, no disk access
    pub fn placeholders() -> Self {
        let p = |(file, w, h): (&str, f32, f32)| Sprite::placeholder(file, Vec2::new(w, h));
        Self {
            root: PathBuf::new(),
            player: p(PLAYER_SPRITE),
            stone: p(STONE_SPRITE),
            road: p(ROAD_SPRITE),
            bg_day: p(BG_DAY_SPRITE),
            bg_night: p(BG_NIGHT_SPRITE),
        }
    }

    pub fn placeholder_count(&self) -> usize {
        [
            &self.player,
            &self.stone,
            &self.road,
            &self.bg_day,
            &self.bg_night,
        ]
        .iter()
        .filter(|s| s.is_placeholder())
        .count()
    }

    /// Collision shapes: masks when both sprites have one, bounding boxes otherwise.
    /// Masks are resampled to the tuned sprite sizes so they cover the collision rects.
    pub fn collider(&self, tuning: &Tuning) -> Collider {
        let fit = |mask: &Option<Mask>, w: f32, h: f32| {
            mask.as_ref()
                .map(|m| m.resized(w.max(0.0).round() as u32, h.max(0.0).round() as u32))
        };
        Collider::with_masks(
            fit(&self.player.mask, tuning.player_width, tuning.player_height),
            fit(&self.stone.mask, tuning.stone_width, tuning.stone_height),
        )
    }
}

/// Load one sprite. The image must exist; a `<stem>.mask` sidecar is optional,
/// but a broken one is an error.
pub fn load_sprite(root: &Path, file: &str, size: Vec2) -> Result<Sprite, AssetError> {
    let path = root.join(file);
    match fs::metadata(&path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(AssetError::Missing { path }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(AssetError::Missing { path }),
        Err(source) => return Err(AssetError::Io { path, source }),
    }

    let mask = load_mask(&path.with_extension("mask"), size)?;
    Ok(Sprite {
        name: file.to_string(),
        texture: Some(path),
        size,
        mask,
    })
}

/// Parse a text mask and resize it to the sprite's declared size
pub fn load_mask(path: &Path, size: Vec2) -> Result<Option<Mask>, AssetError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(AssetError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let mask = Mask::parse(&text).map_err(|reason| AssetError::MalformedMask {
        path: path.to_path_buf(),
        reason,
    })?;
    Ok(Some(mask.resized(size.x as u32, size.y as u32)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ong-jump-assets-{}-{}", tag, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_assets_fall_back() {
        let catalog = AssetCatalog::load(Path::new("/definitely/not/an/asset/dir"));
        assert_eq!(catalog.placeholder_count(), 5);
        assert_eq!(catalog.player.size, Vec2::new(80.0, 80.0));
        assert!(!catalog.collider(&Tuning::default()).uses_masks());
    }

    #[test]
    fn test_sprite_with_mask() {
        let dir = temp_dir("mask");
        fs::write(dir.join("ong.png"), b"png").unwrap();
        fs::write(dir.join("ong.mask"), "##\n#.\n").unwrap();
        fs::write(dir.join("stone.png"), b"png").unwrap();
        fs::write(dir.join("stone.mask"), "#\n").unwrap();

        let catalog = AssetCatalog::load(&dir);
        assert!(!catalog.player.is_placeholder());
        let mask = catalog.player.mask.as_ref().unwrap();
        assert_eq!((mask.width(), mask.height()), (80, 80));
        assert!(mask.get(0, 79));
        assert!(!mask.get(79, 79));
        assert!(catalog.collider(&Tuning::default()).uses_masks());
    }

    #[test]
    fn test_broken_mask_is_an_error() {
        let dir = temp_dir("broken");
        fs::write(dir.join("stone.png"), b"png").unwrap();
        fs::write(dir.join("stone.mask"), "#?#\n").unwrap();
        let err = load_sprite(&dir, "stone.png", Vec2::new(60.0, 32.0)).unwrap_err();
        assert!(matches!(err, AssetError::MalformedMask { .. }));

        // The catalog degrades to a placeholder instead
        let catalog = AssetCatalog::load(&dir);
        assert!(catalog.stone.is_placeholder());
    }

    #[test]
    fn test_masks_follow_tuned_sprite_sizes() {
        use crate::sim::{Obstacle, ObstacleSet, Rect};

        let dir = temp_dir("tuned");
        fs::write(dir.join("ong.png"), b"png").unwrap();
        fs::write(dir.join("ong.mask"), "#\n").unwrap();
        fs::write(dir.join("stone.png"), b"png").unwrap();
        fs::write(dir.join("stone.mask"), "#\n").unwrap();
        let catalog = AssetCatalog::load(&dir);

        let tuning = Tuning {
            player_width: 160.0,
            player_height: 160.0,
            ..Tuning::default()
        };
        let collider = catalog.collider(&tuning);
        assert!(collider.uses_masks());

        // Stone overlaps only the part of the player beyond the default 80px sprite
        let player = Rect::from_midbottom(tuning.player_x, tuning.ground_y, Vec2::new(160.0, 160.0));
        let mut set = ObstacleSet::new();
        set.push(Obstacle {
            id: 3,
            x: player.right() - 50.0,
            size: Vec2::new(tuning.stone_width, tuning.stone_height),
            speed_offset: 0.0,
            base_speed: 0.0,
        });
        assert_eq!(collider.check(&player, &set, tuning.ground_y), Some(3));
    }
}
