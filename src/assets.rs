use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::config::GameConfig;
use crate::draw::SpriteKind;
use crate::game::EntitySizes;
use crate::geometry::Size;

/// The bitmaps the game draws, decoded once at startup
pub struct SpriteSheet {
    starship: RgbaImage,
    meteorite: RgbaImage,
    background: RgbaImage,
}

impl SpriteSheet {
    /// Loads every bitmap named in `config`. The background is stretched to
    /// the screen size.
    pub fn load(config: &GameConfig) -> Result<Self> {
        let assets = &config.assets;
        let background = load_image(&assets.background)?;
        let background = imageops::resize(
            &background,
            config.screen_width,
            config.screen_height,
            FilterType::Triangle,
        );
        Ok(Self::from_images(
            load_image(&assets.starship)?,
            load_image(&assets.meteorite)?,
            background,
        ))
    }

    pub fn from_images(starship: RgbaImage, meteorite: RgbaImage, background: RgbaImage) -> Self {
        Self {
            starship,
            meteorite,
            background,
        }
    }

    pub fn get(&self, sprite: SpriteKind) -> &RgbaImage {
        match sprite {
            SpriteKind::Starship => &self.starship,
            SpriteKind::Meteorite => &self.meteorite,
            SpriteKind::Background => &self.background,
        }
    }

    pub fn size_of(&self, sprite: SpriteKind) -> Size {
        let (width, height) = self.get(sprite).dimensions();
        Size::new(width as f32, height as f32)
    }

    /// Hitboxes taken from the bitmaps, unless the config pins the meteorite size
    pub fn entity_sizes(&self, config: &GameConfig) -> EntitySizes {
        EntitySizes {
            craft: self.size_of(SpriteKind::Starship),
            hazard: config
                .fixed_hazard_size()
                .unwrap_or_else(|| self.size_of(SpriteKind::Meteorite)),
        }
    }
}

fn load_image(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path)
        .wrap_err_with(|| format!("failed to load image {}", path.display()))?;
    Ok(image.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssetPaths;
    use std::path::PathBuf;

    fn sheet() -> SpriteSheet {
        SpriteSheet::from_images(
            RgbaImage::new(80, 70),
            RgbaImage::new(50, 40),
            RgbaImage::new(713, 950),
        )
    }

    #[test]
    fn test_sizes_come_from_bitmaps() {
        let sizes = sheet().entity_sizes(&GameConfig::default());
        assert_eq!(sizes.craft, Size::new(80.0, 70.0));
        assert_eq!(sizes.hazard, Size::new(50.0, 40.0));
    }

    #[test]
    fn test_configured_hazard_size_wins() {
        let config = GameConfig {
            hazard_size: Some([64, 64]),
            ..GameConfig::default()
        };
        let sizes = sheet().entity_sizes(&config);
        assert_eq!(sizes.hazard, Size::new(64.0, 64.0));
        assert_eq!(sizes.craft, Size::new(80.0, 70.0));
    }

    #[test]
    fn test_missing_asset_is_fatal() {
        let config = GameConfig {
            assets: AssetPaths {
                starship: PathBuf::from("missing/starship.png"),
                ..AssetPaths::default()
            },
            ..GameConfig::default()
        };
        assert!(SpriteSheet::load(&config).is_err());
    }

    #[test]
    fn test_bundled_assets_load() {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
        let defaults = AssetPaths::default();
        let config = GameConfig {
            assets: AssetPaths {
                starship: manifest.join(defaults.starship),
                meteorite: manifest.join(defaults.meteorite),
                background: manifest.join(defaults.background),
            },
            ..GameConfig::default()
        };
        let sheet = SpriteSheet::load(&config).unwrap();
        assert_eq!(
            sheet.size_of(SpriteKind::Background),
            Size::new(713.0, 950.0)
        );
    }
}
