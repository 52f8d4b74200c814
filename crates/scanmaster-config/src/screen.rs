use std::fmt;
use std::str::FromStr;

use scanmaster_types::Controls;
use serde::{Deserialize, Serialize};

/// Named layouts of the capture screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenVariant {
    Full,
    TextOnly,
    CameraOnly,
    GalleryOnly,
}

impl FromStr for ScreenVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(ScreenVariant::Full),
            "text-only" | "text_only" => Ok(ScreenVariant::TextOnly),
            "camera-only" | "camera_only" => Ok(ScreenVariant::CameraOnly),
            "gallery-only" | "gallery_only" => Ok(ScreenVariant::GalleryOnly),
            other => Err(format!("unknown screen variant '{other}'")),
        }
    }
}

impl fmt::Display for ScreenVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScreenVariant::Full => "full",
            ScreenVariant::TextOnly => "text-only",
            ScreenVariant::CameraOnly => "camera-only",
            ScreenVariant::GalleryOnly => "gallery-only",
        };
        f.write_str(name)
    }
}

fn default_variant() -> ScreenVariant {
    ScreenVariant::TextOnly
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    #[serde(default = "default_variant")]
    pub variant: ScreenVariant,
    /// Keep and display the captured image next to the text
    pub show_image: bool,
    #[serde(default = "default_true")]
    pub show_erase: bool,
    #[serde(default = "default_true")]
    pub show_copy: bool,
    #[serde(default = "default_true")]
    pub show_camera: bool,
    #[serde(default = "default_true")]
    pub show_gallery: bool,
}

impl ScreenConfig {
    pub fn for_variant(variant: ScreenVariant) -> Self {
        let (show_image, show_camera, show_gallery) = match variant {
            ScreenVariant::Full => (true, true, true),
            ScreenVariant::TextOnly => (false, true, true),
            ScreenVariant::CameraOnly => (true, true, false),
            ScreenVariant::GalleryOnly => (true, false, true),
        };

        Self {
            variant,
            show_image,
            show_erase: true,
            show_copy: true,
            show_camera,
            show_gallery,
        }
    }

    pub fn controls(&self) -> Controls {
        Controls {
            camera: self.show_camera,
            gallery: self.show_gallery,
            copy: self.show_copy,
            erase: self.show_erase,
            image: self.show_image,
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self::for_variant(default_variant())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_parsing() {
        assert_eq!("Full".parse::<ScreenVariant>(), Ok(ScreenVariant::Full));
        assert_eq!(
            "gallery_only".parse::<ScreenVariant>(),
            Ok(ScreenVariant::GalleryOnly)
        );
        assert!("sideways".parse::<ScreenVariant>().is_err());
    }

    #[test]
    fn test_variant_controls() {
        let camera = ScreenConfig::for_variant(ScreenVariant::CameraOnly).controls();
        assert!(camera.camera && !camera.gallery && camera.image);

        let text = ScreenConfig::for_variant(ScreenVariant::TextOnly).controls();
        assert!(text.camera && text.gallery && !text.image);
        assert!(text.copy && text.erase);
    }
}
