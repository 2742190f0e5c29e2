//! The fixed catalog of images rendered from the logo.
//!
//! Every consumer (the generator, the manifest, the setup guide) iterates this
//! table; no other module encodes a size.

use std::fmt;

/// Pixel box of one output image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Square(u32),
    Rect { width: u32, height: u32 },
}

impl Dimension {
    pub fn width(&self) -> u32 {
        match *self {
            Dimension::Square(side) => side,
            Dimension::Rect { width, .. } => width,
        }
    }

    pub fn height(&self) -> u32 {
        match *self {
            Dimension::Square(side) => side,
            Dimension::Rect { height, .. } => height,
        }
    }
}

/// Formats as `"{width}x{height}"`, the manifest `sizes` syntax
impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width(), self.height())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Favicon,
    Standard,
    AppleTouch,
    Maskable,
    Social,
    Splash,
}

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSpec {
    pub file_name: &'static str,
    pub dimension: Dimension,
    pub category: Category,
}

impl SizeSpec {
    const fn square(file_name: &'static str, side: u32, category: Category) -> Self {
        Self {
            file_name,
            dimension: Dimension::Square(side),
            category,
        }
    }

    const fn rect(file_name: &'static str, width: u32, height: u32, category: Category) -> Self {
        Self {
            file_name,
            dimension: Dimension::Rect { width, height },
            category,
        }
    }

    pub fn is_maskable(&self) -> bool {
        self.category == Category::Maskable
    }

    /// Splash screens are rendered but never declared as manifest icons
    pub fn in_manifest(&self) -> bool {
        self.category != Category::Splash
    }

    pub fn is_ico(&self) -> bool {
        self.file_name.ends_with(".ico")
    }
}

use Category::*;

pub const SIZE_CATALOG: &[SizeSpec] = &[
    // Favicons
    SizeSpec::square("favicon-16x16.ico", 16, Favicon),
    SizeSpec::square("favicon-32x32.ico", 32, Favicon),
    // Standard icons
    SizeSpec::square("icon-48x48.png", 48, Standard),
    SizeSpec::square("icon-72x72.png", 72, Standard),
    SizeSpec::square("icon-96x96.png", 96, Standard),
    SizeSpec::square("icon-128x128.png", 128, Standard),
    SizeSpec::square("icon-144x144.png", 144, Standard),
    SizeSpec::square("icon-152x152.png", 152, Standard),
    SizeSpec::square("icon-192x192.png", 192, Standard),
    SizeSpec::square("icon-384x384.png", 384, Standard),
    SizeSpec::square("icon-512x512.png", 512, Standard),
    // Apple touch icons
    SizeSpec::square("apple-touch-icon-57x57.png", 57, AppleTouch),
    SizeSpec::square("apple-touch-icon-60x60.png", 60, AppleTouch),
    SizeSpec::square("apple-touch-icon-72x72.png", 72, AppleTouch),
    SizeSpec::square("apple-touch-icon-76x76.png", 76, AppleTouch),
    SizeSpec::square("apple-touch-icon-114x114.png", 114, AppleTouch),
    SizeSpec::square("apple-touch-icon-120x120.png", 120, AppleTouch),
    SizeSpec::square("apple-touch-icon-144x144.png", 144, AppleTouch),
    SizeSpec::square("apple-touch-icon-152x152.png", 152, AppleTouch),
    SizeSpec::square("apple-touch-icon-180x180.png", 180, AppleTouch),
    // Maskable icons
    SizeSpec::square("maskable-icon-192x192.png", 192, Maskable),
    SizeSpec::square("maskable-icon-512x512.png", 512, Maskable),
    // Social previews
    SizeSpec::rect("og-image.png", 1200, 630, Social),
    SizeSpec::rect("twitter-image.png", 1200, 600, Social),
    // Phone splash screens
    SizeSpec::rect("splash-640x1136.png", 640, 1136, Splash),
    SizeSpec::rect("splash-750x1334.png", 750, 1334, Splash),
    SizeSpec::rect("splash-1242x2208.png", 1242, 2208, Splash),
    SizeSpec::rect("splash-1125x2436.png", 1125, 2436, Splash),
    // Tablet splash screens
    SizeSpec::rect("splash-1536x2048.png", 1536, 2048, Splash),
    SizeSpec::rect("splash-1668x2224.png", 1668, 2224, Splash),
    SizeSpec::rect("splash-2048x2732.png", 2048, 2732, Splash),
];

/// Catalog entries declared in the manifest, in catalog order
pub fn manifest_entries() -> impl Iterator<Item = &'static SizeSpec> {
    SIZE_CATALOG.iter().filter(|spec| spec.in_manifest())
}

pub fn splash_entries() -> impl Iterator<Item = &'static SizeSpec> {
    SIZE_CATALOG
        .iter()
        .filter(|spec| spec.category == Category::Splash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_file_names_are_unique() {
        let names: HashSet<_> = SIZE_CATALOG.iter().map(|s| s.file_name).collect();
        assert_eq!(names.len(), SIZE_CATALOG.len());
    }

    #[test]
    fn test_dimensions_are_positive() {
        for spec in SIZE_CATALOG {
            assert!(spec.dimension.width() > 0, "{}", spec.file_name);
            assert!(spec.dimension.height() > 0, "{}", spec.file_name);
        }
    }

    #[test]
    fn test_dimension_display() {
        assert_eq!(Dimension::Square(192).to_string(), "192x192");
        assert_eq!(
            Dimension::Rect {
                width: 1200,
                height: 630
            }
            .to_string(),
            "1200x630"
        );
    }

    #[test]
    fn test_catalog_shape() {
        let count = |category| {
            SIZE_CATALOG
                .iter()
                .filter(|s| s.category == category)
                .count()
        };
        assert_eq!(count(Category::Favicon), 2);
        assert_eq!(count(Category::Standard), 9);
        assert_eq!(count(Category::AppleTouch), 9);
        assert_eq!(count(Category::Maskable), 2);
        assert_eq!(count(Category::Social), 2);
        assert_eq!(count(Category::Splash), 7);
    }

    #[test]
    fn test_splash_screens_are_excluded_from_manifest() {
        assert!(manifest_entries().all(|s| s.category != Category::Splash));
        assert_eq!(
            manifest_entries().count() + splash_entries().count(),
            SIZE_CATALOG.len()
        );
    }

    #[test]
    fn test_square_names_carry_their_size() {
        for spec in SIZE_CATALOG {
            if let Dimension::Square(_) = spec.dimension {
                assert!(
                    spec.file_name.contains(&spec.dimension.to_string()),
                    "{} does not mention {}",
                    spec.file_name,
                    spec.dimension
                );
            }
        }
    }
}
