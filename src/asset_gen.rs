use crate::sizes::{Dimension, SizeSpec, SIZE_CATALOG};
use image::{
    codecs::{
        ico::{IcoEncoder, IcoFrame},
        png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    },
    imageops::FilterType,
    ColorType, DynamicImage, ImageBuffer, ImageEncoder, ImageError, Rgba, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Smallest accepted logo side, in pixels
pub const MIN_SOURCE_SIZE: u32 = 512;

/// Fill for the area the contain-fit leaves uncovered
const TRANSPARENT: Rgba<u8> = Rgba([255, 255, 255, 0]);

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("source image `{0}` does not exist")]
    SourceNotFound(PathBuf),

    #[error("source image too small: {width}x{height}, both sides must be at least {MIN_SOURCE_SIZE}px")]
    SourceTooSmall { width: u32, height: u32 },

    #[error("`{0}` is not a supported raster image")]
    UnsupportedFormat(PathBuf),

    #[error("failed to read source image `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create output directory `{path}`")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write `{file_name}`")]
    WriteFailure {
        file_name: String,
        #[source]
        source: ImageError,
    },
}

/// The decoded logo, already checked against [`MIN_SOURCE_SIZE`]
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub path: PathBuf,
    image: DynamicImage,
}

impl SourceImage {
    pub fn open(path: &Path) -> Result<Self, GenerationError> {
        let reader = image::io::Reader::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => GenerationError::SourceNotFound(path.to_path_buf()),
            _ => GenerationError::Read {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        let reader = reader
            .with_guessed_format()
            .map_err(|e| GenerationError::Read {
                path: path.to_path_buf(),
                source: e,
            })?;
        if reader.format().is_none() {
            return Err(GenerationError::UnsupportedFormat(path.to_path_buf()));
        }
        let image = reader.decode().map_err(|e| match e {
            ImageError::IoError(source) => GenerationError::Read {
                path: path.to_path_buf(),
                source,
            },
            _ => GenerationError::UnsupportedFormat(path.to_path_buf()),
        })?;

        Self::from_image(path, image)
    }

    pub fn from_image(path: &Path, image: DynamicImage) -> Result<Self, GenerationError> {
        let (width, height) = (image.width(), image.height());
        if width < MIN_SOURCE_SIZE || height < MIN_SOURCE_SIZE {
            return Err(GenerationError::SourceTooSmall { width, height });
        }
        Ok(Self {
            path: path.to_path_buf(),
            image,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// One file written by the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAsset {
    pub file_name: &'static str,
    pub dimension: Dimension,
    pub directory: PathBuf,
}

impl GeneratedAsset {
    pub fn path(&self) -> PathBuf {
        self.directory.join(self.file_name)
    }
}

/// Render the whole size catalog from the logo at `source_path`.
///
/// The logo is validated before anything touches the disk. Entries are then
/// written in catalog order; the first failing entry stops the run and the
/// files written before it are left in place.
pub fn generate(
    source_path: &Path,
    output_dir: &Path,
) -> Result<Vec<GeneratedAsset>, GenerationError> {
    let source = SourceImage::open(source_path)?;
    log!("assets"; "Loaded {} ({}x{})", source.path.display(), source.width(), source.height());
    generate_entries(&source, output_dir, SIZE_CATALOG)
}

/// Render `entries` from an already validated source
pub fn generate_entries(
    source: &SourceImage,
    output_dir: &Path,
    entries: &[SizeSpec],
) -> Result<Vec<GeneratedAsset>, GenerationError> {
    create_dir_all(output_dir).map_err(|e| GenerationError::CreateDir {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let mut generated = Vec::with_capacity(entries.len());
    for spec in entries {
        let canvas = contain_fit(&source.image, spec.dimension);
        let output_path = output_dir.join(spec.file_name);

        let written = if spec.is_ico() {
            save_ico(&canvas, &output_path)
        } else {
            save_png(&canvas, &output_path)
        };
        written.map_err(|e| GenerationError::WriteFailure {
            file_name: spec.file_name.to_string(),
            source: e,
        })?;

        log!("assets"; "✓ Generated {}", spec.file_name);
        generated.push(GeneratedAsset {
            file_name: spec.file_name,
            dimension: spec.dimension,
            directory: output_dir.to_path_buf(),
        });
    }

    log!("assets"; "✓ Generated {} images in {}", generated.len(), output_dir.display());
    Ok(generated)
}

/// Scale uniformly so the whole image fits the box, then center it on a
/// transparent canvas of exactly the box size.
pub fn contain_fit(source: &DynamicImage, dimension: Dimension) -> RgbaImage {
    let (width, height) = (dimension.width(), dimension.height());
    let resized = source.resize(width, height, FilterType::Lanczos3).to_rgba8();

    let x = (width - resized.width().min(width)) / 2;
    let y = (height - resized.height().min(height)) / 2;

    let mut canvas = ImageBuffer::from_pixel(width, height, TRANSPARENT);
    image::imageops::replace(&mut canvas, &resized, x.into(), y.into());
    canvas
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<(), ImageError> {
    let mut out_file = BufWriter::new(File::create(path)?);
    write_png(image.as_raw(), &mut out_file, image.width(), image.height())?;
    out_file.flush()?;
    Ok(())
}

/// A single-frame ICO whose frame is PNG encoded
fn save_ico(image: &RgbaImage, path: &Path) -> Result<(), ImageError> {
    let mut buf = Vec::new();
    write_png(image.as_raw(), &mut buf, image.width(), image.height())?;
    let frame = IcoFrame::with_encoded(buf, image.width(), image.height(), ColorType::Rgba8)?;

    let mut out_file = BufWriter::new(File::create(path)?);
    IcoEncoder::new(&mut out_file).encode_images(&[frame])?;
    out_file.flush()?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, width: u32, height: u32) -> Result<(), ImageError> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, width, height, ColorType::Rgba8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizes::Category;

    fn solid(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(ImageBuffer::from_pixel(
            width,
            height,
            Rgba([200, 30, 30, 255]),
        ))
    }

    #[test]
    fn test_contain_fit_pads_wide_source_vertically() {
        let canvas = contain_fit(&solid(1000, 500), Dimension::Square(100));
        assert_eq!(canvas.dimensions(), (100, 100));
        // top band is padding, center is the logo
        assert_eq!(canvas.get_pixel(50, 2)[3], 0);
        assert_eq!(canvas.get_pixel(50, 50)[3], 255);
    }

    #[test]
    fn test_contain_fit_pads_square_source_horizontally() {
        let canvas = contain_fit(
            &solid(512, 512),
            Dimension::Rect {
                width: 1200,
                height: 630,
            },
        );
        assert_eq!(canvas.dimensions(), (1200, 630));
        assert_eq!(canvas.get_pixel(10, 315)[3], 0);
        assert_eq!(canvas.get_pixel(600, 315)[3], 255);
        assert_eq!(canvas.get_pixel(1190, 315)[3], 0);
    }

    #[test]
    fn test_minimum_size_gate() {
        let err = SourceImage::from_image(Path::new("logo.png"), solid(511, 511)).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::SourceTooSmall {
                width: 511,
                height: 511
            }
        ));
        assert!(SourceImage::from_image(Path::new("logo.png"), solid(512, 512)).is_ok());
        // one short side is enough to fail
        assert!(SourceImage::from_image(Path::new("logo.png"), solid(2000, 300)).is_err());
    }

    #[test]
    fn test_ico_entries_decode_back_to_their_size() {
        let dir = tempfile::tempdir().unwrap();
        let source = SourceImage::from_image(Path::new("logo.png"), solid(512, 512)).unwrap();
        let favicons: Vec<SizeSpec> = SIZE_CATALOG
            .iter()
            .filter(|s| s.category == Category::Favicon)
            .copied()
            .collect();

        let assets = generate_entries(&source, dir.path(), &favicons).unwrap();
        assert_eq!(assets.len(), 2);
        for asset in assets {
            let decoded = image::open(asset.path()).unwrap();
            assert_eq!(decoded.width(), asset.dimension.width());
            assert_eq!(decoded.height(), asset.dimension.height());
        }
    }
}
