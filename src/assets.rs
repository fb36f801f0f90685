//! Image loading.
//!
//! Natively, paths are read from the filesystem relative to the working
//! directory. On the web they are fetched relative to the page. Either way
//! the bytes are decoded with `image` into tightly packed RGBA8.

use crate::error::GreetingError;

/// Color of the stand-in texture used when an image fails to load.
const PLACEHOLDER_RGBA: [u8; 4] = [200, 180, 190, 255];

/// Decoded RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes, row-major.
    pub rgba: Vec<u8>,
}

impl ImageData {
    /// 1x1 stand-in for a missing image.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::solid(PLACEHOLDER_RGBA)
    }

    /// 1x1 image of a single color.
    #[must_use]
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }

    /// Decode an encoded image (PNG or JPEG).
    ///
    /// # Errors
    ///
    /// Returns [`GreetingError::AssetLoad`] if the format is unsupported or
    /// the data is corrupt.
    pub fn decode(path: &str, bytes: &[u8]) -> Result<Self, GreetingError> {
        let image = image::load_from_memory(bytes).map_err(|e| {
            GreetingError::AssetLoad {
                path: path.to_owned(),
                reason: e.to_string(),
            }
        })?;
        let rgba = image.to_rgba8();
        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        })
    }

    /// The decoded image, or the placeholder with a warning.
    #[must_use]
    pub fn or_placeholder(path: &str, result: Result<Self, GreetingError>) -> Self {
        result.unwrap_or_else(|e| {
            log::warn!("{e}; using placeholder for {path}");
            Self::placeholder()
        })
    }
}

/// Read and decode an image from disk.
///
/// # Errors
///
/// Returns [`GreetingError::AssetLoad`] if the file cannot be read or
/// decoded.
pub fn load_image(path: &str) -> Result<ImageData, GreetingError> {
    let bytes = std::fs::read(path).map_err(|e| GreetingError::AssetLoad {
        path: path.to_owned(),
        reason: e.to_string(),
    })?;
    ImageData::decode(path, &bytes)
}

/// Load every path, substituting the placeholder for failures.
#[must_use]
pub fn load_images(paths: &[&str]) -> Vec<(String, ImageData)> {
    paths
        .iter()
        .map(|path| {
            let image = ImageData::or_placeholder(path, load_image(path));
            ((*path).to_owned(), image)
        })
        .collect()
}

#[cfg(feature = "web")]
pub use self::web::{fetch_bytes, fetch_images, fetch_text};

#[cfg(feature = "web")]
mod web {
    use js_sys::Uint8Array;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::Response;

    use super::ImageData;
    use crate::error::GreetingError;

    async fn fetch(url: &str) -> Result<Response, GreetingError> {
        let window = web_sys::window()
            .ok_or_else(|| GreetingError::Web("no window".into()))?;
        let response = JsFuture::from(window.fetch_with_str(url)).await?;
        let response: Response = response.dyn_into()?;
        if !response.ok() {
            return Err(GreetingError::AssetLoad {
                path: url.to_owned(),
                reason: format!("HTTP {}", response.status()),
            });
        }
        Ok(response)
    }

    /// Fetch a URL as bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not 2xx.
    pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, GreetingError> {
        let response = fetch(url).await?;
        let buffer = JsFuture::from(response.array_buffer()?).await?;
        Ok(Uint8Array::new(&buffer).to_vec())
    }

    /// Fetch a URL as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not 2xx.
    pub async fn fetch_text(url: &str) -> Result<String, GreetingError> {
        let response = fetch(url).await?;
        let text = JsFuture::from(response.text()?).await?;
        text.as_string()
            .ok_or_else(|| GreetingError::Web(format!("{url}: body is not text")))
    }

    /// Fetch and decode every path, substituting the placeholder for
    /// failures.
    pub async fn fetch_images(paths: &[&str]) -> Vec<(String, ImageData)> {
        let mut images = Vec::with_capacity(paths.len());
        for path in paths {
            let result = match fetch_bytes(path).await {
                Ok(bytes) => ImageData::decode(path, &bytes),
                Err(e) => Err(e),
            };
            images.push(((*path).to_owned(), ImageData::or_placeholder(path, result)));
        }
        images
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 3, image::Rgba([10, 20, 30, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_png_to_rgba() {
        let image = ImageData::decode("test.png", &png_bytes()).unwrap();
        assert_eq!((image.width, image.height), (2, 3));
        assert_eq!(image.rgba.len(), 2 * 3 * 4);
        assert_eq!(&image.rgba[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn garbage_is_an_asset_error() {
        let err = ImageData::decode("bad.jpg", b"not an image").unwrap_err();
        assert!(matches!(err, GreetingError::AssetLoad { ref path, .. } if path == "bad.jpg"));
    }

    #[test]
    fn missing_file_falls_back_to_placeholder() {
        let images = load_images(&["definitely/not/here.png"]);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].1, ImageData::placeholder());
    }
}
