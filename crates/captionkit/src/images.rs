//! # Image Sources
//!
//! The pipeline never decodes pixels; an [`ImageSource`] resolves an image id
//! to an opaque value, optionally passed through a transform.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    errors::{CKResult, CaptionError},
    types::CKHashMap,
};

/// Resolves image ids to image values.
///
/// Implementations are shared across loader threads.
pub trait ImageSource: Send + Sync {
    /// The loaded image value; cloned once per caption in full mode.
    type Image: Clone + Send;

    /// Load the image for `image_id`.
    ///
    /// ## Errors
    /// [`CaptionError::ImageNotFound`] when the resource is missing or unreadable.
    fn load_image(
        &self,
        image_id: &str,
    ) -> CKResult<Self::Image>;
}

impl<S: ImageSource + ?Sized> ImageSource for Arc<S> {
    type Image = S::Image;

    fn load_image(
        &self,
        image_id: &str,
    ) -> CKResult<Self::Image> {
        (**self).load_image(image_id)
    }
}

/// Undecoded image file contents.
pub type ImageBytes = Arc<[u8]>;

/// Reads `<image_dir>/<image_id>` from disk.
#[derive(Debug, Clone)]
pub struct DirectoryImageSource {
    image_dir: PathBuf,
}

impl DirectoryImageSource {
    /// Create a source rooted at `image_dir`.
    pub fn new<P: AsRef<Path>>(image_dir: P) -> Self {
        Self {
            image_dir: image_dir.as_ref().to_path_buf(),
        }
    }

    /// The image directory.
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// The path an image id resolves to; not checked for existence.
    pub fn image_path(
        &self,
        image_id: &str,
    ) -> PathBuf {
        self.image_dir.join(image_id)
    }
}

impl ImageSource for DirectoryImageSource {
    type Image = ImageBytes;

    fn load_image(
        &self,
        image_id: &str,
    ) -> CKResult<Self::Image> {
        let path = self.image_path(image_id);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes.into()),
            Err(err) => {
                log::debug!("failed to read {}: {err}", path.display());
                Err(CaptionError::ImageNotFound {
                    image_id: image_id.to_string(),
                    path,
                })
            }
        }
    }
}

/// Applies a transform to every image of an inner source.
#[derive(Clone)]
pub struct TransformedImageSource<S, F> {
    inner: S,

    transform: F,
}

impl<S, F> TransformedImageSource<S, F> {
    /// Wrap `inner` with `transform`.
    pub fn new(
        inner: S,
        transform: F,
    ) -> Self {
        Self { inner, transform }
    }

    /// The wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S, F, O> ImageSource for TransformedImageSource<S, F>
where
    S: ImageSource,
    F: Fn(S::Image) -> CKResult<O> + Send + Sync,
    O: Clone + Send,
{
    type Image = O;

    fn load_image(
        &self,
        image_id: &str,
    ) -> CKResult<Self::Image> {
        (self.transform)(self.inner.load_image(image_id)?)
    }
}

/// In-memory image table.
#[derive(Debug, Clone)]
pub struct MemoryImageSource<I> {
    images: CKHashMap<String, I>,
}

impl<I, K> FromIterator<(K, I)> for MemoryImageSource<I>
where
    K: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        Self {
            images: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<I> ImageSource for MemoryImageSource<I>
where
    I: Clone + Send + Sync,
{
    type Image = I;

    fn load_image(
        &self,
        image_id: &str,
    ) -> CKResult<Self::Image> {
        self.images
            .get(image_id)
            .cloned()
            .ok_or_else(|| CaptionError::ImageNotFound {
                image_id: image_id.to_string(),
                path: PathBuf::from(image_id),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use tempdir::TempDir;

    use super::*;

    #[test]
    fn test_directory_source() -> CKResult<()> {
        let dir = TempDir::new("captionkit-images")?;
        File::create(dir.path().join("1.jpg"))?.write_all(b"pixels")?;

        let source = DirectoryImageSource::new(dir.path());
        assert_eq!(&*source.load_image("1.jpg")?, b"pixels");

        match source.load_image("2.jpg") {
            Err(CaptionError::ImageNotFound { image_id, path }) => {
                assert_eq!(image_id, "2.jpg");
                assert_eq!(path, dir.path().join("2.jpg"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_transformed_source() {
        let source: MemoryImageSource<Vec<u8>> = [("a", vec![1u8, 2, 3])].into_iter().collect();
        let source = TransformedImageSource::new(source, |bytes: Vec<u8>| -> CKResult<Vec<f32>> {
            Ok(bytes.iter().map(|&b| b as f32 / 255.0).collect())
        });

        let image = source.load_image("a").unwrap();
        assert_eq!(image.len(), 3);
        assert!(matches!(
            source.load_image("b"),
            Err(CaptionError::ImageNotFound { .. })
        ));
    }

    #[test]
    fn test_transform_errors_propagate() {
        let source: MemoryImageSource<u8> = [("a", 1u8)].into_iter().collect();
        let source = TransformedImageSource::new(source, |_: u8| -> CKResult<u8> {
            Err(CaptionError::InvalidConfig("bad transform".to_string()))
        });
        assert!(matches!(
            source.load_image("a"),
            Err(CaptionError::InvalidConfig(_))
        ));
    }
}
