//! Port definition for retrieving emoji payloads.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::GalleryError;

/// Port for the network transport behind the remote fetcher.
#[async_trait]
pub trait EmojiFetcherPort: Send + Sync {
    /// Retrieves the raw payload at `url`.
    ///
    /// Transport failures and non-success responses map to
    /// [`GalleryError::Fetch`].
    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, GalleryError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::io::Cursor;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Mock transport serving a fixed payload for every URL.
    pub struct MockEmojiFetcher {
        payload: Bytes,
        should_fail: AtomicBool,
        requests: Mutex<Vec<String>>,
    }

    impl MockEmojiFetcher {
        /// Serves `payload` for every request.
        pub fn serving(payload: impl Into<Bytes>) -> Self {
            Self {
                payload: payload.into(),
                should_fail: AtomicBool::new(false),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Serves a small valid PNG.
        pub fn with_sample_image() -> Self {
            Self::serving(sample_png())
        }

        /// Fails every request with a fetch error.
        pub fn failing() -> Self {
            let mock = Self::serving(Bytes::new());
            mock.set_should_fail(true);
            mock
        }

        /// Sets failure behavior.
        pub fn set_should_fail(&self, value: bool) {
            self.should_fail.store(value, Ordering::SeqCst);
        }

        /// URLs requested so far, in order.
        pub fn requested_urls(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EmojiFetcherPort for MockEmojiFetcher {
        async fn fetch_bytes(&self, url: &str) -> Result<Bytes, GalleryError> {
            self.requests.lock().unwrap().push(url.to_string());
            if self.should_fail.load(Ordering::SeqCst) {
                Err(GalleryError::fetch(url, "mock transport failure"))
            } else {
                Ok(self.payload.clone())
            }
        }
    }

    /// Encodes a 2x2 opaque red PNG.
    pub fn sample_png() -> Bytes {
        let pixels = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(pixels)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        Bytes::from(buf.into_inner())
    }
}
