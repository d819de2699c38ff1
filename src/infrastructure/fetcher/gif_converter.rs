//! Re-encoding of downloaded emoji as looping GIFs.

use std::io::Cursor;

use image::codecs::gif::{GifEncoder, Repeat};
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, Frame, ImageFormat, ImageResult};

/// Converts a WebP (animated or still) or any other decodable image into an
/// infinitely looping GIF.
///
/// The output carries no background colour; transparent pixels stay
/// transparent.
///
/// # Errors
/// Returns error if the payload cannot be decoded or the GIF cannot be encoded.
pub fn convert_to_gif(payload: &[u8]) -> ImageResult<Vec<u8>> {
    let frames = decode_frames(payload)?;

    let mut out = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut out);
        encoder.set_repeat(Repeat::Infinite)?;
        encoder.encode_frames(frames)?;
    }
    Ok(out)
}

fn decode_frames(payload: &[u8]) -> ImageResult<Vec<Frame>> {
    if image::guess_format(payload).ok() == Some(ImageFormat::WebP) {
        let decoder = WebPDecoder::new(Cursor::new(payload))?;
        if decoder.has_animation() {
            return decoder.into_frames().collect_frames();
        }
    }

    let still = image::load_from_memory(payload)?;
    Ok(vec![Frame::new(still.to_rgba8())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::sample_png;
    use image::codecs::gif::GifDecoder;
    use image::metadata::LoopCount;

    /// Three 2x2 frames (red, blue, green), looping forever.
    const ANIMATED_WEBP: &[u8] = include_bytes!("testdata/animated.webp");

    #[test]
    fn test_png_becomes_single_frame_gif() {
        let gif = convert_to_gif(&sample_png()).unwrap();

        assert!(gif.starts_with(b"GIF89a"));

        let frames = GifDecoder::new(Cursor::new(&gif))
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].buffer().dimensions(), (2, 2));
    }

    #[test]
    fn test_animated_webp_keeps_every_frame() {
        let decoder = WebPDecoder::new(Cursor::new(ANIMATED_WEBP)).unwrap();
        assert!(decoder.has_animation());

        let gif = convert_to_gif(ANIMATED_WEBP).unwrap();

        let decoder = GifDecoder::new(Cursor::new(&gif)).unwrap();
        assert!(matches!(decoder.loop_count(), LoopCount::Infinite));

        let frames = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 3);

        let dominant: Vec<usize> = frames
            .iter()
            .map(|frame| {
                assert_eq!(frame.buffer().dimensions(), (2, 2));
                let [r, g, b, _] = frame.buffer().get_pixel(1, 1).0;
                [r, g, b]
                    .iter()
                    .enumerate()
                    .max_by_key(|(_, channel)| **channel)
                    .map(|(index, _)| index)
                    .unwrap()
            })
            .collect();
        assert_eq!(dominant, vec![0, 2, 1]);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(convert_to_gif(b"<html>not found</html>").is_err());
        assert!(convert_to_gif(&[]).is_err());
    }
}
