//! GIF animation encoding

use crate::output::{ensure_parent_dir, OutputError};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Default duration per frame in milliseconds.
pub const DEFAULT_DURATION_MS: u32 = 100;

/// Playback parameters for the encoded animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackOptions {
    /// Duration per frame in milliseconds
    pub duration_ms: u32,
    /// Number of loops; 0 loops forever
    pub loop_count: u16,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self { duration_ms: DEFAULT_DURATION_MS, loop_count: 0 }
    }
}

impl PlaybackOptions {
    /// GIF uses centiseconds (1/100th of a second) for delays.
    /// Durations below 10ms are clamped to 1 centisecond.
    pub fn delay_cs(&self) -> u16 {
        (self.duration_ms / 10).clamp(1, u16::MAX as u32) as u16
    }

    fn delay(&self) -> Delay {
        Delay::from_numer_denom_ms(self.delay_cs() as u32 * 10, 1)
    }

    fn repeat(&self) -> Repeat {
        match self.loop_count {
            0 => Repeat::Infinite,
            n => Repeat::Finite(n),
        }
    }
}

/// Streaming GIF writer: frames are encoded as they are pushed.
pub struct GifSink<W: Write> {
    encoder: GifEncoder<W>,
    delay: Delay,
    frames_written: usize,
}

impl GifSink<BufWriter<File>> {
    /// Create the output file (and parent directories) and write the header.
    pub fn create(path: &Path, options: &PlaybackOptions) -> Result<Self, OutputError> {
        ensure_parent_dir(path)?;
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), options)
    }
}

impl<W: Write> GifSink<W> {
    /// Wrap an arbitrary writer.
    pub fn new(writer: W, options: &PlaybackOptions) -> Result<Self, OutputError> {
        let mut encoder = GifEncoder::new(writer);
        encoder.set_repeat(options.repeat())?;
        Ok(Self { encoder, delay: options.delay(), frames_written: 0 })
    }

    /// Encode one frame.
    pub fn push(&mut self, frame: &RgbImage) -> Result<(), OutputError> {
        let rgba = DynamicImage::ImageRgb8(frame.clone()).into_rgba8();
        self.encoder.encode_frame(Frame::from_parts(rgba, 0, 0, self.delay))?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::gif::GifDecoder;
    use image::{AnimationDecoder, Rgb};
    use std::io::BufReader;
    use tempfile::tempdir;

    /// Create a simple test frame with a solid color
    fn create_test_frame(width: u32, height: u32, color: Rgb<u8>) -> RgbImage {
        RgbImage::from_pixel(width, height, color)
    }

    fn write_gif(frames: &[RgbImage], options: &PlaybackOptions, path: &Path) {
        let mut sink = GifSink::create(path, options).unwrap();
        for frame in frames {
            sink.push(frame).unwrap();
        }
    }

    fn decode_frames(path: &Path) -> Vec<Frame> {
        let file = BufReader::new(File::open(path).unwrap());
        let decoder = GifDecoder::new(file).unwrap();
        decoder.into_frames().collect_frames().unwrap()
    }

    #[test]
    fn test_write_gif_creates_valid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.gif");

        let frames = vec![
            create_test_frame(2, 2, Rgb([255, 0, 0])), // Red
            create_test_frame(2, 2, Rgb([0, 255, 0])), // Green
        ];

        write_gif(&frames, &PlaybackOptions::default(), &path);
        assert!(path.exists());

        let decoded = decode_frames(&path);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].buffer().get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(decoded[1].buffer().get_pixel(1, 1).0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_write_gif_frame_duration() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("duration_test.gif");

        let frames = vec![
            create_test_frame(4, 4, Rgb([255, 255, 0])),
            create_test_frame(4, 4, Rgb([0, 255, 255])),
        ];

        let options = PlaybackOptions { duration_ms: 500, loop_count: 0 };
        write_gif(&frames, &options, &path);

        let decoded = decode_frames(&path);
        assert_eq!(decoded[0].delay().numer_denom_ms(), (500, 1));
    }

    #[test]
    fn test_write_gif_finite_loop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("finite.gif");
        let frames = vec![
            create_test_frame(2, 2, Rgb([255, 0, 0])),
            create_test_frame(2, 2, Rgb([0, 0, 255])),
        ];
        let options = PlaybackOptions { duration_ms: 100, loop_count: 3 };
        write_gif(&frames, &options, &path);
        assert!(image::open(&path).is_ok());
    }

    #[test]
    fn test_write_gif_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dirs/test.gif");

        let frames = vec![create_test_frame(2, 2, Rgb([255, 0, 0]))];
        write_gif(&frames, &PlaybackOptions::default(), &path);
        assert!(path.exists());
    }

    #[test]
    fn test_delay_clamping() {
        assert_eq!(PlaybackOptions { duration_ms: 5, loop_count: 0 }.delay_cs(), 1);
        assert_eq!(PlaybackOptions { duration_ms: 100, loop_count: 0 }.delay_cs(), 10);
        assert_eq!(PlaybackOptions { duration_ms: 1_000_000_000, loop_count: 0 }.delay_cs(), u16::MAX);
    }

    #[test]
    fn test_repeat_mapping() {
        assert!(matches!(PlaybackOptions::default().repeat(), Repeat::Infinite));
        assert!(matches!(
            PlaybackOptions { duration_ms: 100, loop_count: 2 }.repeat(),
            Repeat::Finite(2)
        ));
    }

    #[test]
    fn test_sink_counts_frames() {
        let mut buf = Vec::new();
        {
            let mut sink = GifSink::new(&mut buf, &PlaybackOptions::default()).unwrap();
            sink.push(&create_test_frame(1, 1, Rgb([1, 2, 3]))).unwrap();
            sink.push(&create_test_frame(1, 1, Rgb([4, 5, 6]))).unwrap();
            assert_eq!(sink.frames_written(), 2);
        }
        assert!(buf.starts_with(b"GIF89a"));
    }
}
