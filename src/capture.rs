//! Capture rendered frames to generate a video file

use log::info;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::raster::RasterSurface;
use crate::surface::Surface;

pub const DEFAULT_PATH: &str = "./frame_buffer.bin";

/// Appends raw RGBA8 frames, row by row, to a single file.
pub struct FrameCapture {
    path: PathBuf,
    size: (u32, u32),
    frames: u64,
    writer: BufWriter<File>,
}

impl FrameCapture {
    /// Truncates any previous capture at `path`.
    pub fn create(path: impl AsRef<Path>, width: u32, height: u32) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;

        info!(
            "Capture info: {{ path: {}, width: {}, height: {}, format: Rgba8 }}",
            path.display(),
            width,
            height
        );

        Ok(Self {
            path,
            size: (width, height),
            frames: 0,
            writer: BufWriter::new(file),
        })
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_frame(&mut self, surface: &RasterSurface) -> io::Result<()> {
        let size = (surface.width(), surface.height());
        if size != self.size {
            info!("Capture size changed to {}x{}", size.0, size.1);
            self.size = size;
        }

        self.writer.write_all(surface.as_bytes())?;
        self.frames += 1;
        Ok(())
    }

    pub fn finish(mut self) -> io::Result<u64> {
        self.writer.flush()?;
        Ok(self.frames)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::particle::Color;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("confetti-{}-{name}.bin", std::process::id()))
    }

    #[test]
    fn frames_are_appended_whole() {
        let path = temp_path("append");
        let mut surface = RasterSurface::new(3, 2);
        let mut capture = FrameCapture::create(&path, 3, 2).unwrap();

        capture.write_frame(&surface).unwrap();
        surface.set_fill(Color::rgb(9, 8, 7));
        surface.fill_rect(Vec2::ZERO, Vec2::new(3.0, 2.0));
        capture.write_frame(&surface).unwrap();
        assert_eq!(capture.finish().unwrap(), 2);

        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(bytes.len(), 2 * 3 * 2 * 4);
        assert!(bytes[..24].iter().all(|&b| b == 0));
        assert_eq!(&bytes[24..28], &[9, 8, 7, 255]);
    }

    #[test]
    fn resized_frames_keep_their_own_size() {
        let path = temp_path("resize");
        let mut surface = RasterSurface::new(2, 2);
        let mut capture = FrameCapture::create(&path, 2, 2).unwrap();

        capture.write_frame(&surface).unwrap();
        surface.resize(4, 1);
        capture.write_frame(&surface).unwrap();
        assert_eq!(capture.frames(), 2);
        assert_eq!(capture.path(), path.as_path());
        capture.finish().unwrap();

        let len = std::fs::metadata(&path).unwrap().len();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(len, (2 * 2 + 4) * 4);
    }
}
