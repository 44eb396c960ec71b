use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    foundation::error::{SketchError, SketchResult},
    render::{FrameRGBA, unpremultiply_in_place},
};

/// Name of an exported image: `<prefix>_<hash>.png`, or `<prefix>_<id>_<hash>.png` when a
/// zero-padded forced id is given.
pub fn export_file_name(prefix: &str, hash: &str, padded_id: Option<&str>) -> String {
    match padded_id {
        Some(id) => format!("{prefix}_{id}_{hash}.png"),
        None => format!("{prefix}_{hash}.png"),
    }
}

/// Encode a frame as PNG bytes (straight alpha, RGBA8).
pub fn encode_png(frame: &FrameRGBA) -> SketchResult<Vec<u8>> {
    let mut straight = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_in_place(&mut straight);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, straight).ok_or_else(|| {
        SketchError::export(format!(
            "rgba buffer does not match {}x{}",
            frame.width, frame.height
        ))
    })?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| SketchError::export(format!("png encoding failed: {e}")))?;
    Ok(buf)
}

/// A completed download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Download {
    /// File name the download was offered under.
    pub file_name: String,
    /// Where the bytes ended up, for sinks that write to disk.
    pub path: Option<PathBuf>,
    /// Encoded size in bytes.
    pub len: usize,
}

/// Destination for exported images; the headless stand-in for a browser download.
pub trait DownloadSink {
    /// Deliver one encoded file.
    fn download(&mut self, file_name: &str, bytes: &[u8]) -> SketchResult<Download>;
}

/// Writes downloads into a directory, creating it on first use.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Sink rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn download(&mut self, file_name: &str, bytes: &[u8]) -> SketchResult<Download> {
        if file_name.contains(['/', '\\']) || file_name.is_empty() {
            return Err(SketchError::export(format!(
                "refusing to write download named \"{file_name}\""
            )));
        }
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote download");
        Ok(Download {
            file_name: file_name.to_owned(),
            path: Some(path),
            len: bytes.len(),
        })
    }
}

/// Keeps downloads in memory, for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct InMemorySink {
    files: Vec<(String, Vec<u8>)>,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured `(file_name, bytes)` pairs, in download order.
    pub fn files(&self) -> &[(String, Vec<u8>)] {
        &self.files
    }
}

impl DownloadSink for InMemorySink {
    fn download(&mut self, file_name: &str, bytes: &[u8]) -> SketchResult<Download> {
        self.files.push((file_name.to_owned(), bytes.to_vec()));
        Ok(Download {
            file_name: file_name.to_owned(),
            path: None,
            len: bytes.len(),
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/export.rs"]
mod tests;
