use crate::*;
use image::ImageFormat;
use log::debug;
use std::io::Write;
use std::path::{Path, PathBuf};

pub static COLLECT_FRAMES_DIR: &str = "collect_frames";
pub static COLLECT_FRAMES_FOR_CONTEXT_DIR: &str = "collect_frames_for_context";
pub static OCR_FRAMES_DIR: &str = "ocr/frames";

/// Layout of the on-disk datasets that the collection handlers write into.
#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    root: PathBuf,
}

impl DatasetPaths {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collect_frames_dir(&self) -> PathBuf {
        self.root.join(COLLECT_FRAMES_DIR)
    }

    pub fn context_root(&self) -> PathBuf {
        self.root.join(COLLECT_FRAMES_FOR_CONTEXT_DIR)
    }

    pub fn context_dir(&self, context: &str) -> PathBuf {
        self.context_root().join(context)
    }

    pub fn ocr_frames_dir(&self) -> PathBuf {
        self.root.join(OCR_FRAMES_DIR)
    }

    /// Creates the fixed dataset roots. Context directories are left to the
    /// context collection setup.
    pub fn create_roots(&self) -> GameAgentResult<()> {
        for dir in [
            self.collect_frames_dir(),
            self.context_root(),
            self.ocr_frames_dir(),
        ] {
            create_dataset_dir(&dir)?;
        }
        Ok(())
    }
}

pub fn new_frame_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn frame_path(dir: &Path, frame_uuid: &str) -> PathBuf {
    dir.join(format!("frame_{}.png", frame_uuid))
}

pub fn create_dataset_dir(dir: &Path) -> GameAgentResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| {
        GameAgentError::new(GameAgentErrorVariant::DatasetIo {
            path: dir.to_path_buf(),
            source,
        })
    })
}

/// Writes `frame` as a PNG at `path`. The file must not exist yet.
pub fn write_frame_png(frame: &GameFrame, path: &Path) -> GameAgentResult<()> {
    let image = frame.to_image()?;
    let file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| {
            GameAgentError::new(GameAgentErrorVariant::DatasetIo {
                path: path.to_path_buf(),
                source,
            })
        })?;
    let mut writer = std::io::BufWriter::new(file);
    image
        .write_to(&mut writer, ImageFormat::Png)
        .map_err(|source| {
            GameAgentError::new(GameAgentErrorVariant::ImageEncoding {
                path: path.to_path_buf(),
                source,
            })
        })?;
    writer.flush().map_err(|source| {
        GameAgentError::new(GameAgentErrorVariant::DatasetIo {
            path: path.to_path_buf(),
            source,
        })
    })?;
    debug!(
        "Wrote {}x{} frame to {:?}",
        frame.width(),
        frame.height(),
        path
    );
    Ok(())
}
