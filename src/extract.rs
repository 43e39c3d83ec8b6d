use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::error::{Error, Result};

/// Settings for the OCR shell-outs.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Density passed to ImageMagick when rasterizing PDFs.
    pub pdf_density: u32,
    /// Directory holding tesseract's language data. `None` lets the
    /// tesseract binary use its own default.
    pub tessdata_dir: Option<PathBuf>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            pdf_density: 300,
            tessdata_dir: std::env::var_os("TESSDATA_PREFIX").map(PathBuf::from),
        }
    }
}

/// Read a file's bytes as text, decoding lossily.
///
/// The source file is never modified.
pub fn plain_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Recognize text in an image (or PDF) by shelling out to `tesseract`.
///
/// PDFs are first rasterized to an 8-bit TIFF with ImageMagick's `convert`;
/// the intermediate file lives in a temp location and is removed on drop.
pub fn ocr(config: &OcrConfig, path: &Path) -> Result<String> {
    let pdf_scratch;
    let source: &Path = if path.extension().is_some_and(|e| e == "pdf") {
        pdf_scratch = rasterize_pdf(config, path)?;
        pdf_scratch.path()
    } else {
        path
    };

    let mut cmd = Command::new("tesseract");
    cmd.arg(source).arg("stdout").args(["-l", "eng"]);
    if let Some(ref dir) = config.tessdata_dir {
        cmd.arg("--tessdata-dir").arg(dir);
    }

    tracing::debug!("running tesseract on {}", source.display());
    let output = cmd.output()?;
    if !output.status.success() {
        return Err(Error::ExternalTool {
            program: "tesseract",
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn rasterize_pdf(config: &OcrConfig, path: &Path) -> Result<tempfile::NamedTempFile> {
    let scratch = tempfile::Builder::new().suffix(".tif").tempfile()?;

    tracing::debug!(
        "converting {} to {} at density {}",
        path.display(),
        scratch.path().display(),
        config.pdf_density
    );
    let output = Command::new("convert")
        .args(["-density", &config.pdf_density.to_string()])
        .arg(path)
        .args(["-depth", "8"])
        .arg(scratch.path())
        .output()?;

    if !output.status.success() {
        return Err(Error::ExternalTool {
            program: "convert",
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(scratch)
}
