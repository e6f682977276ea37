//! CLI logic for the Venndraw tool.
//!
//! Parses nothing itself: [`run`] takes the already parsed [`Args`], loads
//! the configuration, renders the diagram and optionally moves the file to
//! the requested output path.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use venndraw::{VennError, VennRenderer};

/// Run the Venndraw CLI application
///
/// # Returns
///
/// The path of the written image.
///
/// # Errors
///
/// Returns `VennError` for:
/// - Configuration loading errors and invalid parameters
/// - Layout errors
/// - Export and file I/O errors
pub fn run(args: &Args) -> Result<PathBuf, VennError> {
    info!(
        mode = args.mode,
        export_format = args.export_format;
        "Rendering diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let request = args.request_params().into_request()?;

    let renderer = VennRenderer::new(app_config);
    let rendered = renderer.render(&request)?;

    let path = match &args.output {
        Some(output) => move_file(rendered.path(), Path::new(output))?,
        None => rendered.into_path(),
    };

    info!(output_file = path.display().to_string(); "Diagram exported successfully");
    Ok(path)
}

/// Moves `from` to `to`, copying when a rename across file systems fails.
fn move_file(from: &Path, to: &Path) -> Result<PathBuf, io::Error> {
    debug!(from = from.display().to_string(), to = to.display().to_string(); "Moving output file");
    if let Err(err) = fs::rename(from, to) {
        warn!(err:err; "Rename failed, copying instead");
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    }
    Ok(to.to_path_buf())
}
