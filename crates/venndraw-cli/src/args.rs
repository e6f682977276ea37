//! Command-line argument definitions for the Venndraw CLI.
//!
//! One flag per render parameter, plus output placement, configuration file
//! selection and logging verbosity. Flags of the mode that is not selected
//! are accepted and ignored.

use clap::Parser;

use venndraw::RequestParams;

/// Command-line arguments for the Venndraw tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of circles
    #[arg(long, default_value = "3", value_parser = ["2", "3"])]
    pub mode: String,

    /// Label of the left circle
    #[arg(long, default_value = "Set A")]
    pub left_label: String,

    /// Label of the middle circle (3-circle mode only)
    #[arg(long, default_value = "Set B")]
    pub middle_label: String,

    /// Label of the right circle
    #[arg(long, default_value = "Set C")]
    pub right_label: String,

    /// [2-circle mode] Terms only in the left circle (comma or newline separated)
    #[arg(long = "left-only-2", default_value = "")]
    pub left_only_2: String,

    /// [2-circle mode] Terms only in the right circle
    #[arg(long = "right-only-2", default_value = "")]
    pub right_only_2: String,

    /// [2-circle mode] Terms in both circles
    #[arg(long, default_value = "")]
    pub both: String,

    /// [3-circle mode] Terms only in the left circle
    #[arg(long, default_value = "")]
    pub left_only: String,

    /// [3-circle mode] Terms only in the middle circle
    #[arg(long, default_value = "")]
    pub middle_only: String,

    /// [3-circle mode] Terms only in the right circle
    #[arg(long, default_value = "")]
    pub right_only: String,

    /// [3-circle mode] Terms in the left and middle circles only
    #[arg(long, default_value = "")]
    pub left_middle: String,

    /// [3-circle mode] Terms in the left and right circles only
    #[arg(long, default_value = "")]
    pub left_right: String,

    /// [3-circle mode] Terms in the middle and right circles only
    #[arg(long, default_value = "")]
    pub middle_right: String,

    /// [3-circle mode] Terms in all three circles
    #[arg(long, default_value = "")]
    pub all_three: String,

    /// Output image format
    #[arg(long, default_value = "png", value_parser = ["png", "svg"])]
    pub export_format: String,

    /// Resolution of PNG output in dots per inch
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u32).range(72..=600))]
    pub dpi: u32,

    /// Move the rendered file here instead of leaving it in the temp directory
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The render parameters carried by these arguments.
    pub fn request_params(&self) -> RequestParams {
        RequestParams {
            mode: self.mode.clone(),
            left_label: self.left_label.clone(),
            middle_label: self.middle_label.clone(),
            right_label: self.right_label.clone(),
            left_only_2: self.left_only_2.clone(),
            right_only_2: self.right_only_2.clone(),
            both: self.both.clone(),
            left_only: self.left_only.clone(),
            middle_only: self.middle_only.clone(),
            right_only: self.right_only.clone(),
            left_middle: self.left_middle.clone(),
            left_right: self.left_right.clone(),
            middle_right: self.middle_right.clone(),
            all_three: self.all_three.clone(),
            export_format: self.export_format.clone(),
            dpi: self.dpi,
        }
    }
}
