//! imgsize - resize an image by width, height or scale
//!
//! Pipeline: parse arguments, validate the request, compute the target
//! size from the decoded source, resample and write.

use clap::{ArgAction, Parser};
use imgsize_core::{Limits, ResizeRequest, DEFAULT_MAX_VALUE};
use imgsize_io::{WriteOptions, DEFAULT_JPEG_QUALITY};
use imgsize_ops::{Filter, ResizeOptions, DEFAULT_MAX_PIXELS};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "imgsize")]
#[command(author, version, about = "Resize an image by width, height or scale")]
#[command(long_about = "
Resize a PNG or JPEG image and write the result next to the source
(as <name>__<width>x<height>.<ext>) or to --output.

Give a width, a height, both, or a scale factor. With only one side the
other follows the source aspect ratio; computed sides are truncated.

Examples:
  imgsize photo.jpg -W 640                 # photo__640x480.jpg
  imgsize photo.jpg -H 200 -O thumb.png    # convert while resizing
  imgsize photo.jpg -S 0.5 -f lanczos3
  imgsize photo.jpg -W 300 -H 300          # warns: aspect ratio changes
")]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Source image
    image: Option<PathBuf>,

    /// Target width in pixels
    #[arg(short = 'W', long)]
    width: Option<i64>,

    /// Target height in pixels
    #[arg(short = 'H', long)]
    height: Option<i64>,

    /// Scale factor (e.g., 0.5, 2.0); excludes width and height
    #[arg(short = 'S', long)]
    scale: Option<f64>,

    /// Output image (default: next to the source)
    #[arg(short = 'O', long)]
    output: Option<PathBuf>,

    /// Filter: nearest, bilinear, bicubic, lanczos3
    #[arg(short, long, default_value = "bicubic")]
    filter: Filter,

    /// JPEG output quality (1-100)
    #[arg(short, long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Upper bound for width, height and scale
    #[arg(long, default_value_t = DEFAULT_MAX_VALUE)]
    max_value: f64,

    /// Largest pixel count a resample buffer may hold
    #[arg(long, default_value_t = DEFAULT_MAX_PIXELS)]
    max_pixels: u64,

    /// Accepted source extensions (comma-separated) [default: png,jpg,jpeg]
    #[arg(long, value_delimiter = ',', conflicts_with = "any_format")]
    allow_ext: Option<Vec<String>>,

    /// Accept any source extension
    #[arg(long)]
    any_format: bool,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn request(&self) -> ResizeRequest {
        ResizeRequest {
            source: self.image.clone(),
            width: self.width,
            height: self.height,
            scale: self.scale,
            output: self.output.clone(),
        }
    }

    fn limits(&self) -> Limits {
        let limits = if self.any_format {
            Limits::any_format()
        } else if let Some(exts) = &self.allow_ext {
            Limits::default().with_extensions(exts)
        } else {
            Limits::default()
        };
        limits.with_max_value(self.max_value)
    }

    fn options(&self) -> ResizeOptions {
        ResizeOptions {
            filter: self.filter,
            write: WriteOptions {
                jpeg_quality: self.quality,
            },
            max_pixels: self.max_pixels,
        }
    }
}

/// Installs the stderr subscriber. `RUST_LOG` overrides `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    report(commands::resize::run(cli.request(), &cli.limits(), &cli.options()))
}

/// Prints a failure as one `error:` line and maps the result to an exit status.
fn report<T>(result: anyhow::Result<T>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error_line(&err));
            ExitCode::FAILURE
        }
    }
}

fn error_line(err: &anyhow::Error) -> String {
    format!("error: {:#}", err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("imgsize").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_and_long_options() {
        let cli = parse(&["in.png", "-W", "640", "-H", "480", "-O", "out.jpg"]).unwrap();
        assert_eq!(cli.image, Some(PathBuf::from("in.png")));
        assert_eq!(cli.width, Some(640));
        assert_eq!(cli.height, Some(480));
        assert_eq!(cli.output, Some(PathBuf::from("out.jpg")));

        let cli = parse(&["in.png", "--scale", "0.5", "--filter", "lanczos"]).unwrap();
        assert_eq!(cli.scale, Some(0.5));
        assert_eq!(cli.filter, Filter::Lanczos3);
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["in.png", "-W", "10"]).unwrap();
        assert_eq!(cli.filter, Filter::Bicubic);
        assert_eq!(cli.quality, DEFAULT_JPEG_QUALITY);
        assert_eq!(cli.limits(), Limits::default());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_negative_values_reach_validation() {
        let cli = parse(&["in.png", "-W", "-5", "-S", "-0.5"]).unwrap();
        assert_eq!(cli.width, Some(-5));
        assert_eq!(cli.scale, Some(-0.5));
    }

    #[test]
    fn test_image_is_optional_for_parser() {
        let cli = parse(&["-W", "10"]).unwrap();
        assert_eq!(cli.request().source, None);
    }

    #[test]
    fn test_malformed_numbers_are_usage_errors() {
        for args in [&["in.png", "-W", "wide"][..], &["in.png", "-S", "2x"], &["in.png", "-H", "1.5"]] {
            let err = parse(args).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        }
        assert!(parse(&["in.png", "-q", "0"]).is_err());
        assert!(parse(&["in.png", "-f", "sharpest"]).is_err());
    }

    #[test]
    fn test_limits_options() {
        let cli = parse(&["in.gif", "-W", "1", "--allow-ext", "gif,.PNG", "--max-value", "500"]).unwrap();
        let limits = cli.limits();
        assert_eq!(limits.max_value, 500.0);
        assert_eq!(limits.allowed_extensions, Some(vec!["gif".to_string(), "png".to_string()]));

        let cli = parse(&["in.gif", "-W", "1", "--any-format"]).unwrap();
        assert_eq!(cli.limits().allowed_extensions, None);

        assert!(parse(&["in.gif", "--any-format", "--allow-ext", "gif"]).is_err());
    }

    #[test]
    fn test_max_pixels_option() {
        let cli = parse(&["in.png", "-S", "2"]).unwrap();
        assert_eq!(cli.options().max_pixels, DEFAULT_MAX_PIXELS);

        let cli = parse(&["in.png", "-S", "2", "--max-pixels", "4096"]).unwrap();
        assert_eq!(cli.options().max_pixels, 4096);
    }

    #[test]
    fn test_report_exit_status() {
        assert_eq!(report(Ok(())), ExitCode::SUCCESS);

        let dir = tempfile::tempdir().unwrap();
        let request = ResizeRequest::new(dir.path().join("ghost.png")).with_width(10);
        let result = commands::resize::run(request, &Limits::default(), &ResizeOptions::default());
        let err = result.as_ref().unwrap_err();
        let line = error_line(err);
        assert!(line.starts_with("error: image file not found"), "{}", line);
        assert!(!line.contains('\n'));
        assert_eq!(report(result), ExitCode::FAILURE);
    }

    #[test]
    fn test_error_line_flattens_context() {
        let err = anyhow::anyhow!("decode error: bad marker").context("failed to resize a.jpg");
        assert_eq!(error_line(&err), "error: failed to resize a.jpg: decode error: bad marker");
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = parse(&["in.png", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
