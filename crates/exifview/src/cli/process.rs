//! The `exifview process` command for running uploads from the command line.

use clap::Args;
use exifview_core::{Config, UploadPipeline, UploadRequest};
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the `process` command.
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// JPEG files to run through the pipeline
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Working directory for stored previews (overrides `storage.dir`)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the process command.
///
/// Each file is treated as an upload named after the file. One JSON object
/// per successful file goes to stdout; failures are logged and make the
/// command exit non-zero after all files were tried.
pub async fn execute(args: ProcessArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(dir) = args.output_dir {
        config.storage.dir = dir;
    }
    config.validate()?;
    let pipeline = Arc::new(UploadPipeline::new(&config));
    let pretty = args.pretty;

    let progress = if args.files.len() > 1 {
        Some(create_progress_bar(args.files.len() as u64)?)
    } else {
        None
    };

    let mut failed = 0usize;
    for file in args.files {
        if let Some(pb) = &progress {
            pb.set_message(file.display().to_string());
            pb.inc(1);
        }

        let body = match tokio::fs::read(&file).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Cannot read {}: {}", file.display(), e);
                failed += 1;
                continue;
            }
        };
        let filename = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let request = UploadRequest::new(filename, body);

        let worker = Arc::clone(&pipeline);
        let result = tokio::task::spawn_blocking(move || worker.process(&request)).await?;

        match result {
            Ok(upload) => {
                let json = upload.to_json(pretty)?;
                match &progress {
                    Some(pb) => pb.suspend(|| println!("{json}")),
                    None => println!("{json}"),
                }
            }
            Err(e) => {
                match e.orphaned_path() {
                    Some(orphan) => tracing::error!(
                        "{}: {} (raw upload left at {})",
                        file.display(),
                        e,
                        orphan.display()
                    ),
                    None => tracing::error!("{}: {}", file.display(), e),
                }
                failed += 1;
            }
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if failed > 0 {
        anyhow::bail!("{} file(s) failed", failed);
    }
    Ok(())
}

/// Create a progress bar for multi-file runs.
fn create_progress_bar(total: u64) -> anyhow::Result<indicatif::ProgressBar> {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;

    fn write_jpeg(path: &std::path::Path, width: u32, height: u32) {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([90, 90, 90]));
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, 85)
            .encode_image(&img)
            .unwrap();
        std::fs::write(path, out).unwrap();
    }

    fn args(files: Vec<PathBuf>, output_dir: &std::path::Path) -> ProcessArgs {
        ProcessArgs {
            files,
            output_dir: Some(output_dir.to_path_buf()),
            pretty: false,
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_process_writes_previews() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let first = input.path().join("one.jpg");
        let second = input.path().join("two.jpeg");
        write_jpeg(&first, 700, 350);
        write_jpeg(&second, 40, 40);

        execute(args(vec![first, second], output.path()), Config::default())
            .await
            .unwrap();

        let previews: Vec<_> = std::fs::read_dir(output.path())
            .unwrap()
            .map(|e| image::open(e.unwrap().path()).unwrap().width())
            .collect();
        assert_eq!(previews, vec![350, 350]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_process_reports_failures() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let good = input.path().join("good.jpg");
        let rejected = input.path().join("notes.txt");
        write_jpeg(&good, 20, 10);
        std::fs::write(&rejected, b"hello").unwrap();

        let err = execute(args(vec![good, rejected], output.path()), Config::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("1 file(s) failed"));
        assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 1);
    }
}
