use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use pdf_slides::{ConvertObserver, ConvertOptions, Diagnostic};

#[derive(Parser)]
#[command(name = "pdf2pptx", about = "Convert a PDF file to a PowerPoint presentation", version)]
struct Cli {
    /// The input PDF file
    input: PathBuf,

    /// The output PowerPoint file; defaults to the input path with a
    /// .pptx extension
    output: Option<PathBuf>,

    /// Render pages as SVG converted to EMF. This is experimental and
    /// depends on Inkscape
    #[arg(long)]
    svg: bool,

    /// The DPI to render pages at; ignored with --svg
    #[arg(long, default_value_t = 600)]
    dpi: u32,

    /// The slide aspect ratio, like "16:9"; "auto" derives it from the PDF
    #[arg(long, default_value = "auto")]
    aspect_ratio: String,

    /// Path to the Inkscape executable; only used with --svg
    #[arg(long, default_value = "inkscape")]
    inkscape_path: PathBuf,
}

/// Bridges pipeline progress to a terminal bar and diagnostics to the log.
struct CliObserver {
    bar: Option<ProgressBar>,
}

impl CliObserver {
    fn new() -> Self {
        Self { bar: None }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl ConvertObserver for CliObserver {
    fn page_finished(&mut self, _index: usize, count: usize) {
        let bar = self.bar.get_or_insert_with(|| {
            let bar = ProgressBar::new(count as u64);
            bar.set_style(
                ProgressStyle::with_template(
                    "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>4}/{len:4} pages",
                )
                .unwrap(),
            );
            bar
        });
        bar.inc(1);
    }

    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        log::warn!("{}", diagnostic);
    }
}

fn main() -> Result<()> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let cli = Cli::parse();

    let mut options = ConvertOptions::new(cli.input);
    if let Some(output) = cli.output {
        options.output = output;
    }
    options.vector = cli.svg;
    options.dpi = cli.dpi;
    options.aspect_ratio = cli.aspect_ratio;
    options.inkscape_path = cli.inkscape_path;

    println!(
        "Converting {} to {}",
        options.input.display(),
        options.output.display()
    );

    let mut observer = CliObserver::new();
    let report = pdf_slides::convert_file(&options, &mut observer)?;
    observer.finish();

    println!("Aspect ratio: {}", report.ratio);
    println!(
        "Wrote {} slides → {}",
        report.pages,
        options.output.display()
    );

    Ok(())
}
