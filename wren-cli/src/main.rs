//! Wren CLI - lay out an HTML+CSS document and inspect the result
//!
//! Usage:
//!   wren <file>                     Print the measured box tree
//!   wren <file> --json              Print the measured box tree as JSON
//!   wren <file> --display-list      Print the paint commands
//!   wren <file> -S out.png          Rasterize to an image
//!
//! Examples:
//!   wren page.html --width 640
//!   wren --html '<p>Hello</p>' --json
//!   wren page.html --media print -S print.png --full-page

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use wren_common::resource::FileResolver;
use wren_common::warning::warning_count;
use wren_css::{BoxSnapshot, ContainerOptions, DisplayList, InitialContainer, Size};
use wren_raster::{FontSet, Renderer};

/// Wren - embeddable HTML+CSS box-model and layout engine
#[derive(Parser, Debug)]
#[command(name = "wren")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the box tree of a file laid out 800px wide
    wren ./index.html

    # Lay out inline HTML and dump the result as JSON
    wren --html '<p>Hello <b>world</b></p>' --json

    # Apply print rules and an extra style sheet, then take a screenshot
    wren ./index.html --media print --stylesheet extra.css -S out.png
"#)]
struct Cli {
    /// Path to the HTML file to load
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Load this HTML string instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Viewport width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Media type whose rules apply, in addition to `all` (repeatable)
    #[arg(long, value_name = "TYPE")]
    media: Vec<String>,

    /// Size of `font-size: medium`, in points
    #[arg(long, value_name = "PT")]
    base_font_size: Option<f32>,

    /// Container options as JSON; the flags above override it
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Extra style sheet applied beneath the document's own (repeatable)
    #[arg(long, value_name = "FILE")]
    stylesheet: Vec<PathBuf>,

    /// Font file to measure and draw text with, instead of a system font
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Print the measured tree as JSON
    #[arg(long)]
    json: bool,

    /// Print the paint commands instead of the tree
    #[arg(long)]
    display_list: bool,

    /// Rasterize and save to the given file (format from its extension)
    #[arg(short = 'S', long, value_name = "FILE")]
    screenshot: Option<PathBuf>,

    /// Grow the screenshot to fit the whole document
    #[arg(long)]
    full_page: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (document, base_dir) = read_input(&cli)?;
    let options = container_options(&cli)?;
    let mut container = InitialContainer::new(options, Box::new(FileResolver::new(base_dir)));
    for path in &cli.stylesheet {
        let css = fs::read_to_string(path)
            .with_context(|| format!("failed to read style sheet '{}'", path.display()))?;
        container.add_style_sheet(&css);
    }
    container.load(&document);

    let fonts = match &cli.font {
        Some(path) => FontSet::from_file(path)?,
        None => FontSet::system(),
    };
    let renderer = Renderer::new(fonts);
    let viewport = Size::new(cli.width as f32, cli.height as f32);

    if let Some(ref output_path) = cli.screenshot {
        let image = renderer.render(&mut container, viewport, cli.full_page)?;
        image
            .save(output_path)
            .with_context(|| format!("failed to save screenshot to '{}'", output_path.display()))?;
        println!("Screenshot saved to: {}", output_path.display());
    } else {
        let metrics = renderer.metrics();
        container.measure(&metrics, viewport);

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&container.snapshot())?);
        } else if cli.display_list {
            let mut list = DisplayList::new();
            container.paint(&mut list, &metrics);
            println!("=== Display List ({} commands) ===", list.len());
            for (i, command) in list.commands().iter().enumerate() {
                println!("  {i:4}: {command:?}");
            }
        } else {
            let extent = container.maximum_size();
            println!(
                "=== Box Tree (viewport: {}x{}, extent: {:.1}x{:.1}) ===\n",
                cli.width, cli.height, extent.width, extent.height
            );
            print_box(&container.snapshot(), 0);
        }
    }

    let warnings = warning_count();
    if warnings > 0 {
        eprintln!("{}", format!("{warnings} warning(s) while loading").yellow());
    }
    Ok(())
}

/// The document text and the directory its relative references resolve
/// against.
fn read_input(cli: &Cli) -> anyhow::Result<(String, PathBuf)> {
    if let Some(ref html) = cli.html {
        let cwd = std::env::current_dir().context("failed to read the working directory")?;
        Ok((html.clone(), cwd))
    } else if let Some(ref path) = cli.path {
        let document = fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;
        let base_dir = path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Ok((document, base_dir))
    } else {
        anyhow::bail!("no input: pass a file path or --html")
    }
}

fn container_options(cli: &Cli) -> anyhow::Result<ContainerOptions> {
    let mut options = match cli.options {
        Some(ref path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read options '{}'", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid options in '{}'", path.display()))?
        }
        None => ContainerOptions::default(),
    };

    for media in &cli.media {
        let media = media.to_lowercase();
        if !options.media.contains(&media) {
            options.media.push(media);
        }
    }
    if let Some(size) = cli.base_font_size {
        options.base_font_size = size;
    }
    Ok(options)
}

/// Print one box with its geometry, then its children indented.
fn print_box(snapshot: &BoxSnapshot, depth: usize) {
    let indent = "  ".repeat(depth);
    let name = snapshot
        .tag
        .as_ref()
        .map_or_else(|| snapshot.kind.to_string(), |tag| format!("<{tag}>"));
    let b = snapshot.bounds;
    let geometry = format!("x={:.1} y={:.1} w={:.1} h={:.1}", b.x, b.y, b.width, b.height);

    if snapshot.display == "none" {
        println!("{indent}{} {}", name.dimmed(), "none".dimmed());
        return;
    }
    println!(
        "{indent}{} {} {}",
        name.cyan().bold(),
        snapshot.display.yellow(),
        geometry.dimmed()
    );

    for rect in &snapshot.rectangles {
        println!(
            "{indent}  {} x={:.1} y={:.1} w={:.1} h={:.1}",
            "line".magenta(),
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
    }

    let text: Vec<&str> = snapshot
        .words
        .iter()
        .map(|w| w.text.as_str())
        .filter(|t| !t.trim().is_empty())
        .collect();
    if !text.is_empty() {
        let preview: String = text.join(" ").chars().take(40).collect();
        println!("{indent}  {}", format!("\"{preview}\"").green());
    }
    for word in snapshot.words.iter().filter(|w| w.image.is_some()) {
        let src = word.image.as_deref().unwrap_or_default();
        println!(
            "{indent}  {} {src} {:.1}x{:.1}",
            "image".magenta(),
            word.bounds.width,
            word.bounds.height
        );
    }

    for child in &snapshot.children {
        print_box(child, depth + 1);
    }
}
