//! Flipping Book CLI
//!
//! Drive a book headlessly: run a script of turns and clicks, inspect the
//! resulting frame, or export it as a mesh.

use clap::{Args, Parser, Subcommand};
use flipping_book::{
    load_config, load_manifest, BookConfig, BookManifest, FlippingBook, FrameClock, ObjExport,
    PageSource, PointerHit, TurnCommand,
};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "flipping-book")]
#[command(author, version, about = "Simulate and export page-flipping books", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct BookArgs {
    /// Page manifest JSON (defaults to the five-page keepsake book)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Configuration JSON (missing keys keep their defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct ScriptArgs {
    /// Comma-separated steps: "f" (forward), "b" (back), "click:<page>:<x>"
    #[arg(short, long, default_value = "")]
    script: String,

    /// Frames to run after each step (0 = until the pages come to rest)
    #[arg(long, default_value = "0")]
    frames: usize,

    /// Frame rate used for the frame clock
    #[arg(long, default_value = "60")]
    fps: f32,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a script and print the final frame
    Simulate {
        #[command(flatten)]
        book: BookArgs,

        #[command(flatten)]
        script: ScriptArgs,

        /// Print the frame as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a script and export the final frame as OBJ
    Export {
        #[command(flatten)]
        book: BookArgs,

        #[command(flatten)]
        script: ScriptArgs,

        /// Output file path (without extension)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show information about a book
    Info {
        #[command(flatten)]
        book: BookArgs,
    },
}

/// One step of a simulation script.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Turn(TurnCommand),
    Click(PointerHit),
}

fn parse_step(token: &str) -> Result<Step, String> {
    if let Some(command) = TurnCommand::parse(token) {
        return Ok(Step::Turn(command));
    }

    let parts: Vec<&str> = token.trim().split(':').collect();
    match parts.as_slice() {
        ["click", page, x] => {
            let page = page
                .parse::<usize>()
                .map_err(|e| format!("Invalid page in '{}': {}", token, e))?;
            let x = x
                .parse::<f32>()
                .map_err(|e| format!("Invalid position in '{}': {}", token, e))?;
            Ok(Step::Click(PointerHit::new(page, [x, 0.0])))
        }
        _ => Err(format!(
            "Invalid step: '{}'. Use f, b or click:<page>:<x>",
            token
        )),
    }
}

fn parse_script(script: &str) -> Result<Vec<Step>, String> {
    script
        .split(',')
        .filter(|t| !t.trim().is_empty())
        .map(parse_step)
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();

    match cli.command {
        Commands::Simulate { book, script, json } => {
            let book = run_script(&book, &script)?;
            print_frame(&book, json)?;
        }
        Commands::Export {
            book,
            script,
            output,
        } => {
            let book = run_script(&book, &script)?;
            export_frame(&book, &output)?;
        }
        Commands::Info { book } => {
            show_book_info(&book)?;
        }
    }

    Ok(())
}

fn load_book(args: &BookArgs) -> Result<(BookManifest, BookConfig), Box<dyn std::error::Error>> {
    let manifest = match &args.manifest {
        Some(path) => {
            info!("Loading manifest from {:?}", path);
            load_manifest(path)?
        }
        None => BookManifest::default(),
    };
    let config = match &args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            load_config(path)?
        }
        None => BookConfig::default(),
    };
    Ok((manifest, config))
}

fn run_script(
    book_args: &BookArgs,
    script_args: &ScriptArgs,
) -> Result<FlippingBook, Box<dyn std::error::Error>> {
    let (manifest, config) = load_book(book_args)?;
    let steps = parse_script(&script_args.script)?;
    let mut book = FlippingBook::new(&manifest, config)?;

    let delta = 1.0 / script_args.fps.max(1.0);
    let advance = |book: &mut FlippingBook| {
        if script_args.frames == 0 {
            book.settle(delta, 10_000)
        } else {
            for _ in 0..script_args.frames {
                book.tick(book.clock().next(delta));
            }
            script_args.frames
        }
    };

    advance(&mut book);
    for step in steps {
        match step {
            Step::Turn(command) => {
                book.apply(command);
            }
            Step::Click(hit) => {
                let result = book.handle_click(&hit);
                debug!("click on page {} -> {:?}", hit.page_index, result);
            }
        }
        let frames = advance(&mut book);
        info!(
            "{:?}: page {} after {} frames",
            step,
            book.current_page(),
            frames
        );
    }

    Ok(book)
}

fn print_frame(book: &FlippingBook, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let frame = book.frame();
    if json {
        println!("{}", frame.to_json()?);
        return Ok(());
    }

    println!("Page {} of {}", frame.current_page, frame.page_count);
    println!(
        "  Stacks: left {:.4}, right {:.4}",
        frame.stacks.left, frame.stacks.right
    );
    println!(
        "  Indicator: {}",
        frame
            .indicator
            .iter()
            .map(|&lit| if lit { '●' } else { '○' })
            .collect::<String>()
    );
    for page in &frame.pages {
        println!(
            "  [{}] {:?}: angle {:+.4} depth {:.4} progress {:.3} {:?}{}",
            page.index,
            page.role,
            page.angle,
            page.depth,
            page.flip_progress,
            page.phase,
            if page.interactive { " (clickable)" } else { "" }
        );
    }
    Ok(())
}

fn export_frame(book: &FlippingBook, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("book")
        .to_string();
    let export = ObjExport::from_book(book, &name)?;

    let obj_path = if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("obj")
    };
    let mtl_path = obj_path.with_extension("mtl");

    fs::write(&obj_path, &export.obj)?;
    fs::write(&mtl_path, &export.mtl)?;

    println!("Exported OBJ to {:?}", obj_path);
    println!("  Material: {:?}", mtl_path);
    Ok(())
}

fn show_book_info(args: &BookArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (manifest, config) = load_book(args)?;
    config.validate()?;

    println!("Book Info:");
    println!("  Pages: {}", manifest.page_count());
    for page in manifest.iter_pages() {
        let items = page
            .content
            .as_ref()
            .map(|c| {
                c.items
                    .iter()
                    .map(|i| i.title.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        println!("    [{}] {:?} {}", page.index, page.role, items);
    }
    println!("  Page size: {} x {}", config.page_width, config.page_height);
    println!(
        "  Grid: {} x {} segments",
        config.width_segments, config.height_segments
    );
    println!("  Click policy: {:?}", config.click_policy);
    println!(
        "  Last reading position: {} ({:?})",
        config.terminal_page.limit(manifest.page_count()),
        config.terminal_page
    );
    Ok(())
}
