use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use mdcite_cli::Commands;
use mdcite_cli::ListFormat;
use mdcite_cli::MdciteCli;
use mdcite_cli::RenderFormat;
use mdcite_core::Bibliography;
use mdcite_core::BibliographySource;
use mdcite_core::CitationRegistry;
use mdcite_core::CiteConfig;
use mdcite_core::CiteError;
use mdcite_core::CiteResult;
use mdcite_core::OutputFormat;
use mdcite_core::document::RenderOptions;
use mdcite_core::document::check_markdown;
use mdcite_core::document::render_document;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,dimmed) => {
		if color_enabled() {
			format!("{}", $text.dimmed())
		} else {
			format!("{}", $text)
		}
	};
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
	let args = MdciteCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Render {
			input,
			output,
			format,
			stylesheet,
		}) => run_render(&args, input, output.as_deref(), *format, *stylesheet),
		Some(Commands::Check { inputs }) => run_check(&args, inputs),
		Some(Commands::List { format }) => run_list(&args, *format),
		None => {
			eprintln!("No subcommand specified. Run `mdcite --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<CiteError>() {
			Ok(cite_err) => report(*cite_err),
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr, filtered by `RUST_LOG` when it is set.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_filter = if verbose { "mdcite=debug" } else { "mdcite=warn" };

	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
		.with(
			fmt::layer()
				.with_writer(std::io::stderr)
				.with_ansi(use_color)
				.with_target(false),
		)
		.init();
}

/// Print a core error through miette so codes and help text are shown.
fn report(error: CiteError) {
	let report: miette::Report = error.into();
	eprintln!("{report:?}");
}

fn resolve_root(args: &MdciteCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// The discovered config and the bibliography it, the command line, or the
/// environment points at.
fn load_project(args: &MdciteCli) -> CiteResult<(Option<CiteConfig>, BibliographySource)> {
	let root = resolve_root(args);
	let config = CiteConfig::load(&root)?;
	let source = CiteConfig::bibliography_source(config.as_ref(), &root, args.bibliography.as_deref())?;

	tracing::debug!(root = %root.display(), bibliography = %source, "resolved project");

	Ok((config, source))
}

fn run_render(
	args: &MdciteCli,
	input: &Path,
	output: Option<&Path>,
	format: Option<RenderFormat>,
	stylesheet: bool,
) -> CliResult {
	let (config, source) = load_project(args)?;
	let defaults = config.map(|config| config.output).unwrap_or_default();

	let options = RenderOptions {
		format: match format {
			Some(RenderFormat::Html) => OutputFormat::Html,
			Some(RenderFormat::Markdown) => OutputFormat::Markdown,
			None => defaults.format,
		},
		stylesheet: stylesheet || defaults.stylesheet,
	};

	let content = std::fs::read_to_string(input)?;
	let mut registry = CitationRegistry::new(source);
	let rendered = render_document(&content, &mut registry, &options)?;

	match output {
		Some(path) => {
			std::fs::write(path, rendered)?;
			eprintln!(
				"{} {} ({} source(s) cited)",
				colored!("Rendered", green),
				path.display(),
				registry.used().len()
			);
		}
		None => print!("{rendered}"),
	}

	Ok(())
}

fn run_check(args: &MdciteCli, inputs: &[PathBuf]) -> CliResult {
	let (_, source) = load_project(args)?;
	let bibliography: Arc<Bibliography> = source.load()?;
	let mut failures = 0;

	for input in inputs {
		let mut registry = CitationRegistry::new(BibliographySource::Loaded(Arc::clone(&bibliography)));
		let result = std::fs::read_to_string(input)
			.map_err(CiteError::from)
			.and_then(|content| check_markdown(&content, &mut registry));

		match result {
			Ok(listing) => {
				let uses: usize = listing.iter().map(|item| item.occurrence_ids.len()).sum();
				println!(
					"{} {}: {uses} citation(s) of {} source(s)",
					colored!("ok", green),
					input.display(),
					listing.len()
				);
			}
			Err(error) => {
				failures += 1;
				eprintln!("{} {}", colored!("failed", red), input.display());
				report(error);
			}
		}
	}

	if failures > 0 {
		eprintln!(
			"\n{}",
			colored!(format!("{failures} of {} file(s) failed.", inputs.len()), red)
		);
		process::exit(1);
	}

	println!("\nAll citations resolve.");
	Ok(())
}

#[derive(Serialize)]
struct ListedEntry<'a> {
	macro_name: &'a str,
	title: &'a str,
	authors: &'a str,
	date: Option<&'a str>,
}

fn run_list(args: &MdciteCli, format: ListFormat) -> CliResult {
	let (_, source) = load_project(args)?;
	let bibliography = source.load()?;

	let entries: Vec<ListedEntry<'_>> = bibliography
		.iter()
		.map(|known| {
			ListedEntry {
				macro_name: known.entry().macro_name(),
				title: known.entry().title(),
				authors: known.authors(),
				date: known.entry().date(),
			}
		})
		.collect();

	match format {
		ListFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&entries)?);
		}
		ListFormat::Text => {
			if entries.is_empty() {
				println!("No bibliography entries found.");
				return Ok(());
			}

			for (index, entry) in entries.iter().enumerate() {
				println!(
					"{:>3}. {} {}",
					index + 1,
					colored!(entry.title, bold),
					colored!(format!("[{}]", entry.macro_name), dimmed)
				);

				let byline = match (entry.authors, entry.date) {
					("", None) => None,
					("", Some(date)) => Some(date.to_string()),
					(authors, None) => Some(authors.to_string()),
					(authors, Some(date)) => Some(format!("{authors} ({date})")),
				};
				if let Some(byline) = byline {
					println!("     {byline}");
				}
			}

			println!("\n{} entry(ies)", entries.len());
		}
	}

	Ok(())
}
