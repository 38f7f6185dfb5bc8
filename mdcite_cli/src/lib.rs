use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Cite sources inline in markdown and get numbered footnotes with a linked bibliography.",
	long_about = "mdcite turns short inline citations such as {{Smith 2004, p. 23}} into numbered \
	              footnotes. Each footnote links to a bibliography generated from a file of \
	              {{cite book | title = ... | author = ...}} records, and every citation of the \
	              same source shares one footnote number.\n\nQuick start:\n  mdcite render \
	              essay.md -b references.txt   Render citations to HTML\n  mdcite check *.md     \
	              Verify that every citation resolves\n  mdcite list          List the \
	              bibliography entries"
)]
pub struct MdciteCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory, where `mdcite.toml` is looked up.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Bibliography file. Overrides the config file and the `BIBLIOGRAPHY`
	/// environment variable.
	#[arg(long, short, global = true)]
	pub bibliography: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Render the citations of a markdown file.
	///
	/// Every `{{ reference }}` marker outside code is replaced with a
	/// numbered footnote and `{{bibliography}}` with the list of cited
	/// entries. The first citation that cannot be resolved aborts the render.
	Render {
		/// The markdown file to render.
		input: PathBuf,

		/// Write the result to this file instead of stdout.
		#[arg(long, short)]
		output: Option<PathBuf>,

		/// Output format. Defaults to the `[output] format` config value, or
		/// `html`.
		#[arg(long, value_enum)]
		format: Option<RenderFormat>,

		/// Prefix the output with the citation stylesheet.
		#[arg(long, default_value_t = false)]
		stylesheet: bool,
	},
	/// Check that every citation in the given files resolves.
	///
	/// Each file is processed with fresh footnote numbering. Every failing
	/// file is reported, and the command exits with a non-zero status code
	/// if any file failed.
	Check {
		/// The markdown files to check.
		#[arg(required = true)]
		inputs: Vec<PathBuf>,
	},
	/// List the entries of the bibliography in source order.
	List {
		/// Output format for the listing. Use `text` for human-readable
		/// output or `json` for programmatic consumption.
		#[arg(long, value_enum, default_value_t = ListFormat::Text)]
		format: ListFormat,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
	/// Convert the rendered markdown to HTML.
	Html,
	/// Keep markdown, with the citation markup inlined as raw HTML.
	Markdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
