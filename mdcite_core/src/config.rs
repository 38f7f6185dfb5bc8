use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::BibliographySource;
use crate::CiteError;
use crate::CiteResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["mdcite.toml", ".mdcite.toml", ".config/mdcite.toml"];

/// Environment variable naming the bibliography file when neither the
/// command line nor the config file does.
pub const BIBLIOGRAPHY_ENV: &str = "BIBLIOGRAPHY";

/// Configuration loaded from an `mdcite.toml` file.
///
/// ```toml
/// bibliography = "references.txt"
///
/// [output]
/// format = "html"
/// stylesheet = true
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct CiteConfig {
	/// Path of the bibliography file, relative to the project root.
	#[serde(default)]
	pub bibliography: Option<PathBuf>,
	/// How rendered documents are written.
	#[serde(default)]
	pub output: OutputConfig,
}

/// The `[output]` section.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct OutputConfig {
	#[serde(default)]
	pub format: OutputFormat,
	/// Include the citation stylesheet in rendered output.
	#[serde(default)]
	pub stylesheet: bool,
}

/// Output format of a rendered document.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
	/// Full HTML: citations are rendered and the markdown is converted.
	#[default]
	Html,
	/// Markdown with the citation markup inlined as raw HTML.
	Markdown,
}

impl CiteConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if there is no config file.
	pub fn load(root: &Path) -> CiteResult<Option<CiteConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: CiteConfig =
			toml::from_str(&content).map_err(|e| CiteError::ConfigParse(e.to_string()))?;

		Ok(Some(config))
	}

	/// Pick the bibliography file: the explicit `cli_path` wins, then the
	/// config's `bibliography` (relative to `root`), then `env_path`, which
	/// callers normally read from [`BIBLIOGRAPHY_ENV`].
	pub fn bibliography_path(
		config: Option<&CiteConfig>,
		root: &Path,
		cli_path: Option<&Path>,
		env_path: Option<&Path>,
	) -> CiteResult<PathBuf> {
		if let Some(path) = cli_path {
			return Ok(path.to_path_buf());
		}

		if let Some(path) = config.and_then(|config| config.bibliography.as_deref()) {
			return Ok(root.join(path));
		}

		env_path
			.map(Path::to_path_buf)
			.ok_or(CiteError::MissingBibliography)
	}

	/// Like [`bibliography_path`](Self::bibliography_path), reading the
	/// environment fallback from [`BIBLIOGRAPHY_ENV`] and wrapping the result
	/// as a [`BibliographySource`].
	pub fn bibliography_source(
		config: Option<&CiteConfig>,
		root: &Path,
		cli_path: Option<&Path>,
	) -> CiteResult<BibliographySource> {
		let env_path = std::env::var_os(BIBLIOGRAPHY_ENV)
			.filter(|value| !value.is_empty())
			.map(PathBuf::from);
		let path = Self::bibliography_path(config, root, cli_path, env_path.as_deref())?;

		Ok(BibliographySource::File(path))
	}
}
