use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cine")]
#[command(about = "Search OMDb for movies from the terminal", long_about = None)]
pub struct Cli {
    /// Search term to run on startup
    pub term: Option<String>,

    /// OMDb API key (overrides api_key in settings.toml)
    #[arg(long, env = "OMDB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// OMDb endpoint (default: https://www.omdbapi.com)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Force dark mode (overrides auto-detection)
    #[arg(long, conflicts_with = "light")]
    pub dark: bool,

    /// Force light mode (overrides auto-detection)
    #[arg(long, conflicts_with = "dark")]
    pub light: bool,

    /// Custom config directory (default: ~/.config/cine)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Enable verbose logging (prints log path, sets DEBUG level)
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_term_is_optional() {
        let cli = Cli::try_parse_from(["cine"]).unwrap();
        assert!(cli.term.is_none());

        let cli = Cli::try_parse_from(["cine", "Batman"]).unwrap();
        assert_eq!(cli.term.as_deref(), Some("Batman"));
    }

    #[test]
    fn dark_and_light_conflict() {
        assert!(Cli::try_parse_from(["cine", "--dark", "--light"]).is_err());
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "cine",
            "--api-key",
            "abc123",
            "--base-url",
            "http://localhost:9999",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("abc123"));
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9999"));
        assert!(cli.verbose);
    }
}
