use std::path::PathBuf;

use clap::Parser;

/// Petalist runs canned analyses on Fisher's Iris dataset.
#[derive(Parser, Debug)]
#[command(name = "petalist", version, about, long_about = None, after_help = "Thanks for using Petalist!")]
pub struct Cli {
    /// Name used in the greeting.
    #[arg(short = 'n', long)]
    pub username: String,

    /// Directory that receives the result files.
    #[arg(long, default_value = "results")]
    pub results_dir: PathBuf,

    /// Load this .csv / .json file instead of the bundled dataset.
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Run every analysis without opening a window, then exit.
    #[arg(long)]
    pub batch: bool,
}

/// Startup settings after argument parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub username: String,
    pub results_dir: PathBuf,
    pub data: Option<PathBuf>,
    pub batch: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            username: cli.username.trim().to_string(),
            results_dir: cli.results_dir,
            data: cli.data,
            batch: cli.batch,
        }
    }
}

impl Config {
    pub fn greeting(&self) -> String {
        format!("Hello {},", self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_required() {
        let err = Cli::try_parse_from(["petalist"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn defaults() {
        let config = Config::from(Cli::try_parse_from(["petalist", "-n", "Ada"]).unwrap());
        assert_eq!(config.username, "Ada");
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert_eq!(config.data, None);
        assert!(!config.batch);
        assert_eq!(config.greeting(), "Hello Ada,");
    }

    #[test]
    fn long_flags() {
        let cli = Cli::try_parse_from([
            "petalist",
            "--username",
            "Irina",
            "--results-dir",
            "out",
            "--data",
            "iris.json",
            "--batch",
        ])
        .unwrap();
        let config = Config::from(cli);
        assert_eq!(config.results_dir, PathBuf::from("out"));
        assert_eq!(config.data, Some(PathBuf::from("iris.json")));
        assert!(config.batch);
    }
}
