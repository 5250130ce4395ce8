use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "thinkdsa",
    version,
    about = "Socratic hints and understanding scores for coding problems"
)]
pub struct Cli {
    /// Configuration file (defaults to config/thinkdsa.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Silence logging
    #[arg(long, short, global = true)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask Sudo for a hint on a problem, optionally with your current code
    Hint(HintArgs),
    /// Show the stored score for a problem, or every stored score
    Score {
        title: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Write a default configuration file
    Init {
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct HintArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "description_file")]
    pub description: Option<String>,
    #[arg(long)]
    pub description_file: Option<PathBuf>,
    #[arg(long)]
    pub language: Option<String>,
    /// Code to review; omit for a first, language-agnostic hint
    #[arg(long, conflicts_with = "code_file")]
    pub code: Option<String>,
    #[arg(long)]
    pub code_file: Option<PathBuf>,
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl HintArgs {
    /// Code was explicitly supplied, even if blank.
    pub fn wants_code_feedback(&self) -> bool {
        self.code.is_some() || self.code_file.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hint_with_code_file() {
        let cli = Cli::parse_from([
            "thinkdsa",
            "hint",
            "--title",
            "1. Two Sum",
            "--language",
            "Python3",
            "--code-file",
            "solution.py",
        ]);
        let Command::Hint(args) = cli.command else {
            panic!("expected hint command");
        };
        assert_eq!(args.title.as_deref(), Some("1. Two Sum"));
        assert_eq!(args.code_file, Some(PathBuf::from("solution.py")));
        assert!(args.wants_code_feedback());
    }

    #[test]
    fn code_and_code_file_conflict() {
        let result = Cli::try_parse_from([
            "thinkdsa",
            "hint",
            "--code",
            "x",
            "--code-file",
            "y.py",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::parse_from(["thinkdsa", "score", "--config", "alt.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        assert!(matches!(cli.command, Command::Score { title: None, json: false }));
    }
}
