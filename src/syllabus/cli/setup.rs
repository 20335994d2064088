use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "syllabus")]
#[command(version = get_version())]
#[command(about = "Build a course out of modules, links and files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding syllabus.json (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a script of course operations and print the resulting course
    #[command(alias = "r")]
    Run {
        /// Path to a JSON script (an array of steps)
        script: PathBuf,

        /// Only show what matches this search term
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Replay a script and print only the module outline
    #[command(alias = "o")]
    Outline {
        /// Path to a JSON script (an array of steps)
        script: PathBuf,

        /// Only show what matches this search term
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_search() {
        let cli = Cli::try_parse_from(["syllabus", "run", "course.json", "--search", "lab"]).unwrap();
        match cli.command {
            Commands::Run { script, search } => {
                assert_eq!(script, PathBuf::from("course.json"));
                assert_eq!(search.as_deref(), Some("lab"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli =
            Cli::try_parse_from(["syllabus", "outline", "c.json", "-v", "--config", "/tmp/x"])
                .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(cli.command, Commands::Outline { search: None, .. }));
    }

    #[test]
    fn script_is_required() {
        assert!(Cli::try_parse_from(["syllabus", "run"]).is_err());
    }
}
