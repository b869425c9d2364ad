use clap::Parser;
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.pystylint.toml):
  Create this file in your project root to set defaults.
  The same keys are read from [tool.pystylint] in pyproject.toml.

  [pystylint]
  select = [\"E1001\", \"E1003\"]   # Only run these rules
  ignore = [\"E1002\"]            # Skip these rules
  verbose = false               # Append source lines to violations
  quiet = false                 # Stop at the first violation
  attr_decorator = \"attr.s\"     # Decorator validated by E1005
";

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pystylint - Python style checks over a parsed syntax tree",
    long_about = None,
    after_help = CONFIG_HELP
)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are legitimately booleans
pub struct Cli {
    /// Paths to check (files or directories).
    /// Directories are walked for *.py files, honoring .gitignore.
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Only run these rule codes (e.g. E1001). Repeatable.
    #[arg(long)]
    pub select: Vec<String>,

    /// Skip these rule codes. Repeatable.
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Append the offending source line to each violation.
    #[arg(short, long)]
    pub verbose: bool,

    /// Stop at the first violation and report only it.
    #[arg(short, long)]
    pub quiet: bool,

    /// Output raw JSON.
    #[arg(long)]
    pub json: bool,

    /// List the rule catalog and exit.
    #[arg(long)]
    pub list_rules: bool,
}
