use clap::{ArgAction, Parser, Subcommand, ValueHint};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    arg_required_else_help = true
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use a custom repository file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Define new, empty repositories
    #[command(arg_required_else_help = true)]
    #[clap(visible_alias = "add")]
    Define {
        /// Repository names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Remove repository definitions
    #[command(arg_required_else_help = true)]
    #[clap(visible_alias = "rm")]
    Forget {
        /// Repository names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Set repository attributes
    #[command(arg_required_else_help = true)]
    Set {
        /// Repository name
        name: String,

        /// Attributes to set, as KEY=VALUE
        #[arg(required = true)]
        attributes: Vec<String>,
    },

    /// Show the attributes of a repository
    #[command(arg_required_else_help = true)]
    Show {
        /// Repository name
        name: String,

        /// Print the password instead of masking it
        #[arg(long)]
        show_password: bool,
    },

    /// List defined repositories
    #[clap(visible_alias = "ls")]
    List,

    /// Check that repositories resolve to a usable definition
    Check {
        /// Repository names (all repositories if omitted)
        names: Vec<String>,
    },

    /// List supported repository types and attributes
    Types,
}
