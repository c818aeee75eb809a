use clap::{ArgGroup, Args, Parser, Subcommand};
use ramapp::core::io::table::Delimiter;
use ramapp::engine::config::InclusionPolicy;
use ramapp::workflows::analyze::AngleKind;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The ramapp developers",
    version,
    about = "rama - Backbone and side-chain torsion angles, Ramachandran densities and outlier statistics from PDB files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute backbone (phi/psi/omega) or side-chain (chi1/chi2) angles for one structure.
    Angles(AnglesArgs),
    /// Compute backbone angles for every .pdb file in a directory into one dataset.
    Batch(BatchArgs),
    /// Build a normalized phi/psi density table from an angle dataset.
    Density(DensityArgs),
    /// Flag phi/psi outliers in an angle dataset using the 1.5 IQR rule.
    Outliers(OutliersArgs),
    /// Report helix and sheet content declared in a PDB file.
    Secondary(SecondaryArgs),
    /// Download structures from the RCSB Protein Data Bank.
    Fetch(FetchArgs),
}

/// Settings shared by every command that runs an analysis.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisOptions {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Which residues produce a backbone record [legacy, all-computed, any-computed].
    #[arg(long, value_name = "POLICY")]
    pub policy: Option<InclusionPolicy>,

    /// Decimal places kept on backbone angles (0-6).
    #[arg(long, value_name = "NUM")]
    pub decimals: Option<u32>,

    /// Bin width in degrees for density tables.
    #[arg(long, value_name = "DEGREES")]
    pub bin_size: Option<f64>,

    /// Delimiter for tables [tab, comma]. Inferred from the file extension when omitted.
    #[arg(long, value_name = "DELIM")]
    pub delimiter: Option<Delimiter>,

    /// Process chains and files one at a time.
    #[arg(long)]
    pub no_parallel: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S angles.decimals=3
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `angles` subcommand.
#[derive(Args, Debug)]
pub struct AnglesArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output table. Written to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Angle kind to compute [backbone, chi1, chi2].
    #[arg(short, long, default_value = "backbone", value_name = "KIND")]
    pub kind: AngleKind,

    #[command(flatten)]
    pub analysis: AnalysisOptions,
}

/// Arguments for the `batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory containing .pdb files.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub dir: PathBuf,

    /// Path for the output dataset.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Append phi/psi outlier flag columns to the dataset.
    #[arg(long)]
    pub with_outliers: bool,

    #[command(flatten)]
    pub analysis: AnalysisOptions,
}

/// Arguments for the `density` subcommand.
#[derive(Args, Debug)]
pub struct DensityArgs {
    /// Angle table or dataset with `phi` and `psi` columns.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the density table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub analysis: AnalysisOptions,
}

/// Arguments for the `outliers` subcommand.
#[derive(Args, Debug)]
pub struct OutliersArgs {
    /// Angle table or dataset to inspect.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the flagged table. Written to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub analysis: AnalysisOptions,
}

/// Arguments for the `secondary` subcommand.
#[derive(Args, Debug)]
pub struct SecondaryArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}

/// Arguments for the `fetch` subcommand.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).multiple(true).args(["ids", "list"])))]
pub struct FetchArgs {
    /// PDB identifiers to download (e.g., 1CRN). Can be repeated.
    #[arg(long = "id", value_name = "ID", num_args(1..))]
    pub ids: Vec<String>,

    /// Text file listing PDB identifiers, one per line.
    #[arg(long, value_name = "PATH")]
    pub list: Option<PathBuf>,

    /// Directory to store downloaded files. Defaults to the user data directory.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Download again even if the file already exists.
    #[arg(short, long)]
    pub force: bool,

    /// Base URL of the download server, for mirrors of the RCSB archive.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}
