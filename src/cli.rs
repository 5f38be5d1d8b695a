use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use specseg::segment::FallbackPolicy;
use specseg::specs::SortKey;

#[derive(Parser, Debug)]
#[command(
    name = "specseg",
    version,
    about = "Section segmentation and outline tooling for extracted documents"
)]
pub struct Cli {
    /// Engine config (JSON); flags given on the command line take precedence.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Lines(LinesArgs),
    Sections(SectionsArgs),
    Outline(OutlineArgs),
    Progress(ProgressArgs),
    Window(WindowArgs),
    Specs(SpecsArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct LinesArgs {
    #[arg(long)]
    pub document: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum FallbackMode {
    DocumentStart,
    Empty,
}

impl FallbackMode {
    pub fn policy(self) -> FallbackPolicy {
        match self {
            Self::DocumentStart => FallbackPolicy::DocumentStart,
            Self::Empty => FallbackPolicy::Empty,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SectionsArgs {
    #[arg(long)]
    pub document: PathBuf,

    #[arg(long)]
    pub headers: PathBuf,

    #[arg(long)]
    pub section: Option<String>,

    #[arg(long, value_enum)]
    pub fallback: Option<FallbackMode>,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct OutlineArgs {
    #[arg(long)]
    pub headers: PathBuf,

    #[arg(long, default_value_t = false)]
    pub flat: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ProgressArgs {
    #[arg(long)]
    pub headers: PathBuf,

    #[arg(long)]
    pub specs: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct WindowArgs {
    #[arg(long)]
    pub document: PathBuf,

    #[arg(long, default_value_t = 0.0)]
    pub scroll_offset: f64,

    #[arg(long, default_value_t = 720.0)]
    pub viewport_height: f64,

    #[arg(long)]
    pub row_height: Option<f64>,

    #[arg(long)]
    pub overscan: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum SortColumn {
    SectionNumber,
    SectionName,
    Specification,
    Domain,
}

impl SortColumn {
    pub fn key(self) -> SortKey {
        match self {
            Self::SectionNumber => SortKey::SectionNumber,
            Self::SectionName => SortKey::SectionName,
            Self::Specification => SortKey::Specification,
            Self::Domain => SortKey::Domain,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SpecsArgs {
    #[arg(long)]
    pub specs: PathBuf,

    #[arg(long, default_value = "")]
    pub search: String,

    #[arg(long, value_enum, default_value_t = SortColumn::SectionNumber)]
    pub sort_key: SortColumn,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long)]
    pub document: PathBuf,

    #[arg(long)]
    pub headers: Option<PathBuf>,
}
