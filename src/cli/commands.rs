use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "tgb", about = concat!("[#] tagboard v", env!("CARGO_PKG_VERSION"), " - paragraph tags for plain-text drafts"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Draft file (default: from tagboard.toml discovered upward from CWD)
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tag categories, or manage them
    Tags(TagsCmd),
    /// Tag paragraphs with a category, assigning the next identifiers
    Apply(ApplyArgs),
    /// Infer missing tags from neighbors and renumber every marker
    Renumber,
    /// Show the board: cards grouped by category
    Board,
    /// Rebuild the document from an edited board payload
    Rebuild(RebuildArgs),
    /// Apply a view mode and print the styled document
    View(ViewArgs),
    /// Show writing goals, or configure them
    Goal(GoalCmd),
    /// Show visible sidebar tabs, or set them
    Tabs(TabsCmd),
}

// ---------------------------------------------------------------------------
// Tag management
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TagsCmd {
    #[command(subcommand)]
    pub action: Option<TagsAction>,
}

#[derive(Subcommand)]
pub enum TagsAction {
    /// Create a tag category
    Add(AddTagArgs),
    /// Rename and/or recolor a tag category
    Edit(EditTagArgs),
    /// Delete a tag category and strip its markers from the document
    Rm(RmTagArgs),
}

#[derive(Args)]
pub struct AddTagArgs {
    /// Tag name (normalized to lowercase-hyphenated)
    pub name: String,
    /// Tag color (hex like "#d9ead3")
    pub color: String,
    /// Insert after this tag (default: end of registry)
    #[arg(long)]
    pub after: Option<String>,
}

#[derive(Args)]
pub struct EditTagArgs {
    /// Current tag name
    pub old_name: String,
    /// New name (may equal the old one)
    pub name: String,
    /// New color
    pub color: String,
}

#[derive(Args)]
pub struct RmTagArgs {
    /// Tag name to delete
    pub name: String,
}

// ---------------------------------------------------------------------------
// Tagging and board
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ApplyArgs {
    /// Category name
    pub category: String,
    /// Paragraph numbers as printed by `tgb board` (1-based, comma-separated)
    #[arg(long, value_delimiter = ',', required = true)]
    pub para: Vec<usize>,
}

#[derive(Args)]
pub struct RebuildArgs {
    /// JSON file: {"intro": [{"originalIndex": 0, "id": "1"}, ...], ...}
    pub board: String,
}

#[derive(Args)]
pub struct ViewArgs {
    #[arg(value_enum)]
    pub mode: ViewModeArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ViewModeArg {
    /// Markers de-emphasized
    Standard,
    /// Marker spans colored by category
    Tags,
    /// Whole paragraphs colored by category
    Audit,
}

// ---------------------------------------------------------------------------
// Goals and tabs
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct GoalCmd {
    #[command(subcommand)]
    pub action: Option<GoalAction>,
}

#[derive(Subcommand)]
pub enum GoalAction {
    /// Set goal targets
    Set(SetGoalArgs),
    /// Add a milestone goal
    Milestone(MilestoneArgs),
}

#[derive(Args)]
pub struct SetGoalArgs {
    /// Total word target
    #[arg(long)]
    pub target: Option<u64>,
    /// Words-per-day target
    #[arg(long)]
    pub daily: Option<u64>,
    /// Due date (free-form)
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct MilestoneArgs {
    pub label: String,
    pub words: u64,
}

#[derive(Args)]
pub struct TabsCmd {
    #[command(subcommand)]
    pub action: Option<TabsAction>,
}

#[derive(Subcommand)]
pub enum TabsAction {
    /// Set the visible tabs by ID
    Set(SetTabsArgs),
}

#[derive(Args)]
pub struct SetTabsArgs {
    /// Tab IDs to keep visible (e.g. architectTab taggerTab)
    #[arg(required = true)]
    pub ids: Vec<String>,
}
