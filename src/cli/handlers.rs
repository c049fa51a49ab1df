use std::path::{Path, PathBuf};

use chrono::Local;
use indexmap::IndexMap;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::doc::MemDoc;
use crate::io::config_io;
use crate::io::doc_io;
use crate::io::props::FileProps;
use crate::model::card::CardRef;
use crate::ops::registry_ops::{self, InsertPosition};
use crate::ops::view::{self, ViewMode};
use crate::ops::{board, goal_ops, renumber, settings_ops, tag_ops};

/// An open draft: the document, its property stores, and where to save back
struct Session {
    path: PathBuf,
    doc: MemDoc,
    props: FileProps,
}

impl Session {
    fn open(file: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = match file {
            Some(f) => PathBuf::from(f),
            None => {
                let cwd = std::env::current_dir()?;
                let config_path = config_io::discover_config(&cwd)
                    .ok_or("no draft given: pass -f FILE or create tagboard.toml")?;
                let config = config_io::load_config(&config_path)?;
                config_path
                    .parent()
                    .unwrap_or(Path::new("."))
                    .join(config.document.file)
            }
        };
        let doc = doc_io::load_document(&path)?;
        let props = FileProps::open(&path);
        Ok(Session { path, doc, props })
    }

    fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        doc_io::save_document(&self.path, &self.doc)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let mut session = Session::open(cli.file.as_deref())?;

    match cli.command {
        Commands::Tags(cmd) => match cmd.action {
            None => cmd_tags_list(&mut session, json),
            Some(TagsAction::Add(args)) => cmd_tags_add(&mut session, args),
            Some(TagsAction::Edit(args)) => cmd_tags_edit(&mut session, args),
            Some(TagsAction::Rm(args)) => cmd_tags_rm(&mut session, args),
        },
        Commands::Apply(args) => cmd_apply(&mut session, args),
        Commands::Renumber => cmd_renumber(&mut session),
        Commands::Board => cmd_board(&mut session, json),
        Commands::Rebuild(args) => cmd_rebuild(&mut session, args),
        Commands::View(args) => cmd_view(&mut session, args),
        Commands::Goal(cmd) => match cmd.action {
            None => cmd_goal_show(&mut session, json),
            Some(GoalAction::Set(args)) => cmd_goal_set(&mut session, args),
            Some(GoalAction::Milestone(args)) => cmd_goal_milestone(&mut session, args),
        },
        Commands::Tabs(cmd) => match cmd.action {
            None => cmd_tabs_list(&mut session, json),
            Some(TabsAction::Set(args)) => cmd_tabs_set(&mut session, args),
        },
    }
}

// ---------------------------------------------------------------------------
// Tag management
// ---------------------------------------------------------------------------

fn cmd_tags_list(session: &mut Session, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tags = registry_ops::load_registry(&mut session.props)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&TagListJson { tags })?);
        return Ok(());
    }
    for tag in &tags {
        println!("{} {}  {}", color_swatch(&tag.color), tag.name, tag.color);
    }
    Ok(())
}

fn cmd_tags_add(session: &mut Session, args: AddTagArgs) -> Result<(), Box<dyn std::error::Error>> {
    let position = match args.after {
        Some(anchor) => InsertPosition::After(anchor),
        None => InsertPosition::End,
    };
    let tag = registry_ops::create_tag(&mut session.props, &args.name, &args.color, position)?;
    println!("created tag \"{}\"", tag.name);
    Ok(())
}

fn cmd_tags_edit(
    session: &mut Session,
    args: EditTagArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let tag = registry_ops::update_tag(
        &mut session.props,
        &mut session.doc,
        &args.old_name,
        &args.name,
        &args.color,
    )?;
    session.save()?;
    println!("updated tag \"{}\"", tag.name);
    Ok(())
}

fn cmd_tags_rm(session: &mut Session, args: RmTagArgs) -> Result<(), Box<dyn std::error::Error>> {
    registry_ops::delete_tag(&mut session.props, &mut session.doc, &args.name)?;
    session.save()?;
    println!("deleted tag \"{}\" and stripped its markers", args.name);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tagging, renumbering, board
// ---------------------------------------------------------------------------

fn cmd_apply(session: &mut Session, args: ApplyArgs) -> Result<(), Box<dyn std::error::Error>> {
    // paragraph numbers are 1-based on the CLI
    if args.para.contains(&0) {
        return Err("paragraph numbers start at 1 (0 is not a valid paragraph)".into());
    }
    let targets: Vec<usize> = args.para.iter().map(|&p| p - 1).collect();
    let out = tag_ops::apply_tag(&mut session.doc, &mut session.props, &targets, &args.category)?;
    session.save()?;
    println!("applied {} \"{}\" tag(s)", out.count, out.category);
    Ok(())
}

fn cmd_renumber(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    let out = renumber::renumber_all(&mut session.doc, &mut session.props)?;
    session.save()?;
    if out.is_noop() {
        println!("no tags found to renumber");
    } else {
        println!(
            "tagged {} untagged paragraph(s), renumbered {} marker(s)",
            out.inferred, out.renumbered
        );
    }
    Ok(())
}

fn cmd_board(session: &mut Session, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tags = registry_ops::load_registry(&mut session.props)?;
    let cards = board::snapshot(&session.doc);
    if json {
        let payload = BoardJson {
            kanban_data: cards,
            all_tags: tags,
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }
    let columns = board::group_cards(cards, &tags);
    for (category, cards) in &columns {
        println!("{} ({})", category, cards.len());
        for card in cards {
            match &card.id {
                Some(id) => println!(
                    "  {:>3}. {}  [{}-{}]",
                    card.original_index + 1,
                    card.display_text,
                    card.category,
                    id
                ),
                None => println!("  {:>3}. {}", card.original_index + 1, card.display_text),
            }
        }
    }
    Ok(())
}

fn cmd_rebuild(session: &mut Session, args: RebuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    let payload = std::fs::read_to_string(&args.board)
        .map_err(|e| format!("could not read {}: {}", args.board, e))?;
    let columns: IndexMap<String, Vec<CardRef>> = serde_json::from_str(&payload)
        .map_err(|e| format!("could not parse board payload: {}", e))?;
    let out = board::reorganize(&mut session.doc, &mut session.props, &columns)?;
    session.save()?;
    println!(
        "document rebuilt ({} marker(s) renumbered)",
        out.renumbered
    );
    Ok(())
}

fn cmd_view(session: &mut Session, args: ViewArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tags = registry_ops::load_registry(&mut session.props)?;
    let mode = match args.mode {
        ViewModeArg::Standard => ViewMode::Standard,
        ViewModeArg::Tags => ViewMode::TagsOnly,
        ViewModeArg::Audit => ViewMode::StructureAudit,
    };
    view::apply_view(&mut session.doc, &tags, mode);
    print!("{}", render_document(&session.doc));
    Ok(())
}

// ---------------------------------------------------------------------------
// Goals and tabs
// ---------------------------------------------------------------------------

fn cmd_goal_show(session: &mut Session, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let today = Local::now().date_naive();
    let status = goal_ops::goal_status(&session.doc, &mut session.props, today)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }
    println!(
        "{} / {} words ({} today, daily target {})",
        status.current_word_count,
        status.settings.target,
        status.words_written_today,
        status.settings.daily_target
    );
    if !status.settings.due_date.is_empty() {
        println!("due: {}", status.settings.due_date);
    }
    for goal in &status.custom_goals {
        let hit = if status.current_word_count >= goal.target {
            "x"
        } else {
            " "
        };
        println!("  [{}] {} ({} words)", hit, goal.label, goal.target);
    }
    Ok(())
}

fn cmd_goal_set(session: &mut Session, args: SetGoalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let today = Local::now().date_naive();
    let status = goal_ops::goal_status(&session.doc, &mut session.props, today)?;
    let mut settings = status.settings;
    if let Some(target) = args.target {
        settings.target = target;
    }
    if let Some(daily) = args.daily {
        settings.daily_target = daily;
    }
    if let Some(due) = args.due {
        settings.due_date = due;
    }
    goal_ops::save_goal_settings(&mut session.props, &settings)?;
    println!("goal settings saved");
    Ok(())
}

fn cmd_goal_milestone(
    session: &mut Session,
    args: MilestoneArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    goal_ops::add_milestone(&mut session.props, &args.label, args.words)?;
    println!("added milestone \"{}\" ({} words)", args.label, args.words);
    Ok(())
}

fn cmd_tabs_list(session: &mut Session, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tabs = settings_ops::tab_settings(&mut session.props)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&TabListJson { tabs })?);
        return Ok(());
    }
    for tab in &tabs {
        println!("{}  ({})", tab.name, tab.id);
    }
    Ok(())
}

fn cmd_tabs_set(session: &mut Session, args: SetTabsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tabs = settings_ops::save_tab_settings(&mut session.props, &args.ids)?;
    println!("saved tab settings ({} visible)", tabs.len());
    Ok(())
}
