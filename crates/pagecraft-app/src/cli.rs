//! Command-line handling for the `pagecraft` binary.

use crate::outline::outline;
use crate::session::{Session, SessionError, SessionReport, SessionRunner};
use pagecraft_core::storage::LAST_PROJECT_KEY;
use pagecraft_core::{AutoSaveManager, BuilderConfig, FileStorage, ProjectDocument, Storage};
use std::path::PathBuf;
use std::sync::Arc;

pub const USAGE: &str = "\
usage: pagecraft [options] <session.json>

options:
  --config <file>    builder config (overrides the session's own)
  --out <file>       write the resulting project JSON here
  --project <id>     open and save this project in the project store
  --store <dir>      project store directory (default: user data dir)
  --list             list projects in the store and exit
  --shortcuts        list keyboard shortcuts and exit
  -h, --help         show this help";

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub session: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub project: Option<String>,
    pub store: Option<PathBuf>,
    pub list: bool,
    pub shortcuts: bool,
    pub help: bool,
}

impl Args {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, SessionError> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .ok_or_else(|| SessionError::Usage(format!("{flag} needs a value")))
            };
            match arg.as_str() {
                "--config" => parsed.config = Some(value("--config")?.into()),
                "--out" => parsed.out = Some(value("--out")?.into()),
                "--project" => parsed.project = Some(value("--project")?),
                "--store" => parsed.store = Some(value("--store")?.into()),
                "--list" => parsed.list = true,
                "--shortcuts" => parsed.shortcuts = true,
                "-h" | "--help" => parsed.help = true,
                flag if flag.starts_with('-') => {
                    return Err(SessionError::Usage(format!("unknown option {flag}")));
                }
                _ if parsed.session.is_some() => {
                    return Err(SessionError::Usage(format!("unexpected argument {arg}")));
                }
                _ => parsed.session = Some(arg.into()),
            }
        }
        Ok(parsed)
    }
}

fn open_store(args: &Args) -> Result<FileStorage, SessionError> {
    Ok(match &args.store {
        Some(dir) => FileStorage::new(dir.clone())?,
        None => FileStorage::default_location()?,
    })
}

/// Replay the session named in `args`, print the active page outline and
/// persist the result. Returns the report for the caller to summarise.
pub fn run(args: &Args) -> Result<SessionReport, SessionError> {
    let Some(session_path) = &args.session else {
        return Err(SessionError::Usage("missing session file".to_string()));
    };
    let session = Session::load(session_path)?;
    let config = match &args.config {
        Some(path) => BuilderConfig::load(path)?,
        None => session.config.clone().unwrap_or_default(),
    };

    let mut autosave = match &args.project {
        Some(id) => {
            let mut manager = AutoSaveManager::new(Arc::new(open_store(args)?));
            manager.set_project_id(id.clone());
            Some(manager)
        }
        None => None,
    };

    let document = match autosave.as_mut() {
        Some(manager) => {
            let id = manager.project_id().to_string();
            if pollster::block_on(manager.exists(&id))? {
                log::info!("Opening project '{id}'");
                pollster::block_on(manager.load(&id))?
            } else {
                ProjectDocument::new()
            }
        }
        None => ProjectDocument::new(),
    };

    let mut runner = SessionRunner::with_document(document, config);
    if let Some(manager) = &autosave {
        manager.watch(runner.controller_mut());
    }
    runner.run(&session.steps)?;

    print!("{}", outline(runner.controller()));

    // Flush on exit regardless of the autosave interval.
    if let Some(manager) = autosave.as_mut().filter(|m| m.is_dirty()) {
        pollster::block_on(manager.save(runner.controller().document()))?;
        log::info!(
            "Saved project '{}' to {}",
            manager.project_id(),
            manager.storage().base_path().display()
        );
    }

    if let Some(out) = &args.out {
        let json = runner
            .controller()
            .document()
            .to_json()
            .map_err(SessionError::Parse)?;
        std::fs::write(out, json).map_err(|source| SessionError::Io {
            path: out.clone(),
            source,
        })?;
        log::info!("Wrote {}", out.display());
    }

    Ok(runner.report())
}

/// IDs in the project store.
pub fn list_projects(args: &Args) -> Result<Vec<String>, SessionError> {
    let store = open_store(args)?;
    let mut ids = pollster::block_on(store.list())?;
    ids.retain(|id| id != LAST_PROJECT_KEY);
    Ok(ids)
}
