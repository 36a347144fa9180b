//! promptgen's main application entry point and orchestration logic.
//! Handles command-line argument parsing, value collection and rendering,
//! and coordinates the session draft and prompt store.

use std::io::Read;
use std::time::Instant;

use chrono::Utc;
use log::{debug, warn};
use promptgen::{
    cli::{get_args, parse_assignment, Args},
    config::{load_config, load_config_file, load_values, Config},
    error::{default_error_handler, PromptgenError, PromptgenResult},
    expand::{combination_count, expand},
    logger::init_logger,
    placeholder::{scan, ValueMap},
    prompt::{prompt_values, DialoguerPrompter},
    reconcile::reconcile,
    render::render,
    session::{DraftStore, SessionDraft, SessionTracker},
    store::{JsonFileRepository, PromptRepository},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Reads the template from a file, or from stdin when `source` is "-".
fn read_template(source: &str) -> PromptgenResult<String> {
    if source == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(source).map_err(PromptgenError::IoError)
    }
}

fn get_config(args: &Args) -> PromptgenResult<Config> {
    match &args.config {
        Some(path) => load_config_file(path),
        None => load_config(std::env::current_dir()?),
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads configuration and the template
/// 2. Scans the template for placeholders
/// 3. Collects previous values (session draft, values file, --set)
/// 4. Reconciles them against the placeholders and optionally prompts
/// 5. Renders or expands and prints the prompts
/// 6. Writes the session draft and optionally saves to the prompt store
fn run(args: Args) -> PromptgenResult<()> {
    let config = get_config(&args)?;
    let template = read_template(&args.template)?;
    let names = scan(&template);

    if args.list {
        for name in &names {
            println!("{name}");
        }
        return Ok(());
    }

    let draft_store = DraftStore::new(&config.draft_path, config.session.max_age());
    let mut tracker = SessionTracker::new(&config.session);

    let mut previous = ValueMap::new();
    if args.resume {
        match tracker.restore(&draft_store, Utc::now()) {
            Some(draft) => {
                debug!("Resuming values from draft '{}'", draft.title);
                previous = draft.values;
            }
            None => warn!("No session draft to resume"),
        }
    }
    if let Some(path) = &args.values {
        previous.extend(load_values(path)?);
    }
    for assignment in &args.set {
        let (name, value) = parse_assignment(assignment)?;
        previous.insert(name, value);
    }

    let mut values = reconcile(&names, &previous);
    if args.interactive {
        values = prompt_values(&DialoguerPrompter::new(), &names, &values)?;
    }

    let prompts = if args.multi {
        let count = combination_count(&values);
        if let Some(limit) = config.max_combinations {
            if count > limit {
                return Err(PromptgenError::TooManyCombinations { count, limit });
            }
        }
        expand(&template, &values)
    } else {
        vec![render(&template, &values)]
    };
    println!("{}", prompts.join("\n\n"));

    tracker.observe(SessionDraft::new(&template, &values, &args.title), Instant::now());
    if let Err(e) = tracker.flush_now(&draft_store) {
        warn!("Failed to save session draft: {e}");
    }

    if let Some(title) = &args.save {
        let mut repo = JsonFileRepository::new(&config.store_path);
        let id = repo.save_prompt(title, &template, &values)?;
        eprintln!("Saved prompt {id} to '{}'.", repo.path().display());
    }

    Ok(())
}
