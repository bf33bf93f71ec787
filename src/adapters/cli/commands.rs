//! Command execution.

use std::io::Write;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};

use crate::adapters::ai::OpenAIProvider;
use crate::adapters::storage::FileMemoryStorage;
use crate::application::{
    CoachingError, PreferenceStore, RequestCoachingCommand, RequestCoachingHandler,
};
use crate::config::{self, AppConfig};
use crate::domain::coaching::ConversationDraft;
use crate::domain::memory::{PreferencePatch, SetupForm};
use crate::domain::personality::{list_groups, profile};
use crate::ports::AIProvider;

use super::render;
use super::{CoachArgs, Cli, Commands, MemoryAction, MemorySetArgs, SetupArgs};

/// Everything a command needs.
pub struct CommandContext {
    pub store: PreferenceStore,
    /// The provider, or why one could not be built. Only `coach` needs it.
    pub provider: Result<Arc<dyn AIProvider>, config::ValidationError>,
}

impl CommandContext {
    /// Wires the context from loaded configuration.
    pub fn from_config(store: PreferenceStore, config: &AppConfig) -> Self {
        let provider = OpenAIProvider::from_config(&config.ai)
            .map(|p| Arc::new(p) as Arc<dyn AIProvider>);
        Self { store, provider }
    }

    /// Wires the context with an explicit provider.
    pub fn with_provider(store: PreferenceStore, provider: Arc<dyn AIProvider>) -> Self {
        Self {
            store,
            provider: Ok(provider),
        }
    }
}

/// Runs the parsed command against file storage and writes to stdout.
pub async fn run(cli: Cli, config: &AppConfig) -> Result<()> {
    let storage = FileMemoryStorage::new(config.storage.dir_path());
    tracing::debug!(path = %storage.record_path().display(), "Using preference record");

    let store = PreferenceStore::new(Arc::new(storage));
    store.hydrate().await;
    if let Some(notice) = store.notice() {
        eprintln!("{}", render::notice(&notice));
    }

    let ctx = CommandContext::from_config(store.clone(), config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = execute(cli.command, &ctx, &mut out).await;

    store.flush().await;
    if let Some(notice) = store.notice() {
        eprintln!("{}", render::notice(&notice));
    }

    outcome
}

/// Runs one command. The store must already be hydrated.
pub async fn execute(command: Commands, ctx: &CommandContext, out: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Setup(args) => setup(args, ctx, out),
        Commands::Memory { action } => memory(action, ctx, out).await,
        Commands::Coach(args) => coach(args, ctx, out).await,
        Commands::Profiles { code } => {
            let text = match code {
                Some(code) => render::profile_card(profile(code)),
                None => render::quadrant_overview(&list_groups()),
            };
            write!(out, "{}", text)?;
            Ok(())
        }
    }
}

fn setup(args: SetupArgs, ctx: &CommandContext, out: &mut dyn Write) -> Result<()> {
    if args.skip {
        ctx.store.skip_setup();
        writeln!(out, "Setup skipped. You can fill it in later with `reply-coach memory set`.")?;
        return Ok(());
    }

    let mut form = SetupForm::from_snapshot(&ctx.store.get());
    if let Some(name) = args.my_name {
        form.my_name = name;
    }
    if let Some(code) = args.my_type {
        form.my_type = code;
    }
    if let Some(name) = args.partner_name {
        form.partner_name = name;
    }
    if let Some(code) = args.partner_type {
        form.partner_type = code;
    }
    if let Some(tag) = args.relationship {
        form.relationship_tag = tag;
    }

    ctx.store
        .complete_setup(form)
        .context("Setup needs --my-name, --partner-name and --relationship")?;

    writeln!(out, "Setup complete.\n")?;
    write!(out, "{}", render::snapshot(&ctx.store.get()))?;
    Ok(())
}

fn patch_from(args: MemorySetArgs) -> PreferencePatch {
    PreferencePatch {
        my_name: args.my_name,
        my_type: args.my_type,
        partner_name: args.partner_name,
        partner_type: args.partner_type,
        relationship_tag: args.relationship,
        conversation_notes: args.notes,
        is_setup_complete: None,
    }
}

async fn memory(action: MemoryAction, ctx: &CommandContext, out: &mut dyn Write) -> Result<()> {
    match action {
        MemoryAction::Show { json } => {
            let snapshot = ctx.store.get();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
            } else {
                write!(out, "{}", render::snapshot(&snapshot))?;
            }
        }
        MemoryAction::Set(args) => {
            let patch = patch_from(args);
            if patch.is_empty() {
                bail!("Nothing to change; pass at least one field");
            }
            ctx.store.update(patch);
            write!(out, "{}", render::snapshot(&ctx.store.get()))?;
        }
        MemoryAction::Reset => {
            ctx.store.reset().await;
            writeln!(out, "Memory cleared.")?;
        }
    }
    Ok(())
}

async fn coach(args: CoachArgs, ctx: &CommandContext, out: &mut dyn Write) -> Result<()> {
    if !ctx.store.get().is_setup_complete {
        bail!("Run `reply-coach setup` first (or `reply-coach setup --skip`)");
    }

    let mut draft = ConversationDraft::new(args.incoming, args.reply);
    if let Some(goal) = args.goal {
        draft = draft.with_nuance_goal(goal);
    }
    if let Some(focus) = args.focus {
        draft = draft.with_focus(focus);
    }
    if let Some(tone) = args.tone {
        draft = draft.with_tone(tone);
    }
    draft.validate().map_err(CoachingError::from)?;

    let command = RequestCoachingCommand::from_store(&ctx.store, draft, args.advanced)
        .map_err(CoachingError::from)?;

    let provider = match &ctx.provider {
        Ok(provider) => Arc::clone(provider),
        Err(err) => return Err(CoachingError::from(err.clone()).into()),
    };
    let handler = RequestCoachingHandler::new(provider);

    let focus = command.draft.focus;
    let tone = command.draft.tone;
    let advanced = command.advanced;

    let result = handler.handle(command).await.map_err(|err| {
        if err.is_retryable() {
            anyhow!(err).context("Coaching request failed; this is usually temporary, try again")
        } else {
            anyhow!(err).context("Coaching request failed")
        }
    })?;

    if let Some(id) = args.pick {
        let option = result.reply(&id).ok_or_else(|| {
            let ids: Vec<_> = result.reply_options.iter().map(|o| o.id.as_str()).collect();
            anyhow!("No reply option '{}'; available: {}", id, ids.join(", "))
        })?;
        writeln!(out, "{}", option.message)?;
    } else if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    } else {
        if advanced {
            writeln!(out, "{}\n", render::steering(focus, tone))?;
        }
        write!(out, "{}", render::coaching_result(&result))?;
    }

    Ok(())
}
