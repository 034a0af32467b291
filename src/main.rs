//! GroupChat terminal shell
//!
//! Main application entry point

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::task::JoinHandle;
use tracing::{info, warn, error};

use groupchat::{
    config::Settings,
    backend::{ChatBackend, ConvexBackend},
    handlers::{self, Bubble, Ownership, ShellCommand},
    models::{IdentityChoice, Identity, LocalImage},
    services::{GroupDirectory, GroupRow, ImagePicker, MessageComposer, NoKeyboard, PickOptions, SendOutcome, ServiceFactory},
    state::{IdentityResolution, IdentityResolver, LocalStorage, SessionContext},
    utils::{logging, ChatError},
    I18n,
};

type Input = Lines<BufReader<Stdin>>;

/// Picker backed by a path typed on the command line
struct PathPicker {
    path: PathBuf,
}

#[async_trait]
impl ImagePicker for PathPicker {
    async fn pick(&self, _options: PickOptions) -> Option<Vec<LocalImage>> {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) if meta.is_file() => Some(vec![LocalImage::from_path(&self.path)]),
            _ => None,
        }
    }
}

/// The thread currently shown
struct OpenThread {
    title: String,
    composer: MessageComposer,
    watcher: JoinHandle<()>,
}

impl Drop for OpenThread {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", groupchat::info());

    // Initialize i18n system
    info!("Loading translations...");
    let mut i18n = I18n::new(&settings.i18n);
    i18n.load_translations().await?;
    let language = i18n.detect_language(std::env::var("LANG").ok().as_deref());
    let i18n = Arc::new(i18n);

    // Initialize backend
    info!(url = %settings.backend.url, "Connecting to backend...");
    let backend: Arc<dyn ChatBackend> = Arc::new(ConvexBackend::from_settings(&settings)?);
    let services = Arc::new(ServiceFactory::new(Arc::clone(&backend), &settings));

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let resolver = IdentityResolver::new(
        LocalStorage::from_config(&settings.storage),
        settings.chat.anonymous_name.clone(),
    );
    let identity = match resolver.resolve().await {
        IdentityResolution::Resolved(identity) => identity,
        IdentityResolution::PromptRequired => prompt_identity(&resolver, &i18n, &language, &mut input).await?,
    };

    let session = SessionContext::new(settings, identity, services, i18n, language);
    info!(identity = %session.identity, "Session ready");

    let mut greeting = session.greeting_fetcher();
    println!("{}", greeting.refresh(&session.identity).await);

    run_shell(&session, &mut input).await?;

    info!("GroupChat shell has been shut down.");
    Ok(())
}

/// Ask for a display name until one is accepted; a blank answer means anonymous
async fn prompt_identity(
    resolver: &IdentityResolver,
    i18n: &I18n,
    language: &str,
    input: &mut Input,
) -> anyhow::Result<Identity> {
    println!("{}", i18n.t("identity.prompt_title", language, None));
    println!("{}", i18n.t("identity.prompt_hint", language, None));

    loop {
        println!("{}", i18n.t("identity.prompt_description", language, None));
        let choice = match input.next_line().await? {
            Some(line) if !line.trim().is_empty() => IdentityChoice::Named(line),
            _ => IdentityChoice::Anonymous,
        };

        match resolver.choose(choice).await {
            Ok(identity) => return Ok(identity),
            Err(ChatError::InvalidInput(reason)) => warn!(reason = %reason, "Display name rejected"),
            Err(e) => return Err(e.into()),
        }
    }
}

async fn run_shell(session: &SessionContext, input: &mut Input) -> anyhow::Result<()> {
    let directory = session.directory();
    let mut rows = show_groups(session, directory).await;
    let mut thread: Option<OpenThread> = None;

    println!("{}", session.t("shell.help"));

    while let Some(line) = input.next_line().await? {
        let Some(command) = handlers::parse(&line, thread.is_some()) else {
            continue;
        };

        match command {
            ShellCommand::Groups => {
                thread = None;
                rows = show_groups(session, directory).await;
            }
            ShellCommand::Create(request) => match directory.create_group(request.clone()).await {
                Ok(_) => {
                    println!("{}", session.t_with("create.created", "name", request.name.trim()));
                    rows = show_groups(session, directory).await;
                }
                Err(e) => {
                    logging::log_chat_error("create_group", &e);
                    println!("{}", e);
                }
            },
            ShellCommand::Open(n) => match rows.get(n - 1) {
                Some(row) => {
                    drop(thread.take());
                    thread = Some(open_thread(session, directory, row).await);
                }
                None => println!("{}", session.t("thread.not_found")),
            },
            ShellCommand::Send(text) => match thread.as_ref() {
                Some(open) => send(session, &open.composer, text).await,
                None => println!("{}", session.t_with("shell.unknown", "command", line.trim())),
            },
            ShellCommand::Attach(path) => {
                if let Some(open) = thread.as_ref() {
                    let picker = PathPicker { path: PathBuf::from(&path) };
                    if open.composer.pick_image(&picker).await {
                        println!("{}", session.t_with("thread.image_staged", "path", &path));
                    }
                }
            }
            ShellCommand::Detach => {
                if let Some(open) = thread.as_ref() {
                    open.composer.clear_image();
                }
            }
            ShellCommand::Back => {
                if let Some(open) = thread.take() {
                    info!(title = %open.title, "Thread closed");
                }
                rows = show_groups(session, directory).await;
            }
            ShellCommand::Help => println!("{}", session.t("shell.help")),
            ShellCommand::Quit => break,
            ShellCommand::Unknown(text) => println!("{}", session.t_with("shell.unknown", "command", &text)),
        }
    }

    Ok(())
}

async fn show_groups(session: &SessionContext, directory: &GroupDirectory) -> Vec<GroupRow> {
    let groups = match directory.list_groups().await {
        Ok(groups) => groups,
        Err(e) => {
            error!(error = %e, "Failed to list groups");
            return Vec::new();
        }
    };

    let rows = GroupDirectory::rows(&groups);
    println!("== {} ==", session.t("directory.title"));
    if rows.is_empty() {
        println!("{}", session.t("directory.empty"));
    }
    for (i, row) in rows.iter().enumerate() {
        println!("{:>3}. {}  {}", i + 1, row.name, row.description);
    }
    rows
}

async fn open_thread(session: &SessionContext, directory: &GroupDirectory, row: &GroupRow) -> OpenThread {
    let route = directory.open(row);
    let title = match directory.title(&route.group_id).await {
        Ok(Some(title)) => title,
        Ok(None) => session.t("thread.not_found"),
        Err(e) => {
            warn!(group_id = %route.group_id, error = %e, "Failed to load group title");
            row.name.clone()
        }
    };
    println!("== {} ==", title);
    println!("{}", session.t("thread.placeholder"));

    let subscription = session.watch_thread(route.group_id.clone());
    let renderer = session.renderer();
    let scroll = session.auto_scroll();
    let watcher = tokio::spawn(async move {
        let mut shown = HashSet::new();
        let mut updates = subscription.stream();
        while let Some(update) = updates.next().await {
            match update {
                Ok(messages) => {
                    for bubble in renderer.render(&messages) {
                        if shown.insert(bubble.message_id.clone()) {
                            print_bubble(&bubble);
                        }
                    }
                    scroll.schedule(|| {
                        use std::io::Write;
                        let _ = std::io::stdout().flush();
                    });
                }
                Err(e) => warn!(error = %e, "Message subscription update failed"),
            }
        }
    });

    OpenThread {
        title,
        composer: session.open_thread(route.group_id, Arc::new(NoKeyboard)),
        watcher,
    }
}

fn print_bubble(bubble: &Bubble) {
    let indent = match bubble.ownership {
        Ownership::Own => "        ",
        Ownership::Other => "",
    };
    if let Some(text) = &bubble.text {
        println!("{}{}", indent, text);
    }
    if let Some(url) = &bubble.image_url {
        println!("{}[{}]", indent, url);
    }
    println!("{}  -- {} {}", indent, bubble.caption, bubble.sent_at);
}

async fn send(session: &SessionContext, composer: &MessageComposer, text: String) {
    if !text.is_empty() {
        composer.set_text(text);
    }
    if composer.staged_image().is_some() {
        println!("{}", session.t("thread.uploading"));
    }

    match composer.send().await {
        Ok(SendOutcome::Sent) | Ok(SendOutcome::Uploaded) => {}
        Ok(SendOutcome::UploadFailed { .. }) => println!("{}", session.t("thread.upload_failed")),
        Err(ChatError::EmptyMessage) => println!("{}", session.t("thread.empty_draft")),
        Err(ChatError::SendInProgress { .. }) => println!("{}", session.t("thread.busy")),
        Err(e) => {
            logging::log_chat_error("send", &e);
            println!("{}", e);
        }
    }
}
