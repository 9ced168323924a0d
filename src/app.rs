//! Interactive application shell
//!
//! Ties the components together for the CLI commands: the session store,
//! the job controller, the persona directory, and the view router. The
//! `generate` flow loops on [`route`] and acts on whatever screen comes
//! back, which keeps every transition in one place.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::{AuthToken, DeckService, DeckSpec, HttpDeckService, SourceArtifact};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::job::{JobController, JobControllerConfig, JobEvent, JobStatus};
use crate::persona::{self, DirectoryView, PageSize};
use crate::router::{route, UiFlags, View, WorkspacePane};
use crate::session::{FsCredentialStore, SessionStore};

/// Wizard inputs collected from CLI flags; missing fields are prompted for
#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub file: Option<PathBuf>,
    pub org: Option<String>,
    pub purpose: Option<String>,
    pub audience: Option<String>,
    pub message: Option<String>,
    pub vibe: Option<String>,
    pub output: Option<PathBuf>,
    pub change_persona: bool,
}

/// Outcome of one wait inside the progress loop
enum ProgressStep {
    Event(Option<JobEvent>),
    Cancelled,
}

/// The assembled client application
pub struct App {
    config: ClientConfig,
    service: Arc<dyn DeckService>,
    session: SessionStore,
    jobs: JobController,
    job_events: mpsc::Receiver<JobEvent>,
    flags: UiFlags,
}

impl App {
    /// Wire up the components from configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let auth = AuthToken::new();
        let service: Arc<dyn DeckService> =
            Arc::new(HttpDeckService::new(&config.service, auth.clone())?);
        let credentials = FsCredentialStore::new(config.data_dir());
        let session = SessionStore::new(service.clone(), Box::new(credentials), auth);

        let job_config = JobControllerConfig {
            poll_interval: std::time::Duration::from_millis(config.polling.interval_ms),
            ..JobControllerConfig::default()
        };
        let (jobs, job_events) = JobController::new(job_config, service.clone());

        Ok(Self {
            config,
            service,
            session,
            jobs,
            job_events,
            flags: UiFlags::default(),
        })
    }

    // ─────────────────────────────────────────────────────────────
    // One-Shot Commands
    // ─────────────────────────────────────────────────────────────

    /// `deckgen login`
    pub async fn login(&mut self, email: Option<String>, password: Option<String>) -> Result<()> {
        let email = match email {
            Some(email) => email,
            None => prompt("Email")?,
        };
        let password = match password {
            Some(password) => password,
            None => prompt("Password")?,
        };

        let user = self.session.login(&email, &password).await?;
        println!("Signed in as {} <{}>", user.display_name(), user.email);

        if user.persona.is_none() {
            println!();
            println!("No persona is set on this account yet.");
            self.select_persona_interactively().await?;
        } else {
            println!("Persona: {}", persona::format_persona(user.persona.as_deref()));
        }
        Ok(())
    }

    /// `deckgen register`
    pub async fn register(
        &mut self,
        first_name: &str,
        last_name: &str,
        company: &str,
        email: &str,
        password: Option<String>,
    ) -> Result<()> {
        let password = match password {
            Some(password) => password,
            None => prompt("Password")?,
        };

        let user = self
            .session
            .register(first_name, last_name, company, email, &password)
            .await?;
        println!("Account created. Signed in as {} <{}>", user.display_name(), user.email);

        // A fresh account always proceeds directly to persona selection
        println!();
        self.select_persona_interactively().await?;
        Ok(())
    }

    /// `deckgen logout`
    pub fn logout(&mut self) {
        self.jobs.reset();
        self.session.logout();
        println!("Signed out.");
    }

    /// `deckgen whoami`
    pub async fn whoami(&mut self) -> Result<()> {
        if !self.session.bootstrap().await {
            return Err(Error::NotSignedIn);
        }
        let session = match self.session.current() {
            Some(session) => session,
            None => return Err(Error::NotSignedIn),
        };
        let user = &session.user;

        println!("Email:   {}", user.email);
        if let (Some(first), Some(last)) = (&user.first_name, &user.last_name) {
            println!("Name:    {} {}", first, last);
        }
        if let Some(company) = &user.company_name {
            println!("Company: {}", company);
        }
        println!("Persona: {}", persona::format_persona(user.persona.as_deref()));
        Ok(())
    }

    /// `deckgen persona show`
    pub async fn persona_show(&mut self) -> Result<()> {
        if !self.session.bootstrap().await {
            return Err(Error::NotSignedIn);
        }
        match self.session.persona() {
            Some(id) => {
                println!("{}", persona::format_persona(Some(&id)));
                if let Some(entry) = persona::find(&id) {
                    println!("  {} - {}", entry.title, entry.description);
                }
            }
            None => println!("No persona selected. Run 'deckgen persona set <id>'."),
        }
        Ok(())
    }

    /// `deckgen persona set <id>`
    pub async fn persona_set(&mut self, persona_id: &str) -> Result<()> {
        let entry = persona::find(persona_id)
            .ok_or_else(|| Error::persona_rejected(format!("Unknown persona '{}'", persona_id)))?;

        if !self.session.bootstrap().await {
            return Err(Error::NotSignedIn);
        }

        // A persona change invalidates whatever the workspace was showing
        self.jobs.reset();
        self.session.set_persona(entry.id).await?;
        println!("Persona set to {} ({})", entry.title, entry.id);
        Ok(())
    }

    /// `deckgen status <job-id>`
    pub async fn status(&mut self, job_id: &str) -> Result<()> {
        self.session.bootstrap().await;
        let status = self.service.job_status(job_id).await?;

        println!("Job:    {}", status.job_id);
        println!("Status: {}", status.status);
        if !status.current_step.is_empty() {
            println!("Step:   {}", status.current_step);
        }
        if let Some(error) = &status.error_msg {
            println!("Error:  {}", error);
        }
        Ok(())
    }

    /// `deckgen download <job-id>`
    pub async fn download(&mut self, job_id: &str, output: Option<PathBuf>) -> Result<()> {
        self.session.bootstrap().await;
        let path = self.save_deck(job_id, output).await?;
        println!("Deck saved to {}", path.display());
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // Generate Flow
    // ─────────────────────────────────────────────────────────────

    /// `deckgen generate` — the full routed flow: Landing → Auth →
    /// PersonaSelection → Workspace, driven to a downloaded deck or a
    /// reported failure.
    pub async fn generate(&mut self, options: GenerateOptions) -> Result<()> {
        self.session.bootstrap().await;

        if options.change_persona {
            // Re-opening the selector tears down the workspace view
            self.jobs.reset();
            self.flags.persona_selector_forced = true;
        }

        loop {
            let session = self.session.current();
            let view = route(session.as_ref(), &self.jobs.state(), &self.flags);
            debug!(view = ?view, "Routed");

            match view {
                View::Landing => {
                    println!("You need a DeckGen account to generate decks.");
                    let answer = prompt("Sign in now? [Y/n]")?;
                    if answer.eq_ignore_ascii_case("n") {
                        return Ok(());
                    }
                    self.flags.login_requested = true;
                }

                View::Auth => {
                    let email = prompt("Email")?;
                    if email.is_empty() {
                        return Err(Error::NotSignedIn);
                    }
                    let password = prompt("Password")?;
                    match self.session.login(&email, &password).await {
                        Ok(user) => {
                            println!("Signed in as {}", user.display_name());
                            self.flags.login_requested = false;
                        }
                        Err(e) if e.is_auth() => {
                            // Inline, recoverable: stay on the auth screen
                            println!("{}", e);
                        }
                        Err(e) => return Err(e),
                    }
                }

                View::PersonaSelection => {
                    self.select_persona_interactively().await?;
                    self.flags.persona_selector_forced = false;
                }

                View::Workspace { pane: WorkspacePane::Wizard, banner } => {
                    if let Some(banner) = banner {
                        println!("!! {}", banner);
                        return Err(Error::GenerationFailed { message: banner });
                    }
                    self.show_tour_once();
                    self.run_wizard(&options).await?;
                }

                View::Workspace { pane: WorkspacePane::Progress, banner } => {
                    if let Some(banner) = banner {
                        println!("!! {}", banner);
                        return Err(Error::GenerationFailed { message: banner });
                    }
                    return self.watch_progress(&options).await;
                }
            }
        }
    }

    /// Collect wizard fields and submit. Missing fields fall back to the
    /// service defaults rather than blocking on prompts.
    async fn run_wizard(&mut self, options: &GenerateOptions) -> Result<()> {
        let artifact = match &options.file {
            Some(path) => Some(read_artifact(path)?),
            None => None,
        };

        let spec = DeckSpec {
            org_name: options.org.clone().unwrap_or_default(),
            purpose: options.purpose.clone().unwrap_or_default(),
            target_audience: options
                .audience
                .clone()
                .unwrap_or_else(|| "General Audience".to_string()),
            key_message: options
                .message
                .clone()
                .unwrap_or_else(|| "General overview".to_string()),
            design_vibe: options.vibe.clone().unwrap_or_default(),
        };

        let job_id = self.jobs.submit(artifact, spec).await?;
        println!("Submitted. Job id: {}", job_id);
        Ok(())
    }

    /// Render job events until the job terminates or the user cancels
    async fn watch_progress(&mut self, options: &GenerateOptions) -> Result<()> {
        // The job may already have terminated before we got here
        match self.jobs.state().status {
            JobStatus::Succeeded => return self.finish_job(options).await,
            JobStatus::Failed => {
                let message = self.jobs.state().error.unwrap_or_default();
                return Err(Error::GenerationFailed { message });
            }
            _ => {}
        }

        println!("Generating... (Ctrl-C to cancel)");
        loop {
            // Resolve the race first, act after: the event receiver stays
            // borrowed only for the duration of the select expression
            let step = tokio::select! {
                event = self.job_events.recv() => ProgressStep::Event(event),
                _ = tokio::signal::ctrl_c() => ProgressStep::Cancelled,
            };

            match step {
                ProgressStep::Cancelled => {
                    self.jobs.reset();
                    println!();
                    println!("Cancelled. The job was discarded.");
                    return Ok(());
                }
                ProgressStep::Event(Some(JobEvent::Submitted { .. })) => {}
                ProgressStep::Event(Some(JobEvent::Progress { step })) => {
                    println!("  -> {}", step);
                }
                ProgressStep::Event(Some(JobEvent::Completed)) => {
                    println!("  -> Completed");
                    return self.finish_job(options).await;
                }
                ProgressStep::Event(Some(JobEvent::Failed { message })) => {
                    println!("!! {}", message);
                    return Err(Error::GenerationFailed { message });
                }
                ProgressStep::Event(None) => {
                    return Err(Error::Internal("Job event channel closed".to_string()));
                }
            }
        }
    }

    /// Download the finished deck for the completed job
    async fn finish_job(&mut self, options: &GenerateOptions) -> Result<()> {
        let job_id = self
            .jobs
            .state()
            .job_id
            .ok_or_else(|| Error::Internal("Completed job has no id".to_string()))?;

        let path = self.save_deck(&job_id, options.output.clone()).await?;
        println!("Deck saved to {}", path.display());
        Ok(())
    }

    /// Fetch the deck bytes and write them to disk
    async fn save_deck(&self, job_id: &str, output: Option<PathBuf>) -> Result<PathBuf> {
        let bytes = self.service.download_deck(job_id).await?;

        let path = output.unwrap_or_else(|| {
            self.config.download_dir().join("DeckGen_Executive_Deck.pptx")
        });
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }
        std::fs::write(&path, &bytes).map_err(|e| Error::IoWrite {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), bytes = bytes.len(), "Deck downloaded");
        Ok(path)
    }

    /// Print the first-run workspace hints once per installation
    fn show_tour_once(&self) {
        if self.session.tour_seen() {
            return;
        }
        println!("Welcome to DeckGen. A quick orientation:");
        println!("  1. Your persona tailors every generated deck to your role.");
        println!("  2. Feed it a .zip of code or raw markdown docs; it handles the rest.");
        println!("  3. Watch the pipeline extract business value and build your narrative.");
        println!("  4. When it finishes, the executive-ready deck lands on your disk.");
        println!();
        self.session.mark_tour_seen();
    }

    // ─────────────────────────────────────────────────────────────
    // Persona Picker
    // ─────────────────────────────────────────────────────────────

    /// Interactive front-end over the persona directory: search, page
    /// navigation, page-size switching, selection by number or id.
    async fn select_persona_interactively(&mut self) -> Result<()> {
        let mut view = DirectoryView::new();

        println!("Choose the perspective the generated decks should adopt.");
        println!("Commands: /<text> search, n next page, p previous page,");
        println!("          size <9|50|all>, a number or persona id to select, q to abort.");

        loop {
            render_directory(&view);
            let input = prompt("persona")?;

            match input.as_str() {
                "" => continue,
                "q" | "quit" => return Err(Error::persona_rejected("No persona selected")),
                "n" | "next" => view.next_page(),
                "p" | "prev" => view.prev_page(),
                _ if input.starts_with('/') => view.set_query(input.trim_start_matches('/')),
                _ if input.starts_with("size ") => {
                    match input.trim_start_matches("size ").trim().parse::<PageSize>() {
                        Ok(size) => view.set_page_size(size),
                        Err(e) => println!("{}", e),
                    }
                }
                _ => {
                    let chosen = if let Ok(index) = input.parse::<usize>() {
                        view.visible().get(index.saturating_sub(1)).copied()
                    } else {
                        persona::find(&input)
                    };

                    let entry = match chosen {
                        Some(entry) => entry,
                        None => {
                            println!("No persona matches '{}'.", input);
                            continue;
                        }
                    };

                    match self.session.set_persona(entry.id).await {
                        Ok(()) => {
                            println!("Persona set to {} ({})", entry.title, entry.id);
                            return Ok(());
                        }
                        Err(e) => {
                            // Stay on the selection step; the error is inline
                            println!("{}", e);
                        }
                    }
                }
            }
        }
    }
}

/// Print the current directory page
fn render_directory(view: &DirectoryView) {
    println!();
    let visible = view.visible();
    if visible.is_empty() {
        println!("  No personas match '{}'.", view.query());
        return;
    }

    for (index, entry) in visible.iter().enumerate() {
        println!("  {:>3}. {:<28} {} [{}]", index + 1, entry.title, entry.description, entry.id);
    }

    if view.pagination_visible() {
        println!();
        println!(
            "  Page {} of {} (n/p to navigate, size <9|50|all>)",
            view.page(),
            view.total_pages()
        );
    }
}

/// Read the source document for submission
fn read_artifact(path: &Path) -> Result<SourceArtifact> {
    let bytes = std::fs::read(path).map_err(|e| Error::IoRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document.md")
        .to_string();
    Ok(SourceArtifact { file_name, bytes })
}

/// Prompt on stdout and read one trimmed line from stdin. End of input
/// aborts the interactive flow instead of spinning on empty reads.
fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    std::io::stdout().flush()?;

    let mut line = String::new();
    let read = std::io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "end of input",
        )));
    }
    Ok(line.trim().to_string())
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
