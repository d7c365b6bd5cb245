//! CLI entrypoint for pybo
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser};
use pybo_application::{
    AutoConfirm, ConfirmationPort, ListQuestionsInput, ListQuestionsUseCase, MutationOutcome,
    NoProgress, ProgressNotifier, QuestionApi, QuestionView, Routes, SessionContext, ViewError,
    VoteOutcome, WriteQuestionInput, WriteQuestionUseCase,
};
use pybo_domain::{QuestionId, User};
use pybo_infrastructure::{ConfigLoader, FileConfig, HttpRemoteResource, StoredSession};
use pybo_presentation::{
    Cli, Command, ConsoleFormatter, InteractiveConfirmation, OutputConfig, ProgressReporter,
    QuestionRepl,
};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_PREFIX: &str = "pybo.log";

type Api = QuestionApi<HttpRemoteResource>;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    info!("Starting pybo");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    for issue in config.validate() {
        warn!("{}", issue.message);
    }

    let output = OutputConfig {
        color: config.output.color,
        ..Default::default()
    }
    .with_json(cli.json);
    output.apply();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let session = open_session(&config)?;

    // Session-only commands never touch the network
    match command {
        Command::Login {
            token,
            email,
            username,
        } => return login(&session, token, email, username),
        Command::Logout => return logout(&session),
        _ => {}
    }

    // === Dependency Injection ===
    let (style, _) = config.api.parse_routes();
    let remote = HttpRemoteResource::new(config.api.base_url.clone(), config.api.timeout())
        .context("Failed to build HTTP client")?;
    debug!("Using {} routes at {}", style, remote.base_url());
    let api = Arc::new(
        QuestionApi::new(Arc::new(remote), Routes::new(style))
            .with_csrf_token(config.api.csrf_token().map(str::to_string)),
    );

    let session: Arc<dyn SessionContext> = Arc::new(session);
    let confirmation: Arc<dyn ConfirmationPort> = if cli.yes {
        Arc::new(AutoConfirm)
    } else {
        Arc::new(InteractiveConfirmation::new())
    };
    let progress: Arc<dyn ProgressNotifier> = if output.show_progress {
        Arc::new(ProgressReporter::new())
    } else {
        Arc::new(NoProgress)
    };

    let app = App {
        api,
        session,
        confirmation,
        progress,
        output,
    };
    app.run(command).await
}

/// Initialize logging based on verbosity level, optionally tee-ing to a daily file
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn open_session(config: &FileConfig) -> Result<StoredSession> {
    let path = config
        .session
        .resolved_path()
        .or_else(StoredSession::default_path)
        .context("No data directory for session.json; set [session] path in the config")?;
    let session = StoredSession::open(path)?
        .with_token_override(config.session.token().map(str::to_string));
    Ok(session)
}

fn login(
    session: &StoredSession,
    token: String,
    email: String,
    username: Option<String>,
) -> Result<ExitCode> {
    let username = username.unwrap_or_else(|| {
        email
            .split_once('@')
            .map(|(name, _)| name.to_string())
            .unwrap_or_else(|| email.clone())
    });
    let user = User::new(username, email);
    session.save(token, user.clone())?;
    println!("Signed in as {} ({})", user.username, user.email);
    println!("Session stored at {}", session.path().display());
    Ok(ExitCode::SUCCESS)
}

fn logout(session: &StoredSession) -> Result<ExitCode> {
    if session.clear()? {
        println!("Signed out");
    } else {
        println!("Not signed in");
    }
    Ok(ExitCode::SUCCESS)
}

/// Wired dependencies shared by every board command
struct App {
    api: Arc<Api>,
    session: Arc<dyn SessionContext>,
    confirmation: Arc<dyn ConfirmationPort>,
    progress: Arc<dyn ProgressNotifier>,
    output: OutputConfig,
}

impl App {
    async fn run(&self, command: Command) -> Result<ExitCode> {
        match command {
            Command::List { page, keyword } => self.list(page, keyword).await,
            Command::Show { id } => {
                let Some(view) = self.open(id).await else {
                    return Ok(ExitCode::FAILURE);
                };
                self.print_state(&view);
                Ok(ExitCode::SUCCESS)
            }
            Command::View { id } => {
                let Some(view) = self.open(id).await else {
                    return Ok(ExitCode::FAILURE);
                };
                QuestionRepl::new(view, Arc::clone(&self.session))
                    .run()
                    .await?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Vote { id } => {
                let Some(view) = self.open(id).await else {
                    return Ok(ExitCode::FAILURE);
                };
                let outcome = view.vote_question().await?;
                Ok(self.report_vote(&view, &outcome))
            }
            Command::VoteAnswer { id, answer } => {
                let Some(view) = self.open(id).await else {
                    return Ok(ExitCode::FAILURE);
                };
                let outcome = view.vote_answer(answer).await?;
                Ok(self.report_vote(&view, &outcome))
            }
            Command::Answer { id, content } => {
                let Some(view) = self.open(id).await else {
                    return Ok(ExitCode::FAILURE);
                };
                let outcome = view.submit_answer(content.join(" ")).await?;
                Ok(self.report_mutation(&view, "Answer posted", &outcome))
            }
            Command::Create { subject, content } => self.create(subject, content.join(" ")).await,
            Command::Modify {
                id,
                subject,
                content,
            } => {
                if subject.is_none() && content.is_none() {
                    eprintln!("Nothing to change: pass --subject and/or --content");
                    return Ok(ExitCode::FAILURE);
                }
                let Some(view) = self.open(id).await else {
                    return Ok(ExitCode::FAILURE);
                };
                let Some(current) = view.state().ready() else {
                    return Ok(ExitCode::FAILURE);
                };
                let subject = subject.unwrap_or(current.question.subject);
                let content = content.unwrap_or(current.question.content);
                let outcome = view.modify_question(subject, content).await?;
                Ok(self.report_mutation(&view, "Question saved", &outcome))
            }
            Command::ModifyAnswer {
                id,
                answer,
                content,
            } => {
                let Some(view) = self.open(id).await else {
                    return Ok(ExitCode::FAILURE);
                };
                let outcome = view.modify_answer(answer, content.join(" ")).await?;
                Ok(self.report_mutation(&view, "Answer saved", &outcome))
            }
            Command::DeleteAnswer { id, answer } => {
                let Some(view) = self.open(id).await else {
                    return Ok(ExitCode::FAILURE);
                };
                let outcome = view.delete_answer(answer).await?;
                Ok(self.report_mutation(&view, "Answer deleted", &outcome))
            }
            Command::DeleteQuestion { id } => {
                let Some(view) = self.open(id).await else {
                    return Ok(ExitCode::FAILURE);
                };
                let outcome = view.delete_question().await?;
                Ok(self.report_mutation(&view, "Question deleted", &outcome))
            }
            Command::Login { .. } | Command::Logout => Ok(ExitCode::SUCCESS),
        }
    }

    async fn list(&self, page: u32, keyword: Option<String>) -> Result<ExitCode> {
        let mut input = ListQuestionsInput::new(page);
        if let Some(keyword) = keyword {
            input = input.with_keyword(keyword);
        }

        let use_case = ListQuestionsUseCase::new(Arc::clone(&self.api));
        match use_case
            .execute_with_progress(input, self.progress.as_ref())
            .await
        {
            Ok(page) => {
                if self.output.json {
                    println!("{}", ConsoleFormatter::format_json(&page));
                } else {
                    print!("{}", ConsoleFormatter::format_page(&page));
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("Failed to load");
                eprint!("{}", ConsoleFormatter::format_errors(&e.into_error_map()));
                Ok(ExitCode::FAILURE)
            }
        }
    }

    async fn create(&self, subject: String, content: String) -> Result<ExitCode> {
        let use_case = WriteQuestionUseCase::new(Arc::clone(&self.api), Arc::clone(&self.session));
        match use_case
            .execute_with_progress(
                WriteQuestionInput::new(subject, content),
                self.progress.as_ref(),
            )
            .await
        {
            Ok(question) => {
                if self.output.json {
                    println!("{}", ConsoleFormatter::format_json(&question));
                } else {
                    println!(
                        "{}",
                        ConsoleFormatter::format_mutation_outcome(
                            "Question posted",
                            &MutationOutcome::Applied
                        )
                    );
                    println!("Open it with: pybo view {}", question.id);
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                let outcome = MutationOutcome::Rejected(e.into_error_map());
                eprintln!(
                    "{}",
                    ConsoleFormatter::format_mutation_outcome("Question posted", &outcome)
                );
                Ok(ExitCode::FAILURE)
            }
        }
    }

    /// Fetch the question; `None` after reporting a load failure
    async fn open(&self, id: QuestionId) -> Option<QuestionView<HttpRemoteResource>> {
        let view = QuestionView::new(
            Arc::clone(&self.api),
            id,
            Arc::clone(&self.session),
            Arc::clone(&self.confirmation),
        )
        .with_progress(Arc::clone(&self.progress));

        match view.load().await {
            Ok(_) => Some(view),
            Err(ViewError::LoadFailed(e)) => {
                eprintln!("Failed to load");
                eprint!("{}", ConsoleFormatter::format_errors(&e.into_error_map()));
                None
            }
            Err(e) => {
                eprintln!("Failed to load: {}", e);
                None
            }
        }
    }

    fn print_state(&self, view: &QuestionView<HttpRemoteResource>) {
        let Some(state) = view.state().ready() else {
            return;
        };
        if self.output.json {
            println!("{}", ConsoleFormatter::format_json(&state));
        } else {
            let viewer = self.session.user();
            print!(
                "{}",
                ConsoleFormatter::format_question(&state, viewer.as_ref())
            );
        }
    }

    fn report_vote(
        &self,
        view: &QuestionView<HttpRemoteResource>,
        outcome: &VoteOutcome,
    ) -> ExitCode {
        if !self.output.json {
            println!("{}", ConsoleFormatter::format_vote_outcome(outcome));
        }
        match outcome {
            VoteOutcome::Recorded { .. } => {
                self.print_state(view);
                ExitCode::SUCCESS
            }
            VoteOutcome::AlreadyVoted => ExitCode::SUCCESS,
            VoteOutcome::Rejected(_) => {
                self.print_state(view);
                ExitCode::FAILURE
            }
        }
    }

    fn report_mutation(
        &self,
        view: &QuestionView<HttpRemoteResource>,
        action: &str,
        outcome: &MutationOutcome,
    ) -> ExitCode {
        if !self.output.json {
            println!(
                "{}",
                ConsoleFormatter::format_mutation_outcome(action, outcome)
            );
        }
        match outcome {
            MutationOutcome::Applied => {
                self.print_state(view);
                ExitCode::SUCCESS
            }
            MutationOutcome::Declined => ExitCode::SUCCESS,
            MutationOutcome::Rejected(_) => {
                self.print_state(view);
                ExitCode::FAILURE
            }
        }
    }
}
