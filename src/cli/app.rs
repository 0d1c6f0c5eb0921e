//! Main app runner for interactive forwarding

use std::collections::VecDeque;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::application::ports::{
    ConfigStore, Connector, NotificationIcon, Notifier, PreferenceStore,
};
use crate::application::{ForwarderConfig, LineForwarder};
use crate::domain::config::AppConfig;
use crate::domain::connection::{ConnectionState, StateChange};
use crate::domain::endpoint::{parse_endpoint, Endpoint};
use crate::infrastructure::{create_notifier, MemoryPreferenceStore, TcpConnector, XdgConfigStore};

use super::args::ForwardOptions;
use super::input::{parse_input, spawn_stdin_reader, InputCommand, INPUT_HELP};
use super::observer::{ChannelObserver, ForwardEvent};
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Work handed to the forwarding task, processed strictly in order
#[derive(Debug)]
enum ForwardCommand {
    Connect(Endpoint),
    Send(String),
    Disconnect,
    History,
}

/// What the loop knows about the connection, built from forwarder events
#[derive(Debug, Default)]
struct SessionView {
    state: ConnectionState,
    destination: Option<Endpoint>,
    pending: VecDeque<Endpoint>,
    had_error: bool,
}

enum Flow {
    Continue,
    Quit,
}

/// Run the forwarding session until stdin closes, `/quit` or a signal
pub async fn run_forward(options: ForwardOptions) -> ExitCode {
    if options.save_destination {
        run_with_preferences(options, XdgConfigStore::new()).await
    } else {
        run_with_preferences(options, MemoryPreferenceStore::new()).await
    }
}

async fn run_with_preferences<P: PreferenceStore>(
    options: ForwardOptions,
    preferences: P,
) -> ExitCode {
    let mut presenter = Presenter::new();

    let mut shutdown = match ShutdownSignal::new() {
        Ok(signal) => signal,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let notifier: Option<Arc<dyn Notifier>> = if options.notify {
        Some(Arc::from(create_notifier()))
    } else {
        None
    };

    let (observer, mut events) = ChannelObserver::new();
    let forwarder = LineForwarder::new(
        TcpConnector::with_timeout(options.connect_timeout),
        preferences,
        Arc::new(observer),
        ForwarderConfig {
            history_size: options.history_size,
        },
    );

    let (commands, command_rx) = mpsc::unbounded_channel();
    let (history_tx, mut history_rx) = mpsc::unbounded_channel();
    let mut worker = tokio::spawn(run_worker(forwarder, command_rx, history_tx));

    let mut view = SessionView::default();

    match options.destination {
        Some(endpoint) => {
            view.pending.push_back(endpoint.clone());
            let _ = commands.send(ForwardCommand::Connect(endpoint));
        }
        None => presenter.info("No destination set. Type /connect HOST:PORT to choose one."),
    }

    let mut lines = match spawn_stdin_reader() {
        Ok(lines) => lines,
        Err(e) => {
            presenter.error(&format!("Failed to read input: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let mut interrupted = false;

    loop {
        tokio::select! {
            line = lines.recv() => match line {
                Some(Ok(line)) => {
                    if let Flow::Quit = handle_input(&line, &commands, &mut view, &presenter) {
                        break;
                    }
                }
                None => {
                    debug!("Input closed");
                    break;
                }
                Some(Err(e)) => {
                    presenter.error(&format!("Failed to read input: {}", e));
                    view.had_error = true;
                    break;
                }
            },
            Some(event) = events.recv() => {
                render_event(event, &mut view, &mut presenter, notifier.as_ref());
            }
            Some(history) = history_rx.recv() => presenter.history(&history),
            Some(_) = shutdown.recv() => {
                interrupted = true;
                break;
            }
        }
    }

    let _ = commands.send(ForwardCommand::Disconnect);
    drop(commands);

    let mut abort = interrupted;
    if !abort {
        // Pending lines are still delivered; a signal cuts that short
        tokio::select! {
            _ = &mut worker => {}
            Some(_) = shutdown.recv() => abort = true,
        }
    }
    if abort {
        worker.abort();
        let _ = worker.await;
    }

    while let Some(event) = events.recv().await {
        render_event(event, &mut view, &mut presenter, notifier.as_ref());
    }
    while let Ok(history) = history_rx.try_recv() {
        presenter.history(&history);
    }
    presenter.stop_spinner();

    if view.had_error {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

async fn run_worker<C, P>(
    forwarder: LineForwarder<C, P>,
    mut commands: mpsc::UnboundedReceiver<ForwardCommand>,
    history: mpsc::UnboundedSender<Vec<String>>,
) where
    C: Connector,
    P: PreferenceStore,
{
    // Failures reach the loop through the observer
    while let Some(command) = commands.recv().await {
        match command {
            ForwardCommand::Connect(endpoint) => {
                let _ = forwarder.connect(endpoint).await;
            }
            ForwardCommand::Send(line) => {
                let _ = forwarder.send(&line).await;
            }
            ForwardCommand::Disconnect => forwarder.disconnect().await,
            ForwardCommand::History => {
                let _ = history.send(forwarder.history().await);
            }
        }
    }
}

fn handle_input(
    line: &str,
    commands: &mpsc::UnboundedSender<ForwardCommand>,
    view: &mut SessionView,
    presenter: &Presenter,
) -> Flow {
    let command = match parse_input(line) {
        InputCommand::Forward(text) => ForwardCommand::Send(text),
        InputCommand::Connect(raw) => {
            if raw.is_empty() {
                presenter.error("Usage: /connect HOST:PORT");
                return Flow::Continue;
            }
            match parse_endpoint(&raw) {
                Ok(endpoint) => {
                    view.pending.push_back(endpoint.clone());
                    ForwardCommand::Connect(endpoint)
                }
                Err(e) => {
                    presenter.error(&e.to_string());
                    view.had_error = true;
                    return Flow::Continue;
                }
            }
        }
        InputCommand::Disconnect => ForwardCommand::Disconnect,
        InputCommand::History => ForwardCommand::History,
        InputCommand::Status => {
            let destination = view.destination.as_ref().map(|e| e.to_string());
            presenter.connection_status(view.state, destination.as_deref());
            return Flow::Continue;
        }
        InputCommand::Help => {
            presenter.info(INPUT_HELP);
            return Flow::Continue;
        }
        InputCommand::Unknown(name) => {
            presenter.warn(&format!("Unknown command /{}. {}", name, INPUT_HELP));
            return Flow::Continue;
        }
        InputCommand::Empty => return Flow::Continue,
        InputCommand::Quit => return Flow::Quit,
    };

    if commands.send(command).is_err() {
        presenter.error("Forwarding task stopped unexpectedly");
        view.had_error = true;
        return Flow::Quit;
    }
    Flow::Continue
}

fn render_event(
    event: ForwardEvent,
    view: &mut SessionView,
    presenter: &mut Presenter,
    notifier: Option<&Arc<dyn Notifier>>,
) {
    match event {
        ForwardEvent::State(change) => render_state(change, view, presenter, notifier),
        ForwardEvent::Error(e) => {
            view.had_error = true;
            presenter.spinner_fail(&e.to_string());
            notify(notifier, "Error", e.to_string(), NotificationIcon::Error);
        }
        ForwardEvent::LineSent(line) => presenter.sent(&line),
    }
}

fn render_state(
    change: StateChange,
    view: &mut SessionView,
    presenter: &mut Presenter,
    notifier: Option<&Arc<dyn Notifier>>,
) {
    debug!(%change, "Connection state changed");
    view.state = change.to;

    match (change.from, change.to) {
        (_, ConnectionState::Connecting) => {
            view.destination = view.pending.pop_front();
            let target = view
                .destination
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_default();
            presenter.start_spinner(&format!("Connecting to {}...", target));
        }
        (_, ConnectionState::Connected) => {
            let target = view
                .destination
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_default();
            presenter.spinner_success(&format!("Connected to {}", target));
            notify(notifier, "Connected", target, NotificationIcon::Connected);
        }
        (ConnectionState::Connected, ConnectionState::Disconnected) => {
            let target = view
                .destination
                .take()
                .map(|e| e.to_string())
                .unwrap_or_default();
            presenter.info(&format!("Disconnected from {}", target));
            notify(notifier, "Disconnected", target, NotificationIcon::Disconnected);
        }
        (_, ConnectionState::Disconnected) => {
            view.destination = None;
            presenter.stop_spinner();
        }
    }
}

fn notify(
    notifier: Option<&Arc<dyn Notifier>>,
    title: &'static str,
    message: String,
    icon: NotificationIcon,
) {
    let Some(notifier) = notifier.cloned() else {
        return;
    };
    tokio::spawn(async move {
        if let Err(e) = notifier.notify(title, &message, icon).await {
            debug!(error = %e, "Notification failed");
        }
    });
}

/// Load and merge configuration from file and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            debug!(error = %e, "Ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}
