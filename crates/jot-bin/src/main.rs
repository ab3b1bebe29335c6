//! Jot entrypoint: a line-oriented front-end over the session/search core.
//!
//! The UI surface here is deliberately thin; tabs, documents, search and
//! autosave all live in the core crates, and this binary only supplies the
//! collaborator seams (prompts and notifications over stdio) plus the
//! single-threaded command loop that drives the autosave timer.

use anyhow::Result;
use clap::Parser;
use core_config::Config;
use core_search::SearchController;
use core_session::{ExitChoice, Notifier, Prompter, SaveOutcome, SessionManager};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "jot", version, about = "Tabbed text editor")]
struct Args {
    /// Files to open at startup, one tab each (UTF-8 text).
    pub paths: Vec<PathBuf>,
    /// Configuration file path (overrides discovery of `jot.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

/// Prompter/notifier over stdio. An empty or EOF'd reply counts as dialog
/// dismissal.
struct StdioUi {
    stdin: io::Stdin,
}

impl StdioUi {
    fn new() -> Self {
        Self { stdin: io::stdin() }
    }

    fn ask(&mut self, label: &str) -> Option<String> {
        print!("{label}: ");
        io::stdout().flush().ok()?;
        let mut line = String::new();
        let n = self.stdin.lock().read_line(&mut line).ok()?;
        if n == 0 {
            return None;
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).to_string();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    }
}

impl Prompter for StdioUi {
    fn prompt_open_path(&mut self) -> Option<PathBuf> {
        self.ask("Open file").map(PathBuf::from)
    }

    fn prompt_save_path(&mut self) -> Option<PathBuf> {
        self.ask("Save as").map(PathBuf::from)
    }

    fn prompt_text(&mut self, label: &str) -> Option<String> {
        self.ask(label)
    }

    fn confirm_exit(&mut self) -> ExitChoice {
        match self.ask("Unsaved changes. [s]ave / [d]iscard / [c]ancel") {
            Some(ref s) if s.eq_ignore_ascii_case("s") => ExitChoice::Save,
            Some(ref s) if s.eq_ignore_ascii_case("d") => ExitChoice::Discard,
            _ => ExitChoice::Cancel,
        }
    }
}

impl Notifier for StdioUi {
    fn notify(&mut self, message: &str) {
        println!("{message}");
    }

    fn notify_error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}

fn configure_logging() -> Option<WorkerGuard> {
    let appender = tracing_appender::rolling::never(".", "jot.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    match result {
        Ok(()) => Some(guard),
        Err(_) => None, // already initialized (tests); keep going without the guard
    }
}

struct App {
    sessions: SessionManager,
    search: SearchController,
    config: Config,
    ui: StdioUi,
    last_autosave: Instant,
}

impl App {
    fn new(args: &Args) -> Result<Self> {
        let config = core_config::load_from(args.config.clone())?;
        let mut sessions = SessionManager::new();
        let mut ui = StdioUi::new();
        for path in &args.paths {
            if let Err(e) = sessions.open_file(path, config.highlight_extensions()) {
                ui.notify_error(&e.to_string());
            }
        }
        // Always start with at least one tab.
        if sessions.is_empty() {
            sessions.new_tab();
        }
        info!(target: "runtime", tabs = sessions.len(), "startup");
        Ok(Self {
            sessions,
            search: SearchController::new(),
            config,
            ui,
            last_autosave: Instant::now(),
        })
    }

    /// Read commands until the user quits (or stdin closes). The autosave
    /// deadline is checked after every command; the sweep runs inline on this
    /// thread, so no user action is processed while it writes.
    fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        println!("jot — type 'help' for commands");
        loop {
            self.tabs_line();
            print!("> ");
            io::stdout().flush()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // stdin is gone; no prompt can be answered, so stop.
                break;
            }
            if !self.dispatch(line.trim()) {
                break;
            }
            self.autosave_tick();
        }
        info!(target: "runtime", "shutdown");
        Ok(())
    }

    /// Handle one command line. Returns false when the loop should stop.
    fn dispatch(&mut self, line: &str) -> bool {
        let (cmd, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };
        match cmd {
            "" => {}
            "help" => self.help(),
            "new" => {
                self.sessions.new_tab();
            }
            "open" => self.open(rest),
            "save" => self.save(),
            "find" => self.find(rest),
            "next" => self.search.find_next(&mut self.sessions, &mut StdoutNotifier),
            "replace" => self.replace(),
            "undo" => self.undo_redo(true),
            "redo" => self.undo_redo(false),
            "insert" => self.insert(rest),
            "show" => self.show(),
            "tab" => self.switch_tab(rest),
            "close" => self.close_tab(),
            "quit" | "exit" => {
                if self.sessions.confirm_shutdown(&mut self.ui, &mut StdoutNotifier) {
                    return false;
                }
            }
            other => {
                warn!(target: "runtime", command = other, "unknown_command");
                println!("unknown command '{other}' (try 'help')");
            }
        }
        true
    }

    fn help(&self) {
        println!(
            "commands: new | open [path] | save | find [term] | next | replace\n          \
             undo | redo | insert <text> | show | tab <n> | close | quit"
        );
    }

    fn open(&mut self, arg: &str) {
        let path = if arg.is_empty() {
            match self.ui.prompt_open_path() {
                Some(p) => p,
                None => return,
            }
        } else {
            PathBuf::from(arg)
        };
        if let Err(e) = self
            .sessions
            .open_file(&path, self.config.highlight_extensions())
        {
            self.ui.notify_error(&e.to_string());
        }
    }

    fn save(&mut self) {
        let Some(session) = self.sessions.active_session_mut() else {
            return;
        };
        match session.save(&mut self.ui) {
            Ok(SaveOutcome::Saved) => println!("saved {}", session.label()),
            Ok(SaveOutcome::Cancelled) => {}
            Err(e) => self.ui.notify_error(&e.to_string()),
        }
    }

    fn find(&mut self, arg: &str) {
        let term = if arg.is_empty() {
            match self.ui.prompt_text("Find") {
                Some(t) => t,
                None => return,
            }
        } else {
            arg.to_string()
        };
        self.search
            .find(&mut self.sessions, &term, &mut StdoutNotifier);
    }

    fn replace(&mut self) {
        let Some(find) = self.ui.prompt_text("Replace what") else {
            return;
        };
        // Empty replacement is valid (deletes every occurrence); only a
        // dismissed prompt aborts. `ask` folds empty input into None, so an
        // explicit marker distinguishes "delete" from "cancel".
        let replace = match self.ui.prompt_text("Replace with ('-' deletes)") {
            Some(r) if r == "-" => String::new(),
            Some(r) => r,
            None => return,
        };
        self.search.replace_all(&mut self.sessions, &find, &replace);
    }

    fn undo_redo(&mut self, undo: bool) {
        let Some(session) = self.sessions.active_session_mut() else {
            return;
        };
        let buffer = session.buffer_mut();
        let moved = if undo { buffer.undo() } else { buffer.redo() };
        if !moved {
            println!("nothing to {}", if undo { "undo" } else { "redo" });
        }
    }

    fn insert(&mut self, text: &str) {
        if let Some(session) = self.sessions.active_session_mut() {
            session.buffer_mut().insert(text);
        }
    }

    fn show(&self) {
        if let Some(session) = self.sessions.active_session() {
            println!("{}", session.buffer().text());
        }
    }

    fn switch_tab(&mut self, arg: &str) {
        match arg.parse::<usize>() {
            Ok(n) if self.sessions.set_active(n) => {}
            _ => println!("no tab '{arg}'"),
        }
    }

    fn close_tab(&mut self) {
        self.sessions.close_tab(self.sessions.active_index());
        if self.sessions.is_empty() {
            self.sessions.new_tab();
        }
    }

    fn tabs_line(&self) {
        let labels: Vec<String> = self
            .sessions
            .sessions()
            .iter()
            .enumerate()
            .map(|(i, s)| {
                if i == self.sessions.active_index() {
                    format!("[{i}:{}]", s.label())
                } else {
                    format!(" {i}:{} ", s.label())
                }
            })
            .collect();
        println!("{}", labels.join(" "));
    }

    fn autosave_tick(&mut self) {
        if self.last_autosave.elapsed() < self.config.autosave_interval() {
            return;
        }
        self.last_autosave = Instant::now();
        self.sessions.autosave_sweep(&mut StdoutNotifier);
    }
}

/// Notifier for paths where `self.ui` is already mutably borrowed alongside
/// `self.sessions`.
struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&mut self, message: &str) {
        println!("{message}");
    }

    fn notify_error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    let mut app = App::new(&args)?;
    app.run()
}
