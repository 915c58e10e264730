//! Interactive prompt
//!
//! Line-oriented front end over a `ConversationSession`. Lines come from a
//! rustyline editor, commands are applied to the session, and the active
//! payload is printed after every command.

mod command;
pub mod render;

pub use command::{parse_command, Command, CommandError, MealChoice};

use crate::backend::{Meal, MealBackend};
use crate::session::{ConversationSession, SessionEvent};
use crossterm::style::Stylize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::sync::{broadcast, mpsc};

/// Run the prompt until `quit` or end of input
pub async fn run<B: MealBackend>(mut session: ConversationSession<B>) -> rustyline::Result<()> {
    print!("{}", render::banner());
    print!("{}", render::help());
    println!();

    let mut editor = LineEditor::spawn();
    let mut events = session.subscribe();

    loop {
        let line = match editor.read_line().await {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C - just show new prompt
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(err) => return Err(err),
        };

        let command = match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                println!("{}", e.to_string().red());
                continue;
            }
        };

        execute(&mut session, command, &mut events, |line| println!("{line}")).await;
    }

    tracing::info!(session_id = %session.context().session_id, "Session ended");
    Ok(())
}

/// Apply one command and return what to print
pub async fn dispatch<B: MealBackend>(
    session: &mut ConversationSession<B>,
    command: Command,
) -> Option<String> {
    let result = match command {
        Command::Add(items) => {
            let skipped: Vec<String> = items
                .into_iter()
                .filter(|item| !session.add_ingredient(item))
                .collect();
            if !skipped.is_empty() {
                println!("{}", format!("Already listed: {}", skipped.join(", ")).dim());
            }
            return Some(render::ingredients(session.ingredients()));
        }
        Command::Remove(name) => {
            if !session.remove_ingredient(&name) {
                println!("{}", format!("{name:?} is not in your list").dim());
            }
            return Some(render::ingredients(session.ingredients()));
        }
        Command::List => return Some(render::ingredients(session.ingredients())),
        Command::Show => Ok(()),
        Command::Help => return Some(render::help()),
        Command::Quit => return None,
        Command::Suggest => session.request_suggestions().await,
        Command::Pick(choice) => {
            let meal_name = match session.state().meals() {
                Some(meals) => match resolve_meal(meals, &choice) {
                    Some(name) => name,
                    None => {
                        return Some(
                            format!("No meal number {}", display_choice(&choice))
                                .red()
                                .to_string(),
                        )
                    }
                },
                // No list on screen: let the session report why
                None => display_choice(&choice),
            };
            session.select_meal(&meal_name).await
        }
        Command::Ask(question) => session.ask_follow_up(&question).await,
        Command::Prompt(prompt) => session.ask_prompt(prompt).await,
        Command::Reset => session.reset(),
    };

    Some(match result {
        Ok(()) => render::state(session.state(), session.ingredients()),
        Err(e) => e.to_string().red().to_string(),
    })
}

/// Map a user's choice onto a meal name. Names match case-insensitively;
/// an unmatched name is passed through so the session reports it.
pub fn resolve_meal(meals: &[Meal], choice: &MealChoice) -> Option<String> {
    match choice {
        MealChoice::Index(n) => n
            .checked_sub(1)
            .and_then(|i| meals.get(i))
            .map(|meal| meal.name.clone()),
        MealChoice::Name(name) => Some(
            meals
                .iter()
                .find(|meal| meal.name.eq_ignore_ascii_case(name.trim()))
                .map_or_else(|| name.clone(), |meal| meal.name.clone()),
        ),
    }
}

fn display_choice(choice: &MealChoice) -> String {
    match choice {
        MealChoice::Index(n) => n.to_string(),
        MealChoice::Name(name) => name.clone(),
    }
}

/// Readline editor driven from a blocking thread.
///
/// The thread only calls `readline` when asked, so the prompt never shows
/// up while a command is still printing.
struct LineEditor {
    requests: mpsc::Sender<()>,
    lines: mpsc::Receiver<rustyline::Result<String>>,
}

impl LineEditor {
    fn spawn() -> Self {
        let (requests, mut request_rx) = mpsc::channel::<()>(1);
        let (line_tx, lines) = mpsc::channel(1);

        tokio::task::spawn_blocking(move || {
            let mut editor = match DefaultEditor::new() {
                Ok(editor) => editor,
                Err(e) => {
                    let _ = line_tx.blocking_send(Err(e));
                    return;
                }
            };
            let prompt = format!("{} ", ">".dark_yellow());
            while request_rx.blocking_recv().is_some() {
                let result = editor.readline(&prompt);
                if let Ok(line) = &result {
                    let input = line.trim();
                    if !input.is_empty() {
                        let _ = editor.add_history_entry(input);
                    }
                }
                if line_tx.blocking_send(result).is_err() {
                    break;
                }
            }
        });

        Self { requests, lines }
    }

    async fn read_line(&mut self) -> rustyline::Result<String> {
        // A closed request channel means the editor thread is gone; whatever
        // it left behind is still delivered below.
        let _ = self.requests.send(()).await;
        self.lines.recv().await.unwrap_or(Err(ReadlineError::Eof))
    }
}

/// Apply one command, emitting progress lines while it runs, then its
/// output, then any notices it left behind
async fn execute<B: MealBackend>(
    session: &mut ConversationSession<B>,
    command: Command,
    events: &mut broadcast::Receiver<SessionEvent>,
    mut emit: impl FnMut(String),
) {
    let output = {
        let work = dispatch(session, command);
        tokio::pin!(work);
        loop {
            tokio::select! {
                biased;
                output = &mut work => break output,
                Ok(event) = events.recv() => {
                    if let Some(line) = event_line(&event) {
                        emit(line);
                    }
                }
            }
        }
    };
    if let Some(output) = output {
        emit(output);
    }
    loop {
        match events.try_recv() {
            Ok(SessionEvent::Notice { message }) => emit(message.yellow().to_string()),
            Ok(SessionEvent::PhaseChanged { .. }) | Err(broadcast::error::TryRecvError::Lagged(_)) => {}
            Err(_) => break,
        }
    }
}

fn event_line(event: &SessionEvent) -> Option<String> {
    match event {
        SessionEvent::PhaseChanged { phase } => {
            render::loading_message(*phase).map(|message| message.dim().to_string())
        }
        SessionEvent::Notice { message } => Some(message.as_str().yellow().to_string()),
    }
}
