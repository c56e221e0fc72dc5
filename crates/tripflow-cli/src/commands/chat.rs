//! Interactive chat REPL

use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use futures::StreamExt;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tripflow_cli::relay::RelayClient;
use tripflow_cli::session::{APOLOGY, ChatSession, GREETING};

pub async fn run(server: &str) -> Result<()> {
    let relay = RelayClient::new(server);
    let mut session = ChatSession::new();

    let mut rl = DefaultEditor::new()?;
    let history_path = dirs::data_dir().map(|p| p.join("tripflow").join("history.txt"));
    if let Some(path) = &history_path {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = rl.load_history(path);
    }

    print_welcome(server);
    print_assistant(GREETING);

    loop {
        match rl.readline(&"you> ".bold().to_string()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line.starts_with('/') {
                    if handle_command(line) {
                        break;
                    }
                    continue;
                }

                let _ = rl.add_history_entry(line);
                exchange(&mut session, &relay, line).await;
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Bye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {err:?}");
                break;
            }
        }
    }

    if let Some(path) = &history_path {
        let _ = rl.save_history(path);
    }

    Ok(())
}

/// One full turn: submit, stream the reply, print fragments as they land.
async fn exchange(session: &mut ChatSession, relay: &RelayClient, input: &str) {
    let Some(payload) = session.submit(input) else {
        return;
    };

    print!("{} ", "assistant>".cyan().bold());
    let _ = std::io::stdout().flush();

    let mut fragments = match relay.send(&payload).await {
        Ok(fragments) => fragments,
        Err(e) => {
            tracing::warn!(error = %e, "relay call failed");
            session.fail_stream();
            println!("{APOLOGY}");
            println!();
            return;
        }
    };

    session.begin_stream();
    while let Some(item) = fragments.next().await {
        match item {
            Ok(text) => {
                print!("{text}");
                let _ = std::io::stdout().flush();
                session.push_fragment(&text);
            }
            Err(e) => {
                tracing::warn!(error = %e, "reply stream failed");
                session.fail_stream();
                println!();
                println!("{} {APOLOGY}", "assistant>".cyan().bold());
                println!();
                return;
            }
        }
    }

    session.finish_stream();
    println!();
    println!();
}

fn print_welcome(server: &str) {
    println!();
    println!("╭─────────────────────────────────────────────╮");
    println!("│          TripFlow - Travel Assistant        │");
    println!("╰─────────────────────────────────────────────╯");
    println!();
    println!("Relay: {server}");
    println!();
    println!("Commands:");
    println!("  /help   - Show this help");
    println!("  /quit   - Exit chat");
    println!();
}

fn print_assistant(text: &str) {
    println!("{} {text}", "assistant>".cyan().bold());
    println!();
}

/// Handle slash commands. Returns true if the REPL should exit.
fn handle_command(cmd: &str) -> bool {
    match cmd {
        "/quit" | "/exit" | "/q" => {
            println!("Bye!");
            true
        }
        "/help" | "/h" | "/?" => {
            println!();
            println!("Commands:");
            println!("  /help, /h, /?    - Show this help");
            println!("  /quit, /exit, /q - Exit chat");
            println!();
            false
        }
        _ => {
            println!("Unknown command: {cmd}");
            println!("Type /help for available commands");
            false
        }
    }
}
