use std::io::Write;
use std::path;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::domain::models::Action;
use crate::domain::models::AnalysisResult;
use crate::domain::models::Event;
use crate::domain::models::GatewayBox;
use crate::domain::models::GatewayError;
use crate::domain::models::ImageFile;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::Session;
use crate::domain::models::SlashCommand;
use crate::domain::services::actions::help_text;
use crate::domain::services::AppState;

fn speaker(role: Role) -> Paint<&'static str> {
    return match role {
        Role::Assistant => Paint::cyan("Assistant").bold(),
        Role::User => Paint::green("You").bold(),
    };
}

fn message_header(message: &Message) -> String {
    return format!(
        "{} {}:",
        Paint::new(message.timestamp().format("%H:%M:%S")).dimmed(),
        speaker(message.role())
    );
}

fn print_message(message: &Message) {
    println!("{} {}", message_header(message), message.content());
}

fn print_warning(text: &str) {
    println!("{}", Paint::yellow(text));
}

fn print_analysis(gateway: &GatewayBox, file_name: &str, analysis: &AnalysisResult) {
    println!("{}", Paint::new("ANALYSIS").underline().bold());
    println!("File: {file_name}");
    if !analysis.output_image_ref.is_empty() {
        println!(
            "Image: {}",
            gateway.resolve_image_url(&analysis.output_image_ref)
        );
    }
    if !analysis.summary.is_empty() {
        println!("Summary: {}", analysis.summary);
    }

    if !analysis.has_detections() {
        println!("No findings were detected.");
        return;
    }

    println!("Detections: {}", analysis.detection_count);
    for (class_name, count) in analysis.detection_classes.iter() {
        println!("  - {}: {count}", class_name.replace('_', " "));
    }
    for (idx, detection) in analysis.detection_details.iter().enumerate() {
        println!(
            "  {}. {} {:.1}% ({})",
            idx + 1,
            detection.display_name(),
            detection.confidence_percent(),
            detection.confidence_level()
        );
    }
}

fn print_panel_if_visible(app_state: &AppState, gateway: &GatewayBox) {
    if !app_state.upload.is_panel_visible() {
        return;
    }
    if let (Some(file_name), Some(analysis)) =
        (app_state.upload.uploaded_file(), app_state.upload.analysis())
    {
        print_analysis(gateway, file_name, analysis);
    }
}

fn flush() -> Result<()> {
    std::io::stdout().flush()?;
    return Ok(());
}

async fn upload(
    app_state: &mut AppState,
    tx: &mpsc::UnboundedSender<Action>,
    file_path: &str,
) -> Result<()> {
    if file_path.is_empty() {
        print_warning("Usage: /upload PATH");
        return Ok(());
    }

    let file = match ImageFile::from_path(path::Path::new(file_path)).await {
        Ok(file) => file,
        Err(err) => {
            tracing::warn!(error = ?err, path = file_path, "Unable to read upload");
            print_warning(&format!("Unable to read {file_path}: {err}"));
            return Ok(());
        }
    };

    let name = file.name.to_string();
    match app_state.select_file(file, tx) {
        Ok(()) => {
            if app_state.upload.is_uploading() {
                println!("{}", Paint::new(format!("Analyzing {name}...")).dimmed());
            } else if let Some(message) = app_state.conversation.last() {
                print_message(message);
            }
        }
        Err(GatewayError::InvalidInput(text)) => {
            print_warning(&text);
        }
        Err(err) => {
            print_warning(&err.to_string());
        }
    }

    return Ok(());
}

/// Returns false once the user asked to leave.
async fn handle_input(
    app_state: &mut AppState,
    gateway: &GatewayBox,
    tx: &mpsc::UnboundedSender<Action>,
    line: &str,
) -> Result<bool> {
    let text = line.trim();
    if text.is_empty() {
        return Ok(true);
    }

    if let Some(command) = SlashCommand::parse(text) {
        if command.is_quit() {
            return Ok(false);
        }
        if command.is_upload() {
            upload(app_state, tx, &command.arg_text()).await?;
        }
        if command.is_remove() {
            app_state.remove_file();
            println!("Removed the uploaded X-ray and its analysis.");
        }
        if command.is_analysis() {
            if app_state.upload.analysis().is_none() {
                print_warning("There is no analysis yet. Upload an X-ray with /upload PATH.");
            } else {
                app_state.upload.toggle_panel();
                print_panel_if_visible(app_state, gateway);
            }
        }
        if command.is_stop() {
            app_state.cancel_reply(tx)?;
        }
        if command.is_clear() {
            app_state.clear_session(tx)?;
            println!("Asked the assistant to forget the conversation so far.");
        }
        if command.is_help() {
            println!("{}", help_text());
        }

        return Ok(true);
    }

    if !app_state.can_send(text) {
        if let Some(reply_id) = app_state.conversation.pending_reply() {
            tracing::debug!(reply_id = %reply_id, "Input ignored while replying");
            print_warning("Please wait for the current reply to finish, or use /stop.");
        } else if app_state.upload.is_uploading() {
            print_warning("The X-ray is still being analyzed, please wait a moment.");
        } else {
            print_warning(&format!(
                "Please upload an OPG X-ray with /upload PATH before asking questions. (upload: {})",
                app_state.upload.state()
            ));
        }
        return Ok(true);
    }

    let reply_id = app_state.submit_message(text, tx)?;
    if let Some(reply) = app_state.conversation.get(reply_id) {
        print!("{} ", message_header(reply));
        flush()?;
    }

    return Ok(true);
}

fn handle_event(app_state: &mut AppState, gateway: &GatewayBox, event: Event) -> Result<()> {
    match event {
        Event::ReplyChunk(id, chunk) => {
            app_state.handle_event(Event::ReplyChunk(id, chunk.to_string()))?;
            print!("{chunk}");
            flush()?;
        }
        Event::ReplyDone(id) => {
            app_state.handle_event(Event::ReplyDone(id))?;
            println!();
        }
        Event::ReplyFailed(id, err) => {
            app_state.handle_event(Event::ReplyFailed(id, err))?;
            if let Some(reply) = app_state.conversation.get(id) {
                println!("{}", reply.content());
            }
        }
        Event::UploadFinished(ticket, outcome) => {
            let before = app_state.conversation.len();
            app_state.handle_event(Event::UploadFinished(ticket, outcome))?;
            if app_state.conversation.len() > before {
                if let Some(message) = app_state.conversation.last() {
                    print_message(message);
                }
                print_panel_if_visible(app_state, gateway);
            }
        }
    }

    return Ok(());
}

pub async fn start(
    session: Session,
    gateway: GatewayBox,
    tx: mpsc::UnboundedSender<Action>,
    mut rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut app_state = AppState::new(session);
    tracing::debug!(session_id = app_state.session.id.as_str(), "Chat started");

    for message in app_state.conversation.messages() {
        print_message(message);
    }
    println!("{}", Paint::new("Type /help for the list of commands.").dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => return Ok(()),
                };
                if !handle_input(&mut app_state, &gateway, &tx, &line).await? {
                    return Ok(());
                }
            }
            event = rx.recv() => {
                match event {
                    Some(event) => handle_event(&mut app_state, &gateway, event)?,
                    None => return Ok(()),
                }
            }
        }
    }
}
