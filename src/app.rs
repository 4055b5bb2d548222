use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::{
    cli::{Cli, Command},
    domain::{
        self,
        chat::GroupedChats,
        compose_state::SENT_MESSAGE,
        payload::{DispatchTarget, OutboundPayload},
    },
    infra::{self, attachment::load_attachment},
    telegram, ui,
    usecases::{
        self, bootstrap,
        dispatch_message::dispatch_message,
        group_updates::{fetch_grouped_chats, NO_RECENT_CHATS_MESSAGE},
    },
};

const CLI_FETCH_FAILED: &str = "CLI_FETCH_FAILED";
const CLI_SEND_FAILED: &str = "CLI_SEND_FAILED";

pub fn run(cli: Cli) -> Result<()> {
    let (context, _log_guard) = bootstrap::bootstrap(cli.config.as_deref())?;

    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        telegram = telegram::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    match cli.command_or_default() {
        Command::Run { token } => {
            let mut shell = bootstrap::compose_shell(&context, token.as_deref());
            ui::shell::start(
                &context,
                shell.event_source.as_mut(),
                shell.orchestrator.as_mut(),
            )?;
        }
        Command::Chats { token } => {
            let grouped = fetch_grouped_chats(&context.bot_api, &token).map_err(|error| {
                tracing::warn!(code = CLI_FETCH_FAILED, error = %error, "chats command failed");
                anyhow!(error)
            })?;
            print!("{}", format_grouped_chats(&grouped));
        }
        Command::Send {
            token,
            chat_id,
            topic_id,
            text,
            file,
        } => {
            let payload = build_payload(send_target(chat_id, topic_id), text, file)?;
            let mode = dispatch_message(&context.bot_api, &token, &payload).map_err(|error| {
                tracing::warn!(code = CLI_SEND_FAILED, error = %error, "send command failed");
                anyhow!(error)
            })?;
            println!("{SENT_MESSAGE} ({})", mode.as_label());
        }
    }

    Ok(())
}

/// Topic id 0 means "no topic", as it does when grouping updates.
fn send_target(chat_id: i64, topic_id: Option<i64>) -> DispatchTarget {
    DispatchTarget {
        chat_id,
        topic_id: topic_id.filter(|&id| id != 0),
    }
}

fn build_payload(
    target: DispatchTarget,
    text: Option<String>,
    file: Option<PathBuf>,
) -> Result<OutboundPayload> {
    let mut payload = OutboundPayload::new(target);

    if let Some(text) = text {
        payload = payload.with_text(text);
    }

    if let Some(path) = file {
        payload = payload.with_attachment(load_attachment(&path)?);
    }

    Ok(payload)
}

/// Plain-text listing for `tgids chats`: one line per chat, topics indented
/// underneath.
fn format_grouped_chats(grouped: &GroupedChats) -> String {
    if grouped.is_empty() {
        return format!("{NO_RECENT_CHATS_MESSAGE}\n");
    }

    let mut out = String::new();
    for group in grouped.iter() {
        let chat = group.chat();
        let name = chat.display_name();
        let name = if name.is_empty() { "(no name)" } else { &name };

        out.push_str(&format!("{}\t[{}]\t{}\n", chat.id, chat.kind.as_label(), name));
        for topic in group.topics() {
            out.push_str(&format!("    #{} {}\n", topic.thread_id, topic.display_name()));
        }
    }

    out
}
