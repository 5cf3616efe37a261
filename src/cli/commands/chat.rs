//! Chat command implementation.

use std::io::{BufRead, Write};

use colored::Colorize;

use crate::cli::args::OutputFormat;
use crate::config::ChatConfig;
use crate::error::SalutisError;
use crate::features::chat::{
    render_markdown, ChatMessage, ChatRelay, ChatReply, ChatTransport, Conversation,
    HttpTransport, GREETING,
};
use crate::output::to_json;

/// Execute the chat command.
///
/// With a message, returns one formatted reply. Without one, runs an
/// interactive conversation on stdin and stdout.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the terminal
/// cannot be read or written. Service failures produce a fallback reply.
pub fn chat(
    config: &ChatConfig,
    message: Option<String>,
    format: OutputFormat,
) -> Result<String, SalutisError> {
    let relay = ChatRelay::new(HttpTransport::from_config(config)?);

    match message {
        Some(text) => {
            let reply = relay.relay(&[ChatMessage::user(text)]);
            format_reply(&reply, format)
        }
        None => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout().lock();
            let turns = interactive(Conversation::new(relay), stdin.lock(), &mut stdout, format)?;
            Ok(match format {
                OutputFormat::Pretty => String::new(),
                OutputFormat::Json => to_json(&turns)?,
            })
        }
    }
}

fn format_reply(reply: &ChatReply, format: OutputFormat) -> Result<String, SalutisError> {
    match format {
        OutputFormat::Json => to_json(reply),
        OutputFormat::Pretty if reply.success => Ok(render_markdown(&reply.message)),
        OutputFormat::Pretty => Ok(reply.message.yellow().to_string()),
    }
}

fn is_exit(line: &str) -> bool {
    matches!(line.to_lowercase().as_str(), "exit" | "quit" | "/exit" | "/quit")
}

/// Run a conversation until end of input or an exit command.
///
/// Returns the messages exchanged.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn interactive<T: ChatTransport, R: BufRead, W: Write>(
    mut conversation: Conversation<T>,
    input: R,
    out: &mut W,
    format: OutputFormat,
) -> Result<Vec<ChatMessage>, SalutisError> {
    if format == OutputFormat::Pretty {
        writeln!(out, "{} {}", "assistant>".green().bold(), GREETING)?;
        writeln!(out, "{}", "Type 'exit' or press Ctrl+D to leave.".dimmed())?;
        write!(out, "{} ", "you>".cyan().bold())?;
        out.flush()?;
    }

    for line in input.lines() {
        let line = line?;
        let text = line.trim();

        if is_exit(text) {
            break;
        }

        if !text.is_empty() {
            let reply = conversation.send(text);
            if format == OutputFormat::Pretty {
                writeln!(out, "{}", "assistant>".green().bold())?;
                writeln!(out, "{}", format_reply(&reply, format)?)?;
            }
        }

        if format == OutputFormat::Pretty {
            write!(out, "{} ", "you>".cyan().bold())?;
            out.flush()?;
        }
    }

    if format == OutputFormat::Pretty {
        writeln!(out)?;
    }
    Ok(conversation.history().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::chat::client::MockChatTransport;
    use crate::features::chat::FALLBACK_MESSAGE;

    #[test]
    fn test_interactive_stops_on_exit() {
        let mut transport = MockChatTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Ok("**Breathe** slowly.".to_string()));

        let conversation = Conversation::new(ChatRelay::new(transport));
        let input = "I feel tense\n\nexit\nnever sent\n".as_bytes();
        let mut out = Vec::new();

        let history = interactive(conversation, input, &mut out, OutputFormat::Pretty).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[1].content, "**Breathe** slowly.");
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains(GREETING));
        assert!(out.contains("slowly."));
    }

    #[test]
    fn test_interactive_json_is_quiet() {
        let mut transport = MockChatTransport::new();
        transport.expect_send().returning(|_| Ok("ok".to_string()));

        let conversation = Conversation::new(ChatRelay::new(transport));
        let mut out = Vec::new();
        let history =
            interactive(conversation, "hi\n".as_bytes(), &mut out, OutputFormat::Json).unwrap();

        assert_eq!(history.len(), 2);
        assert!(out.is_empty());
    }

    #[test]
    fn test_format_failed_reply() {
        let reply = ChatReply {
            message: FALLBACK_MESSAGE.to_string(),
            success: false,
        };
        let json = format_reply(&reply, OutputFormat::Json).unwrap();
        assert!(json.contains("\"success\": false"));
        assert!(format_reply(&reply, OutputFormat::Pretty)
            .unwrap()
            .contains("trouble connecting"));
    }
}
