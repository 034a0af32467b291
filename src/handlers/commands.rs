//! Shell command parsing
//!
//! The terminal front end accepts one command per line. Inside an open thread a
//! line that is not a command is treated as message text.

use crate::models::CreateGroupRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    /// List groups
    Groups,
    /// `create name | description | icon url`
    Create(CreateGroupRequest),
    /// Open the n-th listed group (1-based)
    Open(usize),
    /// Send the given text, or the current draft when empty
    Send(String),
    Attach(String),
    Detach,
    Back,
    Help,
    Quit,
    Unknown(String),
}

/// Parse one input line; `None` for blank lines
pub fn parse(line: &str, in_thread: bool) -> Option<ShellCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "groups" | "ls" => ShellCommand::Groups,
        "create" => {
            let mut fields = rest.splitn(3, '|').map(str::trim);
            ShellCommand::Create(CreateGroupRequest {
                name: fields.next().unwrap_or_default().to_string(),
                description: fields.next().unwrap_or_default().to_string(),
                icon_url: fields.next().unwrap_or_default().to_string(),
            })
        }
        "open" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => ShellCommand::Open(n),
            _ => ShellCommand::Unknown(line.to_string()),
        },
        "send" => ShellCommand::Send(rest.to_string()),
        "attach" if !rest.is_empty() => ShellCommand::Attach(rest.to_string()),
        "detach" => ShellCommand::Detach,
        "back" => ShellCommand::Back,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        _ if in_thread => ShellCommand::Send(line.to_string()),
        _ => ShellCommand::Unknown(line.to_string()),
    };

    Some(command)
}
