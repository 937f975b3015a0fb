//! Telegram command surface.

use crate::registry::Registry;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::{BotCommands, ParseError};
use teloxide::utils::html;
use tracing::info;

pub const WELCOME: &str =
    "👋 Welcome! Send /add &lt;address&gt; &lt;name&gt; to start tracking transactions.";
pub const ADD_USAGE: &str = "⚠️ Wrong format! Use: /add &lt;address&gt; &lt;name&gt;";
pub const EMPTY_LIST: &str = "📭 No addresses are being watched.";

/// Bot commands.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Show the welcome message")]
    Start,
    #[command(description = "Watch an address. Usage: /add <address> <name>", parse_with = raw_args)]
    Add(String),
    #[command(description = "List watched addresses")]
    List,
    #[command(description = "Show help")]
    Help,
}

// Validation happens in `add_reply` so a bare `/add` still gets the usage text.
fn raw_args(input: String) -> Result<(String,), ParseError> {
    Ok((input,))
}

/// Split `/add` arguments into address and name. The name keeps inner spaces.
pub fn parse_add_args(args: &str) -> Option<(&str, &str)> {
    let mut parts = args.trim().splitn(2, char::is_whitespace);
    let address = parts.next().filter(|s| !s.is_empty())?;
    let name = parts.next().map(str::trim).filter(|s| !s.is_empty())?;
    Some((address, name))
}

pub fn add_reply(registry: &Registry, args: &str) -> String {
    let Some((address, name)) = parse_add_args(args) else {
        return ADD_USAGE.to_string();
    };

    let is_new = registry.add(address, name);
    info!(
        "➕ {} {} as {:?} ({} watched)",
        if is_new { "Watching" } else { "Renamed" },
        address.to_lowercase(),
        name,
        registry.len()
    );

    format!(
        "✅ Address {} ({}) has been added!",
        html::escape(name),
        html::escape(address)
    )
}

pub fn list_reply(registry: &Registry) -> String {
    let entries = registry.snapshot();
    if entries.is_empty() {
        return EMPTY_LIST.to_string();
    }

    let mut msg = String::from("📋 <b>Watched addresses:</b>\n");
    for entry in entries {
        msg.push_str(&format!(
            "🔹 {}: <code>{}</code>\n",
            html::escape(&entry.name),
            html::escape(&entry.address)
        ));
    }
    msg
}

pub fn reply_for(registry: &Registry, cmd: &Command) -> String {
    match cmd {
        Command::Start => WELCOME.to_string(),
        Command::Add(args) => add_reply(registry, args),
        Command::List => list_reply(registry),
        Command::Help => html::escape(&Command::descriptions().to_string()),
    }
}

async fn answer(bot: Bot, msg: Message, cmd: Command, registry: Registry) -> ResponseResult<()> {
    let text = reply_for(&registry, &cmd);
    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Run the long-polling command dispatcher until it stops.
pub async fn run(bot: Bot, registry: Registry) {
    let handler = Update::filter_message().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let registry = registry.clone();
            async move { answer(bot, msg, cmd, registry).await }
        },
    );

    info!("🤖 Bot command handler started");
    Dispatcher::builder(bot, handler).build().dispatch().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("/start", "bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/list", "bot").unwrap(), Command::List);
        assert_eq!(
            Command::parse("/add 0xAbC Alice Smith", "bot").unwrap(),
            Command::Add("0xAbC Alice Smith".to_string())
        );
    }

    #[test]
    fn start_is_static() {
        let reg = Registry::new();
        assert_eq!(reply_for(&reg, &Command::Start), WELCOME);
    }

    #[test]
    fn add_then_list_contains_pair() {
        let reg = Registry::new();
        let reply = add_reply(&reg, "0xAbC123 Alice");
        assert_eq!(reply, "✅ Address Alice (0xAbC123) has been added!");

        let list = list_reply(&reg);
        assert!(list.starts_with("📋 <b>Watched addresses:</b>\n"));
        assert!(list.contains("🔹 Alice: <code>0xabc123</code>\n"));
    }

    #[test]
    fn name_takes_remaining_text() {
        assert_eq!(
            parse_add_args("0xabc  Alice Cold Wallet "),
            Some(("0xabc", "Alice Cold Wallet"))
        );
        assert_eq!(parse_add_args("0xabc"), None);
        assert_eq!(parse_add_args("   "), None);
        assert_eq!(parse_add_args(""), None);
    }

    #[test]
    fn re_add_overwrites_single_entry() {
        let reg = Registry::new();
        add_reply(&reg, "0xABC Alice");
        add_reply(&reg, "0xabc Bob");

        let list = list_reply(&reg);
        assert_eq!(list.matches("<code>0xabc</code>").count(), 1);
        assert!(list.contains("🔹 Bob: <code>0xabc</code>"));
        assert!(!list.contains("Alice"));
    }

    #[test]
    fn malformed_add_leaves_registry_unchanged() {
        let reg = Registry::new();
        let cmd = Command::parse("/add onlyoneargument", "bot").unwrap();
        assert_eq!(reply_for(&reg, &cmd), ADD_USAGE);
        assert_eq!(reg.len(), 0);
        assert_eq!(list_reply(&reg), EMPTY_LIST);

        let bare = Command::parse("/add", "bot").unwrap();
        assert_eq!(reply_for(&reg, &bare), ADD_USAGE);
        assert_eq!(reg.len(), 0);
    }

    #[test]
    fn empty_list_has_indicator() {
        let reg = Registry::new();
        let list = list_reply(&reg);
        assert_eq!(list, EMPTY_LIST);
        assert!(!list.trim().is_empty());
    }

    #[test]
    fn list_keeps_insertion_order() {
        let reg = Registry::new();
        add_reply(&reg, "0x2 Second");
        add_reply(&reg, "0x1 First");
        let list = list_reply(&reg);
        let second = list.find("Second").unwrap();
        let first = list.find("First").unwrap();
        assert!(second < first);
    }
}
