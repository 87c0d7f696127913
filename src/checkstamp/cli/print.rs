use checkstamp::api::{CmdMessage, MessageLevel};
use checkstamp::config::{CONFIG_KEYS, StampConfig};
use colored::Colorize;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", colorize(message));
    }
}

/// Same as [`print_messages`] but on stderr, for commands whose stdout is data.
pub fn eprint_messages(messages: &[CmdMessage]) {
    for message in messages {
        eprintln!("{}", colorize(message));
    }
}

pub fn print_config(config: &StampConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn colorize(message: &CmdMessage) -> colored::ColoredString {
    match message.level {
        MessageLevel::Info => message.content.dimmed(),
        MessageLevel::Success => message.content.green(),
        MessageLevel::Warning => message.content.yellow(),
        MessageLevel::Error => message.content.red(),
    }
}
