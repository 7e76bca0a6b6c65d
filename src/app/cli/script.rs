//! Line-oriented command script
//!
//! One command per line; blank lines and lines starting with `#` are skipped.
//! Values run to the end of the line, so they may contain spaces.
//!
//! ```text
//! set jobs
//! watch jobs
//! enqueue jobs build the docs
//! wait jobs deploy
//! dequeue jobs
//! status jobs
//! ```

/// A parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Create a queue explicitly (fails if it exists or the pool is full)
    Set { name: String },
    Enqueue { name: String, value: String },
    /// Enqueue and report when that item is released
    Wait { name: String, value: String },
    Dequeue { name: String },
    /// Print ready/dequeued/status notifications of a queue from now on
    Watch { name: String },
    Status { name: String },
    Remove { name: String },
    Clear,
    List,
    /// Change the log level while running
    Log { level: String },
}

/// Parse one script line; `Ok(None)` for blank lines and comments
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (keyword, rest) = split_word(line);
    let command = match keyword.to_ascii_lowercase().as_str() {
        "set" => ScriptCommand::Set {
            name: single_name(keyword, rest)?,
        },
        "enqueue" => {
            let (name, value) = name_and_value(keyword, rest)?;
            ScriptCommand::Enqueue { name, value }
        }
        "wait" => {
            let (name, value) = name_and_value(keyword, rest)?;
            ScriptCommand::Wait { name, value }
        }
        "dequeue" => ScriptCommand::Dequeue {
            name: single_name(keyword, rest)?,
        },
        "watch" => ScriptCommand::Watch {
            name: single_name(keyword, rest)?,
        },
        "status" => ScriptCommand::Status {
            name: single_name(keyword, rest)?,
        },
        "remove" => ScriptCommand::Remove {
            name: single_name(keyword, rest)?,
        },
        "clear" => no_arguments(keyword, rest, ScriptCommand::Clear)?,
        "list" => no_arguments(keyword, rest, ScriptCommand::List)?,
        "log" => ScriptCommand::Log {
            level: single_name(keyword, rest)?,
        },
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(Some(command))
}

fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text, ""),
    }
}

fn single_name(keyword: &str, rest: &str) -> Result<String, String> {
    match split_word(rest) {
        ("", _) => Err(format!("'{}' needs a queue name", keyword)),
        (name, "") => Ok(name.to_string()),
        (_, extra) => Err(format!("'{}' takes one argument, found extra '{}'", keyword, extra)),
    }
}

fn name_and_value(keyword: &str, rest: &str) -> Result<(String, String), String> {
    match split_word(rest) {
        ("", _) => Err(format!("'{}' needs a queue name and a value", keyword)),
        (_, "") => Err(format!("'{}' needs a value after the queue name", keyword)),
        (name, value) => Ok((name.to_string(), value.trim_end().to_string())),
    }
}

fn no_arguments(keyword: &str, rest: &str, command: ScriptCommand) -> Result<ScriptCommand, String> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(format!("'{}' takes no arguments", keyword))
    }
}
