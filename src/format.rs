//! Outbound command formatting.
//!
//! Each function returns one protocol line without the `\r\n` terminator,
//! which the line codec appends when the line is written.

/// Write `cmd middle... :trailing`.
fn write_cmd_freeform(cmd: &str, middle: &[&str], trailing: &str) -> String {
    let mut out = String::with_capacity(
        cmd.len() + trailing.len() + middle.iter().map(|m| m.len() + 1).sum::<usize>() + 2,
    );
    out.push_str(cmd);
    for arg in middle {
        out.push(' ');
        out.push_str(arg);
    }
    out.push_str(" :");
    out.push_str(trailing);
    out
}

/// `NICK <name>`
pub fn nick(name: &str) -> String {
    format!("NICK {}", name)
}

/// `PASS :<password>`, or a bare `PASS`.
pub fn pass(password: Option<&str>) -> String {
    match password {
        Some(password) => write_cmd_freeform("PASS", &[], password),
        None => "PASS".to_string(),
    }
}

/// `USER <user> 0 * :<realname>`
pub fn user(username: &str, realname: &str) -> String {
    write_cmd_freeform("USER", &[username, "0", "*"], realname)
}

/// `QUIT[ :<message>]`
pub fn quit(message: Option<&str>) -> String {
    match message {
        Some(message) => write_cmd_freeform("QUIT", &[], message),
        None => "QUIT".to_string(),
    }
}

/// `JOIN <c1>[,c2,...]`
pub fn join<S: AsRef<str>>(channels: &[S]) -> String {
    format!("JOIN {}", comma_list(channels))
}

/// `PART <c1>[,c2,...] :<message>`
pub fn part<S: AsRef<str>>(channels: &[S], message: &str) -> String {
    write_cmd_freeform("PART", &[comma_list(channels).as_str()], message)
}

/// `PONG :<server>`
pub fn pong(server: &str) -> String {
    write_cmd_freeform("PONG", &[], server)
}

/// `[:<sender> ]PRIVMSG <target> :<text>`
pub fn privmsg(target: &str, text: &str, sender: Option<&str>) -> String {
    let body = write_cmd_freeform("PRIVMSG", &[target], text);
    match sender {
        Some(sender) => format!(":{} {}", sender, body),
        None => body,
    }
}

/// `KICK <channels> <users> :<reason>`
pub fn kick<C: AsRef<str>, U: AsRef<str>>(channels: &[C], users: &[U], reason: &str) -> String {
    let channels = comma_list(channels);
    let users = comma_list(users);
    write_cmd_freeform("KICK", &[channels.as_str(), users.as_str()], reason)
}

/// `MODE <channel> +/-<letter>[ <params>...]`
pub fn mode<S: AsRef<str>>(channel: &str, added: bool, letter: char, params: &[S]) -> String {
    let mut out = format!("MODE {} {}{}", channel, if added { '+' } else { '-' }, letter);
    for param in params {
        out.push(' ');
        out.push_str(param.as_ref());
    }
    out
}

fn comma_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(",")
}
