//! Code conversion and the error parameter schema table.

use std::fmt;

use super::Response;

const MESSAGE: &[&str] = &["message"];

impl Response {
    /// Returns the numeric code as u16
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Creates a Response from a numeric code
    pub fn from_code(code: u16) -> Option<Response> {
        use self::Response::*;

        let resp = match code {
            1 => RPL_WELCOME,
            401 => ERR_NOSUCHNICK,
            402 => ERR_NOSUCHSERVER,
            403 => ERR_NOSUCHCHANNEL,
            404 => ERR_CANNOTSENDTOCHAN,
            405 => ERR_TOOMANYCHANNELS,
            406 => ERR_WASNOSUCHNICK,
            407 => ERR_TOOMANYTARGETS,
            408 => ERR_NOSUCHSERVICE,
            409 => ERR_NOORIGIN,
            411 => ERR_NORECIPIENT,
            412 => ERR_NOTEXTTOSEND,
            413 => ERR_NOTOPLEVEL,
            414 => ERR_WILDTOPLEVEL,
            415 => ERR_BADMASK,
            421 => ERR_UNKNOWNCOMMAND,
            422 => ERR_NOMOTD,
            423 => ERR_NOADMININFO,
            424 => ERR_FILEERROR,
            431 => ERR_NONICKNAMEGIVEN,
            432 => ERR_ERRONEOUSNICKNAME,
            433 => ERR_NICKNAMEINUSE,
            436 => ERR_NICKCOLLISION,
            437 => ERR_UNAVAILRESOURCE,
            441 => ERR_USERNOTINCHANNEL,
            442 => ERR_NOTONCHANNEL,
            443 => ERR_USERONCHANNEL,
            444 => ERR_NOLOGIN,
            445 => ERR_SUMMONDISABLED,
            446 => ERR_USERSDISABLED,
            451 => ERR_NOTREGISTERED,
            461 => ERR_NEEDMOREPARAMS,
            462 => ERR_ALREADYREGISTERED,
            463 => ERR_NOPERMFORHOST,
            464 => ERR_PASSWDMISMATCH,
            465 => ERR_YOUREBANNEDCREEP,
            466 => ERR_YOUWILLBEBANNED,
            467 => ERR_KEYSET,
            471 => ERR_CHANNELISFULL,
            472 => ERR_UNKNOWNMODE,
            473 => ERR_INVITEONLYCHAN,
            474 => ERR_BANNEDFROMCHAN,
            475 => ERR_BADCHANNELKEY,
            476 => ERR_BADCHANMASK,
            477 => ERR_NOCHANMODES,
            478 => ERR_BANLISTFULL,
            481 => ERR_NOPRIVILEGES,
            482 => ERR_CHANOPRIVSNEEDED,
            483 => ERR_CANTKILLSERVER,
            484 => ERR_RESTRICTED,
            485 => ERR_UNIQOPPRIVSNEEDED,
            491 => ERR_NOOPERHOST,
            501 => ERR_UMODEUNKNOWNFLAG,
            502 => ERR_USERSDONTMATCH,
            _ => return None,
        };
        Some(resp)
    }

    /// Check if this is an error response (400-599)
    #[inline]
    pub fn is_error(&self) -> bool {
        (400..600).contains(&self.code())
    }

    /// Check if this is a reply (000-399)
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.code() < 400
    }

    /// Names of the parameters following the addressed target.
    pub fn param_names(&self) -> &'static [&'static str] {
        use self::Response::*;

        match self {
            ERR_NOSUCHNICK | ERR_WASNOSUCHNICK | ERR_ERRONEOUSNICKNAME | ERR_NICKNAMEINUSE
            | ERR_NICKCOLLISION => &["nick", "message"],
            ERR_NOSUCHSERVER | ERR_NOADMININFO => &["server", "message"],
            ERR_NOSUCHCHANNEL | ERR_CANNOTSENDTOCHAN | ERR_TOOMANYCHANNELS | ERR_NOTONCHANNEL
            | ERR_KEYSET | ERR_CHANNELISFULL | ERR_INVITEONLYCHAN | ERR_BANNEDFROMCHAN
            | ERR_BADCHANNELKEY | ERR_BADCHANMASK | ERR_NOCHANMODES | ERR_CHANOPRIVSNEEDED => {
                &["channel", "message"]
            }
            ERR_TOOMANYTARGETS => &["target", "message"],
            ERR_NOSUCHSERVICE => &["service", "message"],
            ERR_NOTOPLEVEL | ERR_WILDTOPLEVEL | ERR_BADMASK => &["mask", "message"],
            ERR_UNKNOWNCOMMAND | ERR_NEEDMOREPARAMS => &["command", "message"],
            ERR_UNAVAILRESOURCE => &["resource", "message"],
            ERR_USERNOTINCHANNEL => &["nick", "channel", "message"],
            ERR_USERONCHANNEL => &["user", "channel", "message"],
            ERR_NOLOGIN => &["user", "message"],
            ERR_UNKNOWNMODE => &["mode", "message"],
            ERR_BANLISTFULL => &["channel", "mode", "message"],
            _ => MESSAGE,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}

/// Parameter names for an error code; unknown codes carry just a message.
pub fn error_param_names(code: u16) -> &'static [&'static str] {
    Response::from_code(code).map_or(MESSAGE, |r| r.param_names())
}

/// Named parameters of an error reply, in schema order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorParams {
    entries: Vec<(&'static str, String)>,
}

impl ErrorParams {
    /// Bind `params` (target already removed) onto `names` by position.
    ///
    /// On a count mismatch every name is bound to `""` except `message`,
    /// which receives all of `params` joined by spaces.
    pub fn bind(names: &'static [&'static str], params: &[&str]) -> Self {
        let entries = if names.len() == params.len() {
            names
                .iter()
                .zip(params)
                .map(|(name, value)| (*name, value.to_string()))
                .collect()
        } else {
            names
                .iter()
                .map(|name| {
                    let value = if *name == "message" {
                        params.join(" ")
                    } else {
                        String::new()
                    };
                    (*name, value)
                })
                .collect()
        };
        Self { entries }
    }

    /// The value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The bound message text, if the schema has one.
    pub fn message(&self) -> Option<&str> {
        self.get("message")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
