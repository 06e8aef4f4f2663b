//! IRC numeric response codes.
//!
//! Only the codes the client acts on are named: the welcome reply and the
//! RFC 2812 error replies, each with the names of the parameters it carries
//! after the addressed target.
//!
//! # Reference
//! - RFC 2812 section 5: Replies

#![allow(non_camel_case_types)]

mod helpers;

pub use self::helpers::{error_param_names, ErrorParams};

/// IRC server response code.
///
/// Codes are categorized as:
/// - 000-399: Replies
/// - 400-599: Errors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    /// 001 `:Welcome to the Internet Relay Network <nick>!<user>@<host>`
    RPL_WELCOME = 1,

    /// 401 `<nick> :No such nick/channel`
    ERR_NOSUCHNICK = 401,
    /// 402 `<server> :No such server`
    ERR_NOSUCHSERVER = 402,
    /// 403 `<channel> :No such channel`
    ERR_NOSUCHCHANNEL = 403,
    /// 404 `<channel> :Cannot send to channel`
    ERR_CANNOTSENDTOCHAN = 404,
    /// 405 `<channel> :Too many channels`
    ERR_TOOMANYCHANNELS = 405,
    /// 406 `<nick> :There was no such nickname`
    ERR_WASNOSUCHNICK = 406,
    /// 407 `<target> :Too many targets`
    ERR_TOOMANYTARGETS = 407,
    /// 408 `<service> :No such service`
    ERR_NOSUCHSERVICE = 408,
    /// 409 `:No origin specified`
    ERR_NOORIGIN = 409,
    /// 411 `:No recipient given`
    ERR_NORECIPIENT = 411,
    /// 412 `:No text to send`
    ERR_NOTEXTTOSEND = 412,
    /// 413 `<mask> :No toplevel domain specified`
    ERR_NOTOPLEVEL = 413,
    /// 414 `<mask> :Wildcard in toplevel domain`
    ERR_WILDTOPLEVEL = 414,
    /// 415 `<mask> :Bad server/host mask`
    ERR_BADMASK = 415,
    /// 421 `<command> :Unknown command`
    ERR_UNKNOWNCOMMAND = 421,
    /// 422 `:MOTD file is missing`
    ERR_NOMOTD = 422,
    /// 423 `<server> :No administrative info available`
    ERR_NOADMININFO = 423,
    /// 424 `:File error`
    ERR_FILEERROR = 424,
    /// 431 `:No nickname given`
    ERR_NONICKNAMEGIVEN = 431,
    /// 432 `<nick> :Erroneous nickname`
    ERR_ERRONEOUSNICKNAME = 432,
    /// 433 `<nick> :Nickname is already in use`
    ERR_NICKNAMEINUSE = 433,
    /// 436 `<nick> :Nickname collision`
    ERR_NICKCOLLISION = 436,
    /// 437 `<resource> :Nick/channel is temporarily unavailable`
    ERR_UNAVAILRESOURCE = 437,
    /// 441 `<nick> <channel> :They aren't on that channel`
    ERR_USERNOTINCHANNEL = 441,
    /// 442 `<channel> :You're not on that channel`
    ERR_NOTONCHANNEL = 442,
    /// 443 `<user> <channel> :User is already on channel`
    ERR_USERONCHANNEL = 443,
    /// 444 `<user> :User not logged in`
    ERR_NOLOGIN = 444,
    /// 445 `:SUMMON has been disabled`
    ERR_SUMMONDISABLED = 445,
    /// 446 `:USERS has been disabled`
    ERR_USERSDISABLED = 446,
    /// 451 `:You have not registered`
    ERR_NOTREGISTERED = 451,
    /// 461 `<command> :Not enough parameters`
    ERR_NEEDMOREPARAMS = 461,
    /// 462 `:You may not reregister`
    ERR_ALREADYREGISTERED = 462,
    /// 463 `:Your host isn't among the privileged`
    ERR_NOPERMFORHOST = 463,
    /// 464 `:Password incorrect`
    ERR_PASSWDMISMATCH = 464,
    /// 465 `:You are banned from this server`
    ERR_YOUREBANNEDCREEP = 465,
    /// 466 `:You will be banned`
    ERR_YOUWILLBEBANNED = 466,
    /// 467 `<channel> :Channel key already set`
    ERR_KEYSET = 467,
    /// 471 `<channel> :Cannot join channel (+l)`
    ERR_CHANNELISFULL = 471,
    /// 472 `<mode> :Unknown mode char`
    ERR_UNKNOWNMODE = 472,
    /// 473 `<channel> :Cannot join channel (+i)`
    ERR_INVITEONLYCHAN = 473,
    /// 474 `<channel> :Cannot join channel (+b)`
    ERR_BANNEDFROMCHAN = 474,
    /// 475 `<channel> :Cannot join channel (+k)`
    ERR_BADCHANNELKEY = 475,
    /// 476 `<channel> :Bad channel mask`
    ERR_BADCHANMASK = 476,
    /// 477 `<channel> :Channel doesn't support modes`
    ERR_NOCHANMODES = 477,
    /// 478 `<channel> <mode> :Channel list is full`
    ERR_BANLISTFULL = 478,
    /// 481 `:Permission denied, not an IRC operator`
    ERR_NOPRIVILEGES = 481,
    /// 482 `<channel> :You're not channel operator`
    ERR_CHANOPRIVSNEEDED = 482,
    /// 483 `:You can't kill a server`
    ERR_CANTKILLSERVER = 483,
    /// 484 `:Your connection is restricted`
    ERR_RESTRICTED = 484,
    /// 485 `:You're not the original channel operator`
    ERR_UNIQOPPRIVSNEEDED = 485,
    /// 491 `:No O-lines for your host`
    ERR_NOOPERHOST = 491,
    /// 501 `:Unknown MODE flag`
    ERR_UMODEUNKNOWNFLAG = 501,
    /// 502 `:Cannot change mode for other users`
    ERR_USERSDONTMATCH = 502,
}
