//! # witterstore
//! An in-memory index store for a small social feed ("Witter").
//!
//! ## Features
//! - Users indexed by id and join time, with cached newest-first listing
//! - Weets indexed by id, post time and author, plus hashtag trends
//! - A follow graph with dated edges, mutual queries and top users
//! - Every index is a red-black tree ([`index::RbTree`])
//! - A line-oriented REPL over all three stores
//!
//! ## Usage
//! The stores can be used directly (see [`store`]). The binary in
//! `main.rs` wraps them in a [`Session`] and drives it from stdin with
//! [`repl_loop`].
// =====================================================================
// File: lib.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 15, 2026
//
//   This module implements the command-line interface (CLI)
//   that accepts the following commands (<ts> is a timestamp in the
//   configured format, <date> a calendar day):
//
//     `ADDUSER <id> <ts> <name...>`  -> Add a user: 1 if added, 0 if the id exists
//     `USER <id>`                    -> One user line, or NULL
//     `USERS`                        -> All users, newest join first, then END
//     `FINDUSERS [<query...>]`       -> Users whose name contains the query, then END
//     `JOINEDBEFORE <ts>`            -> Users joined at or before <ts>, then END
//     `FOLLOW <follower> <followee> <ts>` -> 1 if the edge was added, else 0
//     `FOLLOWERS <id>` / `FOLLOWS <id>`   -> Ids, most recent edge first, then END
//     `ISFOLLOWER <a> <b>`           -> 1 if a follows b, else 0
//     `FOLLOWERCOUNT <id>` / `FOLLOWCOUNT <id>` -> Integer count
//     `MUTUALFOLLOWERS <a> <b>` / `MUTUALFOLLOWS <a> <b>` -> Ids, then END
//     `TOPUSERS`                     -> `<id> <followers>` lines, then END
//     `WEET <id> <author> <ts> <message...>` -> 1 if added, 0 if the id exists
//     `GETWEET <id>`                 -> One weet line, or NULL
//     `WEETS`                        -> All weets, newest first, then END
//     `WEETSBY <author>`             -> An author's weets, newest first, then END
//     `SEARCHWEETS <query...>`       -> Weets containing the query, then END
//     `WEETSON <date>`               -> Weets posted that day, then END
//     `WEETSBEFORE <ts>`             -> Weets posted at or before <ts>, then END
//     `TRENDING`                     -> `<tag> <count>` lines, then END
//     `EXIT` / `QUIT`                -> Terminate the program
//
//   Argument problems print `ERR: <reason>` and the loop continues.
// =====================================================================
pub mod cache;
pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod store;
pub mod trends;

pub mod session;
pub use session::Session;

pub use config::Config;
pub use error::{CommandError, ConfigError, InvariantViolation};
pub use models::{Timestamp, User, UserId, Weet, WeetId};
pub use store::{FollowGraphStore, UserIndexStore, WeetIndexStore};

use std::io::{self, BufRead, Write};
use std::rc::Rc;

use tracing::debug;

/// Result of handling a single user command.
///
/// - `Continue` means the REPL should keep running.
/// - `Exit` means the REPL should break out and terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    Exit,
}


/// Read–Evaluate–Print Loop (REPL) over stdin and stdout.
///
/// # Arguments
/// * `session` - The active [`Session`] holding all three stores.
///
/// # Example
/// ```no_run
/// use witterstore::{Session, repl_loop};
///
/// let mut session = Session::new();
/// repl_loop(&mut session).unwrap(); // <- waits for user input interactively
/// ```
pub fn repl_loop(session: &mut Session) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_repl(stdin.lock(), &mut stdout.lock(), session)
}


/// Feed every line of `input` through [`execute`], writing to `out`,
/// until the input ends or an `EXIT` / `QUIT` is read.
///
/// # Example
/// ```
/// use witterstore::{Session, run_repl};
///
/// let script = "ADDUSER 1 2012-11-02T23:11 Ada\nUSER 1\nEXIT\nUSER 1\n";
/// let mut out = Vec::new();
/// run_repl(script.as_bytes(), &mut out, &mut Session::new()).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "1\n1 2012-11-02T23:11 Ada\nExiting...\n");
/// ```
pub fn run_repl<R: BufRead, W: Write>(input: R, out: &mut W, session: &mut Session) -> io::Result<()> {
    for input_line in input.lines() {
        let full_command = input_line?;
        if execute(&full_command, out, session) == CommandResult::Exit {
            break;
        }
    }
    out.flush()
}


/// Parse and run one input line, printing `ERR: ...` for failures.
pub fn execute<W: Write>(line: &str, out: &mut W, session: &mut Session) -> CommandResult {
    match handle_command(line, out, session) {
        Ok(result) => result,
        Err(CommandError::Io(e)) => {
            // Output is gone, nothing left to report to
            debug!(error = %e, "output failed, stopping");
            CommandResult::Exit
        }
        Err(e) => {
            debug!(line, error = %e, "command rejected");
            match writeln!(out, "ERR: {e}") {
                Ok(()) => CommandResult::Continue,
                Err(_) => CommandResult::Exit,
            }
        }
    }
}


/// Parses a raw input line into a command and its arguments.
///
/// The first token is treated as the command (normalized to uppercase),
/// and the remaining tokens are collected as arguments. Leading and
/// trailing whitespace is ignored.
pub fn parse_command(line: &str) -> (String, Vec<String>) {
    let mut command_segments = line.split_whitespace();
    let cmd = command_segments.next().unwrap_or("").to_uppercase();
    let args: Vec<String> = command_segments.map(|s| s.to_string()).collect();

    (cmd, args)
}


/// Handles a single input line against `session`, writing its response to `out`.
///
/// The line is split with [`parse_command`]. Free-text tails (user
/// names, weet messages, search queries) are instead cut from the raw
/// line, so their inner spacing is kept as typed.
///
/// Returns:
/// - `Ok(CommandResult::Continue)` if the loop should keep running.
/// - `Ok(CommandResult::Exit)` if the user requested termination.
/// - `Err(_)` for bad arguments or an unknown command. Nothing has
///   been written or stored in that case.
pub fn handle_command<W: Write>(
    line: &str,
    out: &mut W,
    session: &mut Session,
) -> Result<CommandResult, CommandError> {
    let (cmd, args) = parse_command(line);
    let (cmd, args) = (cmd.as_str(), args.as_slice());
    // Owned so store borrows below don't overlap the config borrow
    let ts_format = session.config().input.timestamp_format.clone();
    let ts_width = session.timestamp_width();

    match cmd {
        // ADDUSER <id> <ts> <name...>
        "ADDUSER" => {
            require_at_least(cmd, args, 2 + ts_width, "an id, a join time and a name")?;
            let id = parse_id(&args[0])?;
            let joined = session.timestamp(&args[1..1 + ts_width].join(" "));
            let name = text_after(line, 2 + ts_width);
            write_flag(out, session.users.add_user(User::new(id, name, joined)))?;
        }

        // USER <id>
        "USER" => {
            require_exactly(cmd, args, 1, "a user id")?;
            match session.users.get_user(parse_id(&args[0])?) {
                Some(user) => write_user(out, &user, &ts_format)?,
                None => writeln!(out, "NULL")?,
            }
        }

        "USERS" => {
            require_exactly(cmd, args, 0, "no arguments")?;
            write_users(out, session.users.list_users(), &ts_format)?;
        }

        // FINDUSERS [<query...>]; empty query lists everyone
        "FINDUSERS" => {
            let found = session.users.search_users_by_name(text_after(line, 1));
            write_users(out, &found, &ts_format)?;
        }

        // JOINEDBEFORE <ts>
        "JOINEDBEFORE" => {
            require_exactly(cmd, args, ts_width, "a timestamp")?;
            let threshold = session.timestamp(&args.join(" "));
            write_users(out, &session.users.users_joined_before(threshold), &ts_format)?;
        }

        // FOLLOW <follower> <followee> <ts>
        "FOLLOW" => {
            require_exactly(cmd, args, 2 + ts_width, "a follower, a followee and a timestamp")?;
            let follower = parse_id(&args[0])?;
            let followee = parse_id(&args[1])?;
            let at = session.timestamp(&args[2..].join(" "));
            write_flag(out, session.follows.add_edge(follower, followee, at))?;
        }

        "FOLLOWERS" => {
            require_exactly(cmd, args, 1, "a user id")?;
            write_ids(out, &session.follows.get_followers(parse_id(&args[0])?))?;
        }

        "FOLLOWS" => {
            require_exactly(cmd, args, 1, "a user id")?;
            write_ids(out, &session.follows.get_follows(parse_id(&args[0])?))?;
        }

        // ISFOLLOWER <a> <b>: does a follow b
        "ISFOLLOWER" => {
            require_exactly(cmd, args, 2, "two user ids")?;
            let (a, b) = (parse_id(&args[0])?, parse_id(&args[1])?);
            write_flag(out, session.follows.is_follower(a, b))?;
        }

        "FOLLOWERCOUNT" => {
            require_exactly(cmd, args, 1, "a user id")?;
            writeln!(out, "{}", session.follows.follower_count(parse_id(&args[0])?))?;
        }

        "FOLLOWCOUNT" => {
            require_exactly(cmd, args, 1, "a user id")?;
            writeln!(out, "{}", session.follows.follow_count(parse_id(&args[0])?))?;
        }

        "MUTUALFOLLOWERS" => {
            require_exactly(cmd, args, 2, "two user ids")?;
            let (a, b) = (parse_id(&args[0])?, parse_id(&args[1])?);
            write_ids(out, &session.follows.mutual_followers(a, b))?;
        }

        "MUTUALFOLLOWS" => {
            require_exactly(cmd, args, 2, "two user ids")?;
            let (a, b) = (parse_id(&args[0])?, parse_id(&args[1])?);
            write_ids(out, &session.follows.mutual_follows(a, b))?;
        }

        "TOPUSERS" => {
            require_exactly(cmd, args, 0, "no arguments")?;
            for (id, count) in session.follows.top_users_with_counts() {
                writeln!(out, "{id} {count}")?;
            }
            writeln!(out, "END")?;
        }

        // WEET <id> <author> <ts> <message...>
        "WEET" => {
            require_at_least(cmd, args, 3 + ts_width, "an id, an author, a timestamp and a message")?;
            let id = parse_id(&args[0])?;
            let author = parse_id(&args[1])?;
            let posted = session.timestamp(&args[2..2 + ts_width].join(" "));
            let message = text_after(line, 3 + ts_width);
            write_flag(out, session.weets.add_weet(Weet::new(id, author, message, posted)))?;
        }

        "GETWEET" => {
            require_exactly(cmd, args, 1, "a weet id")?;
            match session.weets.get_weet(parse_id(&args[0])?) {
                Some(weet) => write_weet(out, &weet, &ts_format)?,
                None => writeln!(out, "NULL")?,
            }
        }

        "WEETS" => {
            require_exactly(cmd, args, 0, "no arguments")?;
            write_weets(out, session.weets.list_weets(), &ts_format)?;
        }

        "WEETSBY" => {
            require_exactly(cmd, args, 1, "an author id")?;
            write_weets(out, &session.weets.weets_by_user(parse_id(&args[0])?), &ts_format)?;
        }

        // SEARCHWEETS <query...>; a blank query finds nothing
        "SEARCHWEETS" => {
            let found = session.weets.weets_containing(text_after(line, 1));
            write_weets(out, &found, &ts_format)?;
        }

        // WEETSON <date>
        "WEETSON" => {
            require_exactly(cmd, args, session.date_width(), "a date")?;
            let day = session.date(&args.join(" "));
            write_weets(out, &session.weets.weets_on(day), &ts_format)?;
        }

        // WEETSBEFORE <ts>
        "WEETSBEFORE" => {
            require_exactly(cmd, args, ts_width, "a timestamp")?;
            let threshold = session.timestamp(&args.join(" "));
            write_weets(out, &session.weets.weets_before(threshold), &ts_format)?;
        }

        "TRENDING" => {
            require_exactly(cmd, args, 0, "no arguments")?;
            for tag in session.weets.trending() {
                writeln!(out, "{} {}", tag, session.weets.trend_count(&tag))?;
            }
            writeln!(out, "END")?;
        }

        "EXIT" | "QUIT" => {
            writeln!(out, "Exiting...")?;
            return Ok(CommandResult::Exit);
        }

        // Empty input
        "" => {
            writeln!(out, "Enter a command.")?;
        }

        _ => return Err(CommandError::UnknownCommand(cmd.to_string())),
    }

    Ok(CommandResult::Continue)
}


/// Check that exactly `count` arguments were given.
fn require_exactly(cmd: &str, args: &[String], count: usize, expected: &'static str) -> Result<(), CommandError> {
    if args.len() < count {
        Err(CommandError::MissingArgument { cmd: cmd.to_string(), expected })
    } else if args.len() > count {
        Err(CommandError::TooManyArguments(cmd.to_string()))
    } else {
        Ok(())
    }
}


/// Check that at least `count` arguments were given; the tail is free text.
fn require_at_least(cmd: &str, args: &[String], count: usize, expected: &'static str) -> Result<(), CommandError> {
    if args.len() < count {
        return Err(CommandError::MissingArgument { cmd: cmd.to_string(), expected });
    }
    Ok(())
}


/// The rest of `line` once its first `skip` tokens are dropped, trimmed
/// at both ends but otherwise untouched.
fn text_after(line: &str, skip: usize) -> &str {
    let mut rest = line.trim();
    for _ in 0..skip {
        rest = rest.trim_start();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = &rest[end..];
    }
    rest.trim()
}


fn parse_id(value: &str) -> Result<u64, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidArgument {
        value: value.to_string(),
        what: "id",
    })
}


fn write_flag<W: Write>(out: &mut W, flag: bool) -> io::Result<()> {
    writeln!(out, "{}", if flag { 1 } else { 0 })
}


/// Render `ts` with `format`. A format chrono cannot render is an
/// argument error; `Config::load` rejects such formats up front.
fn stamp(ts: Timestamp, format: &str) -> Result<String, CommandError> {
    use std::fmt::Write as _;

    let mut text = String::new();
    write!(text, "{}", ts.format(format)).map_err(|_| CommandError::InvalidArgument {
        value: format.to_string(),
        what: "timestamp format",
    })?;
    Ok(text)
}


fn write_user<W: Write>(out: &mut W, user: &User, format: &str) -> Result<(), CommandError> {
    writeln!(out, "{} {} {}", user.id(), stamp(user.joined(), format)?, user.name())?;
    Ok(())
}


fn write_weet<W: Write>(out: &mut W, weet: &Weet, format: &str) -> Result<(), CommandError> {
    writeln!(
        out,
        "{} {} {} {}",
        weet.id(),
        weet.author(),
        stamp(weet.posted(), format)?,
        weet.message()
    )?;
    Ok(())
}


fn write_users<W: Write>(out: &mut W, users: &[Rc<User>], format: &str) -> Result<(), CommandError> {
    for user in users {
        write_user(out, user, format)?;
    }
    writeln!(out, "END")?;
    Ok(())
}


fn write_weets<W: Write>(out: &mut W, weets: &[Rc<Weet>], format: &str) -> Result<(), CommandError> {
    for weet in weets {
        write_weet(out, weet, format)?;
    }
    writeln!(out, "END")?;
    Ok(())
}


fn write_ids<W: Write>(out: &mut W, ids: &[u64]) -> io::Result<()> {
    for id in ids {
        writeln!(out, "{id}")?;
    }
    writeln!(out, "END")
}



// =================================================================
// lib.rs Unit tests
// =================================================================

#[cfg(test)]
mod main_lib_tests {
    use super::*;

    /// Run one line and return what it printed.
    fn run(session: &mut Session, line: &str) -> String {
        let mut out = Vec::new();
        execute(line, &mut out, session);
        String::from_utf8(out).unwrap()
    }

    /// A session with three users, two follow edges and three weets.
    fn seeded() -> Session {
        let mut session = Session::new();
        for line in [
            "ADDUSER 1 2026-01-01T10:00 Ada Lovelace",
            "ADDUSER 2 2026-01-02T10:00 Alan Turing",
            "ADDUSER 3 2026-01-03T10:00 Grace Hopper",
            "FOLLOW 1 3 2026-01-04T09:00",
            "FOLLOW 2 3 2026-01-05T09:00",
            "WEET 10 1 2026-01-04T12:00 Notes on the #Engine",
            "WEET 11 3 2026-01-05T08:30 found a bug #debugging #engine",
            "WEET 12 3 2026-01-06T18:45 cobol all day",
        ] {
            assert_eq!(run(&mut session, line), "1\n", "seeding '{line}'");
        }
        session
    }

    #[test]
    fn test_parse_exit_command() {
        let (cmd, args) = parse_command("EXIT");
        assert_eq!(cmd, "EXIT");
        assert!(args.is_empty());
    }

    #[test]
    fn test_exit_and_quit_commands() {
        let mut session = Session::new();
        let mut out = Vec::new();
        assert_eq!(execute("exit", &mut out, &mut session), CommandResult::Exit);
        assert_eq!(execute("QUIT", &mut out, &mut session), CommandResult::Exit);
        assert_eq!(String::from_utf8(out).unwrap(), "Exiting...\nExiting...\n");
    }

    #[test]
    fn test_whitespace_command() {
        let (cmd, args) = parse_command("   follow   1         2      ");
        assert_eq!(cmd, "FOLLOW");
        assert_eq!(args, vec!["1", "2"]);
    }

    #[test]
    fn test_parse_invalid_command() {
        let mut session = Session::new();
        let mut out = Vec::new();
        let result = execute("FLY away", &mut out, &mut session);
        // Should not exit on bad command
        assert_eq!(result, CommandResult::Continue);
        assert_eq!(String::from_utf8(out).unwrap(), "ERR: unknown command 'FLY'\n");
    }

    #[test]
    fn test_empty_line_prompts() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "   "), "Enter a command.\n");
    }

    #[test]
    fn test_adduser_and_user() {
        let mut session = seeded();
        assert_eq!(run(&mut session, "USER 1"), "1 2026-01-01T10:00 Ada Lovelace\n");
        assert_eq!(run(&mut session, "USER 9"), "NULL\n");
        assert_eq!(run(&mut session, "ADDUSER 1 2026-02-01T10:00 Someone"), "0\n");
    }

    #[test]
    fn test_argument_errors() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "USER"), "ERR: USER requires a user id\n");
        assert_eq!(run(&mut session, "USER 1 2"), "ERR: Too many arguments for USER\n");
        assert_eq!(run(&mut session, "USER abc"), "ERR: 'abc' is not a valid id\n");
        assert_eq!(run(&mut session, "USER -4"), "ERR: '-4' is not a valid id\n");
        assert_eq!(
            run(&mut session, "ADDUSER 1 2026-01-01T10:00"),
            "ERR: ADDUSER requires an id, a join time and a name\n"
        );
        assert_eq!(run(&mut session, "USERS now"), "ERR: Too many arguments for USERS\n");
        // Nothing was stored along the way
        assert!(session.users.is_empty());
    }

    #[test]
    fn test_users_listing_and_filters() {
        let mut session = seeded();
        assert_eq!(
            run(&mut session, "USERS"),
            "3 2026-01-03T10:00 Grace Hopper\n\
             2 2026-01-02T10:00 Alan Turing\n\
             1 2026-01-01T10:00 Ada Lovelace\n\
             END\n"
        );
        assert_eq!(
            run(&mut session, "JOINEDBEFORE 2026-01-02T10:00"),
            "2 2026-01-02T10:00 Alan Turing\n1 2026-01-01T10:00 Ada Lovelace\nEND\n"
        );
        assert_eq!(
            run(&mut session, "FINDUSERS grace"),
            "3 2026-01-03T10:00 Grace Hopper\nEND\n"
        );
        assert_eq!(run(&mut session, "FINDUSERS nobody"), "END\n");
    }

    #[test]
    fn test_malformed_timestamp_uses_default() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "ADDUSER 7 sometime Old Timer"), "1\n");
        assert_eq!(run(&mut session, "USER 7"), "7 1970-01-01T00:00 Old Timer\n");
    }

    #[test]
    fn test_follow_commands() {
        let mut session = seeded();
        assert_eq!(run(&mut session, "FOLLOW 1 3 2026-01-09T09:00"), "0\n");
        assert_eq!(run(&mut session, "FOLLOW 4 4 2026-01-09T09:00"), "0\n");
        assert_eq!(run(&mut session, "ISFOLLOWER 1 3"), "1\n");
        assert_eq!(run(&mut session, "ISFOLLOWER 3 1"), "0\n");
        assert_eq!(run(&mut session, "FOLLOWERS 3"), "2\n1\nEND\n");
        assert_eq!(run(&mut session, "FOLLOWS 1"), "3\nEND\n");
        assert_eq!(run(&mut session, "FOLLOWERCOUNT 3"), "2\n");
        assert_eq!(run(&mut session, "FOLLOWCOUNT 3"), "0\n");
        assert_eq!(run(&mut session, "MUTUALFOLLOWS 1 2"), "3\nEND\n");
        assert_eq!(run(&mut session, "MUTUALFOLLOWERS 1 2"), "END\n");
        assert_eq!(run(&mut session, "TOPUSERS"), "3 2\n2 0\n1 0\nEND\n");
    }

    #[test]
    fn test_weet_commands() {
        let mut session = seeded();
        assert_eq!(
            run(&mut session, "GETWEET 10"),
            "10 1 2026-01-04T12:00 Notes on the #Engine\n"
        );
        assert_eq!(run(&mut session, "GETWEET 99"), "NULL\n");
        assert_eq!(run(&mut session, "WEET 10 2 2026-01-09T09:00 again"), "0\n");
        assert_eq!(
            run(&mut session, "WEETSBY 3"),
            "12 3 2026-01-06T18:45 cobol all day\n\
             11 3 2026-01-05T08:30 found a bug #debugging #engine\n\
             END\n"
        );
        assert_eq!(
            run(&mut session, "WEETSON 2026-01-05"),
            "11 3 2026-01-05T08:30 found a bug #debugging #engine\nEND\n"
        );
        assert_eq!(
            run(&mut session, "WEETSBEFORE 2026-01-04T12:00"),
            "10 1 2026-01-04T12:00 Notes on the #Engine\nEND\n"
        );
        assert_eq!(
            run(&mut session, "SEARCHWEETS ENGINE"),
            "11 3 2026-01-05T08:30 found a bug #debugging #engine\n\
             10 1 2026-01-04T12:00 Notes on the #Engine\n\
             END\n"
        );
        assert_eq!(run(&mut session, "SEARCHWEETS"), "END\n");
        assert_eq!(run(&mut session, "TRENDING"), "#engine 2\n#debugging 1\nEND\n");
        assert_eq!(run(&mut session, "WEETS").lines().count(), 4);
    }

    #[test]
    fn test_run_repl_stops_at_exit() {
        let script = "ADDUSER 1 2026-01-01T10:00 Ada\nUSERS\nEXIT\nADDUSER 2 2026-01-01T10:00 Bob\n";
        let mut session = Session::new();
        let mut out = Vec::new();
        run_repl(script.as_bytes(), &mut out, &mut session).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1\n1 2026-01-01T10:00 Ada\nEND\nExiting...\n"
        );
        assert_eq!(session.users.len(), 1);
    }

    #[test]
    fn test_free_text_keeps_inner_spacing() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "ADDUSER 1 2026-01-01T10:00   Ada  Lovelace  "), "1\n");
        assert_eq!(run(&mut session, "USER 1"), "1 2026-01-01T10:00 Ada  Lovelace\n");

        assert_eq!(run(&mut session, "WEET 5 1 2026-01-02T10:00 tabbed\tout   #Wide"), "1\n");
        assert_eq!(run(&mut session, "GETWEET 5"), "5 1 2026-01-02T10:00 tabbed\tout   #Wide\n");
        assert_eq!(session.weets.trend_count("#wide"), 1);

        // Queries keep their spacing too
        assert_eq!(run(&mut session, "FINDUSERS ada  love"), "1 2026-01-01T10:00 Ada  Lovelace\nEND\n");
        assert_eq!(run(&mut session, "FINDUSERS ada love"), "END\n");
        assert_eq!(run(&mut session, "SEARCHWEETS out   #wide"), "5 1 2026-01-02T10:00 tabbed\tout   #Wide\nEND\n");
    }

    #[test]
    fn test_text_after_skips_tokens() {
        assert_eq!(text_after("  WEET 1  2 ts  hello   world ", 4), "hello   world");
        assert_eq!(text_after("FINDUSERS", 1), "");
        assert_eq!(text_after("a b", 5), "");
    }

    #[test]
    fn test_unrenderable_format_is_an_error_not_a_panic() {
        // Built in code, so it skips the checks Config::load runs
        let mut config = Config::default();
        config.input.timestamp_format = "%Q".to_string();
        let mut session = Session::with_config(config);

        assert_eq!(run(&mut session, "ADDUSER 1 x Ada"), "1\n");
        assert_eq!(run(&mut session, "USERS"), "ERR: '%Q' is not a valid timestamp format\n");
        assert_eq!(run(&mut session, "USER 1"), "ERR: '%Q' is not a valid timestamp format\n");
        assert_eq!(run(&mut session, "WEET 1 1 x hi"), "1\n");
        assert_eq!(run(&mut session, "WEETS"), "ERR: '%Q' is not a valid timestamp format\n");
        // The loop keeps going
        assert_eq!(run(&mut session, "ISFOLLOWER 1 2"), "0\n");
    }

    #[test]
    fn test_multi_token_timestamp_format() {
        let mut config = Config::default();
        config.input.timestamp_format = "%d/%m/%Y %H:%M".to_string();
        let mut session = Session::with_config(config);

        assert_eq!(run(&mut session, "ADDUSER 1 02/11/2012 23:11 Ada"), "1\n");
        assert_eq!(run(&mut session, "USER 1"), "1 02/11/2012 23:11 Ada\n");
        assert_eq!(
            run(&mut session, "FOLLOW 1 2 02/11/2012"),
            "ERR: FOLLOW requires a follower, a followee and a timestamp\n"
        );
        assert_eq!(run(&mut session, "FOLLOW 1 2 03/11/2012 08:00"), "1\n");
    }
}
