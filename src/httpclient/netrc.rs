//! Reading credentials from netrc files.
//!
//! Entries are looked up by host name. The file is a stream of
//! whitespace separated tokens:
//!
//! ```text
//! machine simapi.sim.lrz.de
//!   login di38qex
//!   password secret
//! ```
//!
//! A host name may also start an entry without the `machine` keyword,
//! so `simapi.sim.lrz.de login di38qex password secret` on a single
//! line is accepted. When a host is listed more than once, the last
//! entry wins. A `default` entry is used for hosts without their own
//! entry.
//!
//! Values containing whitespace are written in double quotes, and a
//! `#` in place of a keyword starts a comment up to the end of the line.

use directories::BaseDirs;
use snafu::{OptionExt, ResultExt, Snafu};
use std::fmt;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Cannot read credentials file '{}': {}", path.display(), source))]
    FileUnreadable {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display(
        "Cannot parse credentials file '{}' (line {}): {}",
        path.display(),
        line,
        message
    ))]
    FileUnparseable {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[snafu(display("No credentials for host '{}' in '{}'", host, path.display()))]
    NotFound { host: String, path: PathBuf },

    #[snafu(display("Cannot determine the home directory to look for a .netrc file"))]
    NoHomeDir,
}

impl Error {
    /// Whether the file itself could not be found.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Error::FileUnreadable { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Login data for one host.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub host: String,
    pub login: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("login", &self.login)
            .field("password", &"***")
            .finish()
    }
}

/// The `~/.netrc` file of the current user.
pub fn default_path() -> Result<PathBuf, Error> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".netrc"))
        .ok_or(Error::NoHomeDir)
}

/// Reads the file at `path` and returns the credentials for `host`.
pub fn resolve(path: &Path, host: &str) -> Result<Credentials, Error> {
    let content = std::fs::read_to_string(path).context(FileUnreadableSnafu { path })?;
    let entries = parse(&content).map_err(|(line, message)| Error::FileUnparseable {
        path: path.to_path_buf(),
        line,
        message,
    })?;
    let creds = lookup(&entries, host).context(NotFoundSnafu { host, path })?;
    log::debug!("Loaded credentials for {} from {}", host, path.display());
    Ok(creds)
}

#[derive(Debug, Default, PartialEq)]
struct Entry {
    /// `None` for the `default` entry
    host: Option<String>,
    login: Option<String>,
    password: Option<String>,
}

fn lookup(entries: &[Entry], host: &str) -> Option<Credentials> {
    let by_host = entries
        .iter()
        .rev()
        .find(|e| e.host.as_deref().is_some_and(|h| h.eq_ignore_ascii_case(host)));
    let entry = by_host.or_else(|| entries.iter().rev().find(|e| e.host.is_none()))?;
    match (&entry.login, &entry.password) {
        (Some(login), Some(password)) if !login.is_empty() && !password.is_empty() => {
            Some(Credentials {
                host: host.to_string(),
                login: login.clone(),
                password: password.clone(),
            })
        }
        _ => {
            log::debug!("Incomplete credentials for host {}", host);
            None
        }
    }
}

/// Parses netrc content into its entries. Errors carry the 1-based
/// line number and a message.
fn parse(content: &str) -> Result<Vec<Entry>, (usize, String)> {
    let mut entries: Vec<Entry> = Vec::new();
    let mut in_macro = false;
    let mut pending: Option<&'static str> = None;

    for (idx, line) in content.lines().enumerate() {
        let lineno = idx + 1;
        if in_macro {
            in_macro = !line.trim().is_empty();
            continue;
        }
        if line.trim_start().starts_with('#') {
            continue;
        }

        for token in Lexer::new(line) {
            let token = token.map_err(|msg| (lineno, msg))?;
            if let Some(kw) = pending.take() {
                apply(&mut entries, kw, token.text);
                continue;
            }
            if token.quoted {
                return Err((lineno, format!("unexpected value '{}'", token.text)));
            }
            match token.text.as_str() {
                "default" => entries.push(Entry::default()),
                "macdef" => {
                    // the macro name follows on the same line, the body
                    // runs until the next empty line
                    in_macro = true;
                    break;
                }
                comment if comment.starts_with('#') => break,
                word => match keyword(word) {
                    Some(kw) => {
                        if kw != "machine" && entries.is_empty() {
                            return Err((lineno, format!("'{}' outside of an entry", kw)));
                        }
                        pending = Some(kw);
                    }
                    None if starts_entry(&entries) => entries.push(Entry {
                        host: Some(word.to_string()),
                        ..Entry::default()
                    }),
                    None => return Err((lineno, format!("unexpected token '{}'", word))),
                },
            }
        }
    }

    match pending {
        Some(keyword) => Err((
            content.lines().count(),
            format!("missing value after '{}'", keyword),
        )),
        None => Ok(entries),
    }
}

fn keyword(word: &str) -> Option<&'static str> {
    ["machine", "login", "password", "account"]
        .into_iter()
        .find(|k| *k == word)
}

#[derive(Debug, PartialEq)]
struct Token {
    text: String,
    quoted: bool,
}

/// Splits one line into whitespace separated tokens. A token in double
/// quotes may contain whitespace, and a backslash escapes the next
/// character inside the quotes.
struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(line: &'a str) -> Lexer<'a> {
        Lexer {
            chars: line.chars().peekable(),
        }
    }

    fn quoted(&mut self) -> Result<Token, String> {
        let mut text = String::new();
        loop {
            match self.chars.next() {
                Some('"') => return Ok(Token { text, quoted: true }),
                Some('\\') => match self.chars.next() {
                    Some(c) => text.push(c),
                    None => break,
                },
                Some(c) => text.push(c),
                None => break,
            }
        }
        Err(format!("unterminated quoted value '{}'", text))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, String>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
        if self.chars.next_if_eq(&'"').is_some() {
            return Some(self.quoted());
        }
        let mut text = String::new();
        while let Some(c) = self.chars.next_if(|c| !c.is_whitespace()) {
            text.push(c);
        }
        if text.is_empty() {
            None
        } else {
            Some(Ok(Token {
                text,
                quoted: false,
            }))
        }
    }
}

/// A bare word starts a new entry when there is none yet, or the
/// current one already has its login and password.
fn starts_entry(entries: &[Entry]) -> bool {
    entries
        .last()
        .map_or(true, |e| e.login.is_some() && e.password.is_some())
}

fn apply(entries: &mut Vec<Entry>, keyword: &str, value: String) {
    if keyword == "machine" {
        entries.push(Entry {
            host: Some(value),
            ..Entry::default()
        });
        return;
    }
    if let Some(entry) = entries.last_mut() {
        match keyword {
            "login" => entry.login = Some(value),
            "password" => entry.password = Some(value),
            _ => {}
        }
    }
}
