//! Separates the flags `kube-exec` owns from the ones meant for
//! `kubectl exec`.
//!
//! Anything before `OBJECT` that the command line parser does not know is
//! forwarded untouched. The returned argument list for the parser always
//! places `OBJECT` and the command after a `--`, so hyphenated command
//! arguments are never mistaken for options.

use std::ffi::OsString;

use clap::{Arg, Command};

use crate::consts::kubectl;

#[derive(Debug, Default, Eq, PartialEq)]
pub struct SplitArgs {
    /// Arguments for `clap`, starting with the program name.
    pub cli_args: Vec<OsString>,
    /// Flags to forward to `kubectl exec`, in their original order.
    pub passthrough: Vec<OsString>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Token {
    Own { takes_value: bool },
    Foreign { takes_value: bool },
    Positional,
}

/// Splits raw process arguments. `command` must have been built with
/// [`Command::build`] so that `--help` and `--version` are known.
pub fn split<I>(command: &Command, args: I) -> SplitArgs
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut split =
        SplitArgs { cli_args: args.next().into_iter().collect(), ..SplitArgs::default() };

    while let Some(arg) = args.next() {
        let token = arg.to_str().map_or(Token::Positional, |text| classify(command, text));
        match token {
            Token::Own { takes_value } => {
                split.cli_args.push(arg);
                if takes_value {
                    split.cli_args.extend(args.next());
                }
            }
            Token::Foreign { takes_value } => {
                split.passthrough.push(arg);
                if takes_value {
                    split.passthrough.extend(args.next());
                }
            }
            Token::Positional => {
                let object = if arg == "--" { args.next() } else { Some(arg) };
                split.cli_args.push(OsString::from("--"));
                split.cli_args.extend(object);
                let mut rest = args.peekable();
                let _separator = rest.next_if(|arg| arg == "--");
                split.cli_args.extend(rest);
                break;
            }
        }
    }
    split
}

fn classify(command: &Command, text: &str) -> Token {
    if text == "--" {
        return Token::Positional;
    }
    if let Some(long) = text.strip_prefix("--") {
        let (name, inline_value) =
            long.split_once('=').map_or((long, false), |(name, _)| (name, true));
        return find_long(command, name).map_or_else(
            || Token::Foreign {
                takes_value: !inline_value && kubectl::VALUE_LONG_FLAGS.contains(&name),
            },
            |arg| Token::Own { takes_value: !inline_value && arg.get_action().takes_values() },
        );
    }
    if let Some(shorts) = text.strip_prefix('-')
        && let Some(first) = shorts.chars().next()
    {
        let bare = shorts.len() == first.len_utf8();
        return find_short(command, first).map_or_else(
            || Token::Foreign { takes_value: bare && kubectl::VALUE_SHORT_FLAGS.contains(&first) },
            |arg| Token::Own { takes_value: bare && arg.get_action().takes_values() },
        );
    }
    Token::Positional
}

fn find_long<'c>(command: &'c Command, name: &str) -> Option<&'c Arg> {
    command.get_arguments().find(|arg| {
        !arg.is_positional()
            && arg.get_long_and_visible_aliases().is_some_and(|longs| longs.contains(&name))
    })
}

fn find_short<'c>(command: &'c Command, short: char) -> Option<&'c Arg> {
    command.get_arguments().find(|arg| {
        !arg.is_positional()
            && arg.get_short_and_visible_aliases().is_some_and(|shorts| shorts.contains(&short))
    })
}
