use rustyline::{Completer, Helper, Hinter, Validator, highlight::Highlighter};
use std::borrow::Cow;

use crate::palette::{MAUVE, RESET, YELLOW};

#[derive(Completer, Helper, Hinter, Validator)]
pub(crate) struct CommandHighlighter;

impl Highlighter for CommandHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if !line.starts_with('/') {
            return Cow::Borrowed(line);
        }

        let mut result = String::with_capacity(line.len());
        let mut words = line.split(' ');

        if let Some(command) = words.next() {
            result.push_str(MAUVE);
            result.push_str(command);
            result.push_str(RESET);
        }

        for word in words {
            result.push(' ');
            match word.parse::<usize>() {
                Ok(_) => {
                    result.push_str(YELLOW);
                    result.push_str(word);
                    result.push_str(RESET);
                }
                Err(_) => result.push_str(word),
            }
        }

        Cow::Owned(result)
    }

    fn highlight_char(
        &self,
        _line: &str,
        _pos: usize,
        _kind: rustyline::highlight::CmdKind,
    ) -> bool {
        true
    }
}
