use crate::palette::{GREEN, RESET};

#[derive(Debug, PartialEq)]
pub(crate) enum Command {
    /// Continue from the last `next_index`.
    Next,
    Index(usize, Option<usize>),
    Page(usize, Option<usize>),
    Hyper(usize, Option<usize>),
    Delete(usize),
    Clear,
    Help,
    Quit,
}

fn number(arg: &str) -> Result<usize, String> {
    arg.parse()
        .map_err(|_| format!("Expected a non-negative number, found '{arg}'"))
}

fn size(arg: Option<&&str>) -> Result<Option<usize>, String> {
    arg.map(|arg| number(arg)).transpose()
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let parts = line.split_whitespace().collect::<Vec<_>>();

        let command = match parts.as_slice() {
            [] | ["/n"] | ["/next"] => Command::Next,
            ["/q"] | ["/quit"] => Command::Quit,
            ["/h"] | ["/help"] | ["/?"] => Command::Help,
            ["/clear"] | ["/c"] => Command::Clear,
            ["/i" | "/index", index, rest @ ..] if rest.len() <= 1 => {
                Command::Index(number(index)?, size(rest.first())?)
            }
            ["/p" | "/page", page, rest @ ..] if rest.len() <= 1 => {
                Command::Page(number(page)?, size(rest.first())?)
            }
            ["/h" | "/hy" | "/hyper", page, rest @ ..] if rest.len() <= 1 => {
                Command::Hyper(number(page)?, size(rest.first())?)
            }
            ["/rm" | "/delete", position] => Command::Delete(number(position)?),
            _ => return Err(format!("Unknown command: {line}")),
        };

        Ok(command)
    }
}

pub(crate) fn help() {
    println!("Available commands:");
    println!("  {GREEN}<enter>, /n{RESET}            Next page");
    println!("  {GREEN}/i <index> [size]{RESET}      Page starting at a stable position");
    println!("  {GREEN}/p <page> [size]{RESET}       Plain offset page (1-indexed)");
    println!("  {GREEN}/h <page> [size]{RESET}       Offset page with links to its neighbours");
    println!("  {GREEN}/rm <position>{RESET}         Delete the row at a position");
    println!("  {GREEN}/c, /clear{RESET}             Clear the terminal screen");
    println!("  {GREEN}/h, /help{RESET}              Show this help message");
    println!("  {GREEN}/q, /quit{RESET}              Exit pagsh");
}
