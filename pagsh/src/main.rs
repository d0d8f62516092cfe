mod commands;
mod highlight;
mod palette;

use std::{env, io::Write, path::PathBuf, process, time::Instant};

use commands::Command;
use highlight::CommandHighlighter;
use pagina::{
    CsvFile, Paginator, Row,
    config::{self, Config},
    log,
};
use palette::{BOLD, OVERLAY, RED, RESET};
use rustyline::{Editor, error::ReadlineError, history::DefaultHistory};

const PROMPT: &str = "pagsh > ";
const HISTORY: &str = "history.pagsh";

struct Session {
    paginator: Paginator<CsvFile>,
    page_size: usize,
    next_index: Option<usize>,
}

fn main() -> rustyline::Result<()> {
    let config = match configure() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    if let Err(err) = log::init(config.log_level, &config.log_file) {
        eprintln!("Couldn't open log file {}: {err}", config.log_file.display());
    }

    let mut session = Session {
        paginator: Paginator::new(config.csv_source()),
        page_size: config.page_size,
        next_index: Some(0),
    };

    match session.paginator.dataset() {
        Ok(rows) => println!(
            "Loaded {} rows from {}",
            rows.len(),
            config.source.display()
        ),
        Err(err) => {
            eprintln!("{RED}{err}{RESET}");
            process::exit(1);
        }
    }

    let mut rsl: Editor<CommandHighlighter, DefaultHistory> = Editor::new()?;
    rsl.set_helper(Some(CommandHighlighter));
    if rsl.load_history(HISTORY).is_err() {
        println!("No previous history")
    };

    println!("pagsh | press enter for the next page, /help for guidance.");

    loop {
        let line = match rsl.readline(PROMPT) {
            Ok(line) => line,
            Err(err) => {
                match err {
                    ReadlineError::Interrupted => println!("CTRL-C"),
                    ReadlineError::Eof => println!("CTRL-D"),
                    other => println!("Error: {other:#?}"),
                }

                break;
            }
        };

        if !line.trim().is_empty() {
            rsl.add_history_entry(line.trim())?;
        }

        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => session.run(command),
            Err(err) => println!("{err}"),
        }
    }

    rsl.save_history(HISTORY)?;
    Ok(())
}

/// Environment first, then `pagsh <file.csv> [page_size]`.
fn configure() -> Result<Config, config::ConfigError> {
    let mut config = Config::from_env()?;

    if let Some(source) = env::args().nth(1) {
        config.source = PathBuf::from(source);
    }

    if let Some(page_size) = env::args().nth(2) {
        config.page_size = config::parse_page_size("page_size", &page_size)?;
    }

    Ok(config)
}

impl Session {
    fn run(&mut self, command: Command) {
        let start = Instant::now();

        let result = match command {
            Command::Next => match self.next_index {
                Some(index) => self.index(index, self.page_size),
                None => {
                    println!("{OVERLAY}End of data. Use /i 0 to start over.{RESET}");
                    return;
                }
            },
            Command::Index(index, size) => self.index(index, size.unwrap_or(self.page_size)),
            Command::Page(page, size) => self
                .paginator
                .page(page, size.unwrap_or(self.page_size))
                .map(|rows| println!("{}", table(&rows))),
            Command::Hyper(page, size) => self
                .paginator
                .hyper(page, size.unwrap_or(self.page_size))
                .map(|hyper| {
                    println!("{}", table(&hyper.data));
                    println!(
                        "page {} of {} | prev: {} | next: {}",
                        hyper.page,
                        hyper.total_pages,
                        link(hyper.prev_page),
                        link(hyper.next_page)
                    );
                }),
            Command::Delete(position) => self.paginator.delete(position).map(|row| match row {
                Some(row) => println!("Deleted {position}: {}", row.join(", ")),
                None => println!("Nothing at position {position}"),
            }),
            Command::Clear => {
                print!("\x1b[2J\x1b[1;1H");
                std::io::stdout().flush().ok();
                return;
            }
            Command::Help => {
                commands::help();
                return;
            }
            Command::Quit => return,
        };

        match result {
            Ok(()) => println!("{OVERLAY}({:.2?}){RESET}", start.elapsed()),
            Err(err) => println!("{RED}{err}{RESET}"),
        }
    }

    fn index(&mut self, index: usize, page_size: usize) -> pagina::Result<()> {
        let page = self.paginator.get_page(index, page_size)?;
        self.next_index = page.next_index;

        println!("{}", table(&page.data));
        println!(
            "{BOLD}{}{RESET} rows from index {} | next index: {}",
            page.page_size,
            page.index,
            link(page.next_index)
        );

        Ok(())
    }
}

fn link(target: Option<usize>) -> String {
    target.map_or_else(|| "none".to_string(), |target| target.to_string())
}

fn table(rows: &[Row]) -> String {
    if rows.is_empty() {
        return String::from("(no rows)");
    }

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut width = vec![0; columns];

    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|col| col.replace('\n', "\\n")).collect())
        .collect();

    rows.iter().for_each(|row| {
        row.iter().enumerate().for_each(|(idx, col)| {
            if col.chars().count() > width[idx] {
                width[idx] = col.chars().count();
            }
        })
    });

    width.iter_mut().for_each(|w| *w += 2);

    let mut border = String::from('+');
    width.iter().for_each(|w| {
        (0..*w).for_each(|_| border.push('-'));
        border.push('+');
    });

    let draw_row = |row: &Vec<String>| -> String {
        let mut row_string = String::from('|');

        (0..columns).for_each(|idx| {
            let col = row.get(idx).map(String::as_str).unwrap_or("");
            row_string.push(' ');
            row_string.push_str(col);
            (0..width[idx] - col.chars().count() - 1).for_each(|_| row_string.push(' '));
            row_string.push('|');
        });

        row_string
    };

    let mut table = String::from(&border);
    table.push('\n');

    rows.iter().for_each(|row| {
        table.push_str(&draw_row(row));
        table.push('\n');
    });

    table.push_str(&border);
    table
}
