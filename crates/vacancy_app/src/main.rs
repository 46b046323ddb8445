use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use vacancy_app::platform::logging::{self, LogDestination};
use vacancy_app::platform::{Debouncer, EffectRunner, SessionHost};
use vacancy_core::{
    filter_industries, format_salary, AppViewModel, DetailState, Msg, SearchState, VacancyPreview,
};
use vacancy_engine::{CatalogHandle, CatalogSettings, HttpCatalog};

/// Trailing-edge delay between the last keystroke and the search request.
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(2000);
/// Window during which repeated open commands are swallowed.
const CLICK_DEBOUNCE: Duration = Duration::from_millis(1000);
const POLL_INTERVAL: Duration = Duration::from_millis(20);

fn main() {
    logging::initialize(LogDestination::File);

    let catalog = match HttpCatalog::new(CatalogSettings::default()) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("Could not construct the catalog client: {err}");
            return;
        }
    };
    let state_dir = std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("state");

    let handle = CatalogHandle::new(Arc::new(catalog));
    let runner = EffectRunner::new(handle, state_dir.clone());
    let mut host = SessionHost::new(runner, &state_dir);
    host.subscribe(render);

    // Blocking stdin reads happen off the consumer thread.
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    println!("Vacancy search. Type a query; a blank line clears the results.");
    println!(
        "Commands: :more  :open <n>  :close  :fav  :favorites  :industries [text]  :filters  :quit"
    );

    let mut shell = Shell {
        host,
        debouncer: Debouncer::new(),
        last_query: String::new(),
        last_detail: None,
    };

    loop {
        shell.host.pump();
        shell.print_detail_transition();
        match line_rx.try_recv() {
            Ok(line) => {
                if !shell.handle_line(line.trim()) {
                    break;
                }
            }
            Err(mpsc::TryRecvError::Empty) => thread::sleep(POLL_INTERVAL),
            Err(mpsc::TryRecvError::Disconnected) => break,
        }
    }
}

struct Shell {
    host: SessionHost,
    debouncer: Debouncer,
    last_query: String,
    last_detail: Option<DetailState>,
}

impl Shell {
    fn handle_line(&mut self, line: &str) -> bool {
        if let Some(command) = line.strip_prefix(':') {
            return self.handle_command(command);
        }

        self.last_query = line.to_string();
        if line.is_empty() {
            self.host.dispatch(Msg::SearchCleared);
        } else {
            let query = line.to_string();
            let tx = self.host.sender();
            self.debouncer.schedule(SEARCH_DEBOUNCE, move || {
                let _ = tx.send(Msg::SearchRequested { query });
            });
        }
        true
    }

    fn handle_command(&mut self, command: &str) -> bool {
        let mut words = command.split_whitespace();
        match words.next() {
            Some("quit") | Some("q") => return false,
            Some("more") => self.host.dispatch(Msg::LoadNextPage),
            Some("open") => self.open_vacancy(words.next()),
            Some("close") => {
                self.host.close_detail();
                self.last_detail = None;
            }
            Some("fav") => self.toggle_favorite(),
            Some("favorites") => self.list_favorites(),
            Some("industries") => self.list_industries(&words.collect::<Vec<_>>().join(" ")),
            Some("filters") => self.handle_filters(&words.collect::<Vec<_>>()),
            _ => println!("Unknown command: :{command}"),
        }
        true
    }

    fn open_vacancy(&mut self, index: Option<&str>) {
        if !self.debouncer.allow_repeat(CLICK_DEBOUNCE) {
            return;
        }
        let Some(index) = index.and_then(|raw| raw.parse::<usize>().ok()) else {
            println!("Usage: :open <result number>");
            return;
        };
        let view = self.host.view();
        match visible_items(&view.search).and_then(|items| items.get(index.wrapping_sub(1))) {
            Some(item) => {
                println!("Loading vacancy {}...", item.id);
                self.last_detail = Some(DetailState::Loading);
                let id = item.id.clone();
                self.host.open_detail(&id);
            }
            None => println!("No result #{index} on screen."),
        }
    }

    fn toggle_favorite(&mut self) {
        self.host.toggle_favorite();
        match self.host.detail() {
            Some(DetailState::Content { is_favorite, .. }) => {
                if *is_favorite {
                    println!("Added to favorites.");
                } else {
                    println!("Removed from favorites.");
                }
                self.last_detail = self.host.detail().cloned();
            }
            _ => println!("Open a vacancy first with :open <n>."),
        }
    }

    fn list_favorites(&self) {
        let favorites = self.host.favorites();
        if favorites.is_empty() {
            println!("No favorites yet.");
            return;
        }
        for detail in favorites {
            println!(
                "  {} - {} ({})",
                detail.name,
                detail.employer_name,
                format_salary(
                    detail.salary_from,
                    detail.salary_to,
                    detail.currency.as_deref()
                )
            );
        }
    }

    fn list_industries(&mut self, needle: &str) {
        if self.host.industries().is_empty() {
            println!("Fetching the industry dictionary; try again in a moment.");
            self.host.request_industries();
            return;
        }
        let hits = filter_industries(self.host.industries(), needle);
        for industry in hits.iter().take(20) {
            println!("  {:>8}  {}", industry.id, industry.name);
        }
        if hits.len() > 20 {
            println!("  ... {} more; narrow the text", hits.len() - 20);
        }
    }

    fn handle_filters(&mut self, args: &[&str]) {
        match args {
            [] => {
                let view = self.host.view();
                println!("Filters: {:?} (active: {})", view.filters, view.has_active_filters);
                return;
            }
            ["clear"] => self.host.dispatch(Msg::FiltersCleared),
            ["salary", "-"] => self.host.dispatch(Msg::SalaryChanged(None)),
            ["salary", text] => {
                self.host
                    .dispatch(Msg::SalaryChanged(Some((*text).to_string())));
            }
            ["only", flag] => {
                self.host
                    .dispatch(Msg::OnlyWithSalaryToggled(*flag == "on"));
            }
            ["industry", "-"] => self.host.dispatch(Msg::IndustryPicked(None)),
            ["industry", id, name @ ..] => {
                self.host.dispatch(Msg::IndustryPicked(Some(
                    vacancy_core::Industry {
                        id: (*id).to_string(),
                        name: name.join(" "),
                    },
                )));
            }
            _ => {
                println!("Usage: :filters [clear | salary <text|-> | only <on|off> | industry <id> <name>| industry -]");
                return;
            }
        }
        // Applying filters re-runs the current query right away.
        if !self.last_query.is_empty() {
            self.host.dispatch(Msg::SearchRequested {
                query: self.last_query.clone(),
            });
        }
    }

    /// Prints the detail view once its fetch settles.
    fn print_detail_transition(&mut self) {
        let current = self.host.detail().cloned();
        if current == self.last_detail {
            return;
        }
        match &current {
            Some(DetailState::Content {
                vacancy,
                is_favorite,
            }) => {
                let marker = if *is_favorite { " [favorite]" } else { "" };
                println!("== {} - {}{}", vacancy.name, vacancy.employer_name, marker);
                println!(
                    "   {}",
                    format_salary(
                        vacancy.salary_from,
                        vacancy.salary_to,
                        vacancy.currency.as_deref()
                    )
                );
                if let Some(area) = &vacancy.area {
                    println!("   {area}");
                }
                if !vacancy.key_skills.is_empty() {
                    println!("   Skills: {}", vacancy.key_skills.join(", "));
                }
            }
            Some(DetailState::Error) => println!("Could not load the vacancy."),
            Some(DetailState::Loading) | None => {}
        }
        self.last_detail = current;
    }
}

fn visible_items(state: &SearchState) -> Option<&[VacancyPreview]> {
    match state {
        SearchState::Content { items, .. }
        | SearchState::LoadingMore { items }
        | SearchState::ContentWithLoadingError { items } => Some(items),
        _ => None,
    }
}

fn render(view: &AppViewModel) {
    match &view.search {
        SearchState::Empty => println!("-- type a query to search --"),
        SearchState::Loading => println!("Searching..."),
        SearchState::Content { items, found } => {
            println!("Found {found} vacancies:");
            for (index, item) in items.iter().enumerate() {
                println!(
                    "{:>3}. {} - {} ({})",
                    index + 1,
                    item.name,
                    item.employer_name,
                    format_salary(item.salary_from, item.salary_to, item.currency.as_deref())
                );
            }
        }
        SearchState::LoadingMore { items } => {
            println!("Loading more after {} items...", items.len());
        }
        SearchState::ContentWithLoadingError { items } => {
            println!(
                "Could not load the next page; still showing {} items. :more retries.",
                items.len()
            );
        }
        SearchState::NotFound => println!("Nothing found for this query."),
        SearchState::Error => println!("Something went wrong; try again."),
        SearchState::NoInternet => println!("No internet connection."),
    }
    if view.has_active_filters {
        println!("    [filters active]");
    }
}
