use std::sync::{mpsc, Arc};
use std::thread;

use session_logging::session_debug;
use tokio_util::sync::CancellationToken;
use vacancy_core::{FetchTicket, FilterSnapshot};

use crate::{CatalogApi, CatalogEvent};

enum CatalogCommand {
    FetchPage {
        ticket: FetchTicket,
        query: String,
        filters: FilterSnapshot,
    },
    FetchDetail {
        id: String,
    },
    FetchIndustries,
}

/// Bridge between the session's single consumer thread and the async
/// catalog client. Commands cross a channel into a dedicated runtime
/// thread; each resolves to one `CatalogEvent` on the event channel.
///
/// Dropping the handle cancels in-flight fetches; whatever still resolves
/// afterwards is discarded, never acted upon.
pub struct CatalogHandle {
    cmd_tx: mpsc::Sender<CatalogCommand>,
    event_rx: mpsc::Receiver<CatalogEvent>,
    cancel: CancellationToken,
}

impl CatalogHandle {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                let token = token.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => {}
                        event = run_command(api.as_ref(), command) => {
                            if event_tx.send(event).is_err() {
                                session_debug!("catalog event dropped after session teardown");
                            }
                        }
                    }
                });
            }
        });

        Self {
            cmd_tx,
            event_rx,
            cancel,
        }
    }

    pub fn fetch_page(
        &self,
        ticket: FetchTicket,
        query: impl Into<String>,
        filters: FilterSnapshot,
    ) {
        session_debug!("fetch_page epoch={} page={}", ticket.epoch, ticket.page);
        let _ = self.cmd_tx.send(CatalogCommand::FetchPage {
            ticket,
            query: query.into(),
            filters,
        });
    }

    pub fn fetch_detail(&self, id: impl Into<String>) {
        let _ = self
            .cmd_tx
            .send(CatalogCommand::FetchDetail { id: id.into() });
    }

    pub fn fetch_industries(&self) {
        let _ = self.cmd_tx.send(CatalogCommand::FetchIndustries);
    }

    pub fn try_recv(&self) -> Option<CatalogEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl Drop for CatalogHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_command(api: &dyn CatalogApi, command: CatalogCommand) -> CatalogEvent {
    match command {
        CatalogCommand::FetchPage {
            ticket,
            query,
            filters,
        } => {
            let result = api.fetch_page(&query, ticket.page, &filters).await;
            CatalogEvent::PageFetched { ticket, result }
        }
        CatalogCommand::FetchDetail { id } => {
            let result = api.fetch_detail(&id).await;
            CatalogEvent::DetailFetched { id, result }
        }
        CatalogCommand::FetchIndustries => CatalogEvent::IndustriesFetched {
            result: api.fetch_industries().await,
        },
    }
}
