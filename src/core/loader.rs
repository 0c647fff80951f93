use tokio::task::{JoinError, JoinHandle};

use super::feed::{FeedService, LoadOutcome};

/// Receiver for the result of a background load.
pub trait LoaderCallbacks {
    fn on_load_finished(&mut self, outcome: LoadOutcome);

    fn on_loader_reset(&mut self);
}

/// Runs one fetch cycle on a background task.
#[derive(Debug, Clone)]
pub struct PublicationLoader {
    service: FeedService,
    url: String,
}

#[derive(Debug)]
pub struct LoaderHandle {
    task: JoinHandle<LoadOutcome>,
}

impl PublicationLoader {
    pub fn new(service: FeedService, url: impl Into<String>) -> Self {
        Self {
            service,
            url: url.into(),
        }
    }

    pub fn start(self) -> LoaderHandle {
        let task = tokio::spawn(async move { self.service.load(&self.url).await });
        LoaderHandle { task }
    }
}

impl LoaderHandle {
    /// Waits for the load and hands the outcome to `callbacks` exactly once.
    /// Dropping the handle instead leaves the request running and discards its result.
    pub async fn deliver_to<C: LoaderCallbacks>(self, callbacks: &mut C) -> Result<(), JoinError> {
        let outcome = self.task.await?;
        callbacks.on_load_finished(outcome);
        Ok(())
    }
}
