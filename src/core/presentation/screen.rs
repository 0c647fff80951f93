use std::io::{self, Write};

use super::{EmptyState, PublicationAdapter};
use crate::core::feed::LoadOutcome;
use crate::core::loader::LoaderCallbacks;

/// The publication list plus whatever message shows when it is empty.
#[derive(Debug, Clone)]
pub struct NewsScreen {
    adapter: PublicationAdapter,
    empty_state: EmptyState,
}

impl Default for NewsScreen {
    fn default() -> Self {
        Self {
            adapter: PublicationAdapter::new(),
            empty_state: EmptyState::Loading,
        }
    }
}

impl NewsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adapter(&self) -> &PublicationAdapter {
        &self.adapter
    }

    pub fn empty_state(&self) -> EmptyState {
        self.empty_state
    }

    pub fn show_no_connection(&mut self) {
        self.empty_state = EmptyState::NoConnection;
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.adapter.render(out, self.empty_state)
    }
}

impl LoaderCallbacks for NewsScreen {
    fn on_load_finished(&mut self, outcome: LoadOutcome) {
        self.empty_state = EmptyState::from_outcome(&outcome);
        self.adapter.clear();
        self.adapter.add_all(outcome.into_publications());
    }

    fn on_loader_reset(&mut self) {
        self.adapter.clear();
    }
}
