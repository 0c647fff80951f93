pub mod screen;

use std::io::{self, Write};

use crate::core::feed::types::Publication;
use crate::core::feed::LoadOutcome;

/// Text shown in place of the list when there are no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    Loading,
    NoConnection,
    NoData,
    NetworkError,
    ParseError,
}

impl EmptyState {
    pub fn from_outcome(outcome: &LoadOutcome) -> Self {
        match outcome {
            LoadOutcome::Loaded(_) | LoadOutcome::NoData => EmptyState::NoData,
            LoadOutcome::NetworkFailure(_) => EmptyState::NetworkError,
            LoadOutcome::ParseFailure { .. } => EmptyState::ParseError,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::Loading => "Loading publications...",
            EmptyState::NoConnection => "No internet connection.",
            EmptyState::NoData => "No publications found.",
            EmptyState::NetworkError => "Could not reach the news service.",
            EmptyState::ParseError => "The news service sent a response that could not be read.",
        }
    }
}

/// One rendered list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationRow {
    pub title: String,
    pub section: String,
    pub date: String,
    pub author: String,
}

impl PublicationRow {
    pub fn from_publication(publication: &Publication) -> Self {
        Self {
            title: publication.title().to_string(),
            section: publication.section().to_string(),
            date: display_date(publication.date()).to_string(),
            author: publication.author().to_string(),
        }
    }
}

/// Calendar part of an ISO-8601 timestamp: everything before the `T`.
pub fn calendar_date(timestamp: &str) -> Option<&str> {
    timestamp.split_once('T').map(|(date, _)| date)
}

/// Like [`calendar_date`], falling back to the raw text when there is no `T`.
pub fn display_date(timestamp: &str) -> &str {
    match calendar_date(timestamp) {
        Some(date) => date,
        None => {
            tracing::warn!(timestamp, "publication date has no time separator");
            timestamp
        }
    }
}

/// Backing list for the rendered rows. Every change replaces what is shown.
#[derive(Debug, Clone, Default)]
pub struct PublicationAdapter {
    publications: Vec<Publication>,
}

impl PublicationAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.publications.clear();
    }

    pub fn add_all(&mut self, publications: impl IntoIterator<Item = Publication>) {
        self.publications.extend(publications);
    }

    pub fn len(&self) -> usize {
        self.publications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.publications.is_empty()
    }

    pub fn get_item(&self, position: usize) -> Option<&Publication> {
        self.publications.get(position)
    }

    pub fn publications(&self) -> &[Publication] {
        &self.publications
    }

    pub fn rows(&self) -> Vec<PublicationRow> {
        self.publications
            .iter()
            .map(PublicationRow::from_publication)
            .collect()
    }

    pub fn render<W: Write>(&self, out: &mut W, empty_state: EmptyState) -> io::Result<()> {
        if self.publications.is_empty() {
            writeln!(out, "{}", empty_state.message())?;
            return Ok(());
        }

        for (position, publication) in self.publications.iter().enumerate() {
            let row = PublicationRow::from_publication(publication);
            writeln!(out, "{:>2}. {}", position + 1, row.title)?;
            writeln!(out, "    {} | {} | {}", row.section, row.date, row.author)?;
            writeln!(out, "    {}", publication.url())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publication(title: &str, date: &str) -> Publication {
        Publication::new(
            title,
            "Editorial",
            "Opinion",
            format!("https://www.theguardian.com/{}", title.to_lowercase()),
            date,
        )
    }

    #[test]
    fn calendar_date_stops_at_time_separator() {
        assert_eq!(calendar_date("2019-07-10T14:22:00Z"), Some("2019-07-10"));
        assert_eq!(calendar_date("2019-07-10"), None);
        assert_eq!(display_date("2019-07-10T14:22:00Z"), "2019-07-10");
        assert_eq!(display_date("10 July 2019"), "10 July 2019");
    }

    #[test]
    fn rows_carry_title_section_date_and_author() {
        let mut adapter = PublicationAdapter::new();
        adapter.add_all(vec![publication("First", "2019-07-10T14:22:00Z")]);

        assert_eq!(
            adapter.rows(),
            vec![PublicationRow {
                title: "First".to_string(),
                section: "Opinion".to_string(),
                date: "2019-07-10".to_string(),
                author: "Editorial".to_string(),
            }]
        );
    }

    #[test]
    fn clear_then_add_all_replaces_rows() {
        let mut adapter = PublicationAdapter::new();
        adapter.add_all(vec![
            publication("Old one", "2019-07-01T00:00:00Z"),
            publication("Old two", "2019-07-02T00:00:00Z"),
        ]);

        adapter.clear();
        adapter.add_all(vec![publication("New", "2019-07-10T00:00:00Z")]);

        let titles: Vec<String> = adapter.rows().into_iter().map(|row| row.title).collect();
        assert_eq!(titles, vec!["New".to_string()]);
        assert_eq!(
            adapter.get_item(0).map(Publication::url),
            Some("https://www.theguardian.com/new")
        );
        assert!(adapter.get_item(1).is_none());
    }

    #[test]
    fn render_lists_rows_or_empty_message() {
        let mut adapter = PublicationAdapter::new();
        let mut out = Vec::new();
        adapter
            .render(&mut out, EmptyState::NoConnection)
            .expect("render should succeed");
        assert_eq!(String::from_utf8(out).expect("utf8"), "No internet connection.\n");

        adapter.add_all(vec![publication("Debates", "2019-07-10T14:22:00Z")]);
        let mut out = Vec::new();
        adapter
            .render(&mut out, EmptyState::NoData)
            .expect("render should succeed");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            concat!(
                " 1. Debates\n",
                "    Opinion | 2019-07-10 | Editorial\n",
                "    https://www.theguardian.com/debates\n",
            )
        );
    }
}
