//! The interactive menu loop.
//!
//! The shell owns the artist registry for the session. Every menu action
//! reports its own failure and returns to the menu; only I/O errors on the
//! console end the loop.
//!
//! An unreadable registry artifact is reported once at startup. The session
//! then runs on an empty registry with adding artists disabled, so the
//! artifact is left for the user to repair.

mod input;
mod menu;

use std::io::{self, Write};
use std::path::PathBuf;

use cadenza_core::derive::{DerivedMetrics, PronounBuckets};
use cadenza_core::model::{ArtistRecord, ArtistRegistry};
use cadenza_fetch::{
    CatalogService, FetchError, FetchResult, Library, LyricsService, WikiService,
};

use crate::render;
use crate::report::{self, Opponent};
use menu::{Choice, CompareWith, GOODBYE, MENU};

pub use input::{Line, LineSource, Terminal};

const NETWORK_ERROR: &str = "An error occurred. Check your internet connection.";
const UNKNOWN_ARTIST: &str = "Artist number not available. Try again.";
const NOT_ENOUGH_DATA: &str = "Not enough data to compute this comparison.";
const PROMPT: &str = "> ";
const CANCELLED: &str = "Cancelled.";
const REGISTRY_LOCKED: &str =
    "Adding artists is disabled until the artist registry file is repaired or removed.";

/// Menu loop over a line source and an output sink.
#[derive(Debug)]
pub struct Shell<'a, C, L, W, I, O> {
    library: &'a Library<C, L, W>,
    registry: ArtistRegistry,
    /// Why the saved registry could not be loaded, if it could not.
    registry_error: Option<String>,
    input: I,
    output: O,
}

impl<'a, C, L, W, I, O> Shell<'a, C, L, W, I, O>
where
    C: CatalogService,
    L: LyricsService,
    W: WikiService,
    I: LineSource,
    O: Write,
{
    /// Create a shell over `library`, loading the saved artist registry.
    ///
    /// A malformed registry does not fail here; see the module docs.
    pub fn open(library: &'a Library<C, L, W>, input: I, output: O) -> FetchResult<Self> {
        let (registry, registry_error) = match library.open_registry() {
            Ok(registry) => (registry, None),
            Err(e) if e.is_malformed() => {
                log::warn!("Artist registry is unreadable: {}", e);
                (ArtistRegistry::new(), Some(e.to_string()))
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            library,
            registry,
            registry_error,
            input,
            output,
        })
    }

    pub fn registry(&self) -> &ArtistRegistry {
        &self.registry
    }

    /// Run until `exit` or end of input.
    pub async fn run(&mut self) -> io::Result<()> {
        if let Some(reason) = self.registry_error.clone() {
            self.say(&format!("The artist registry could not be read ({reason})."))?;
            self.say(REGISTRY_LOCKED)?;
        } else if self.registry.is_empty() {
            self.say("No artists have been added yet.")?;
        }

        loop {
            self.say(MENU)?;
            let line = match self.read_line(PROMPT)? {
                Line::Text(line) => line,
                Line::Interrupted => {
                    self.say(GOODBYE)?;
                    break;
                }
                Line::Eof => break,
            };
            match Choice::parse(&line) {
                Choice::List => self.list()?,
                Choice::ReleaseHistory => self.release_history().await?,
                Choice::WikiAndLyrics => self.wiki_and_lyrics().await?,
                Choice::Compare => self.compare().await?,
                Choice::AddArtist if self.registry_error.is_some() => {
                    self.say(REGISTRY_LOCKED)?;
                }
                Choice::AddArtist => self.add_artist().await?,
                Choice::Exit => {
                    self.say(GOODBYE)?;
                    break;
                }
                Choice::Invalid => self.say("Invalid input, try again!")?,
            }
        }
        Ok(())
    }

    // -- console -------------------------------------------------------------

    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    fn say_all(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Line> {
        self.output.flush()?;
        Ok(match self.input.read_line(prompt)? {
            Line::Text(line) => Line::Text(line.trim().to_string()),
            other => other,
        })
    }

    /// Ask one question. Ctrl-C and end of input both abandon the action.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        match self.read_line(label)? {
            Line::Text(line) => Ok(Some(line)),
            Line::Interrupted => {
                self.say(CANCELLED)?;
                Ok(None)
            }
            Line::Eof => Ok(None),
        }
    }

    /// Ask for an artist number and resolve it against the registry.
    fn choose_artist(&mut self, label: &str) -> io::Result<Option<ArtistRecord>> {
        let Some(input) = self.prompt(label)? else {
            return Ok(None);
        };
        match self.registry.lookup(&input) {
            Ok(record) => Ok(Some(record.clone())),
            Err(_) => {
                self.say(UNKNOWN_ARTIST)?;
                Ok(None)
            }
        }
    }

    /// Print the one message a failed operation gets.
    fn failure(&mut self, err: &FetchError, missing: &str) -> io::Result<()> {
        log::debug!("Operation failed: {}", err);
        let message = if err.is_not_found() {
            missing.to_string()
        } else if err.is_transport() {
            NETWORK_ERROR.to_string()
        } else if err.is_degenerate() {
            NOT_ENOUGH_DATA.to_string()
        } else if let FetchError::InvalidInput(reason) = err {
            format!("Invalid input: {reason}")
        } else {
            format!("An error occurred: {err}")
        };
        self.say(&message)
    }

    fn chart_saved(&mut self, rendered: anyhow::Result<PathBuf>) -> io::Result<()> {
        match rendered {
            Ok(path) => self.say(&format!("Chart saved to {}", path.display())),
            Err(e) => {
                log::warn!("Could not render chart: {:#}", e);
                Ok(())
            }
        }
    }

    // -- menu actions --------------------------------------------------------

    fn list(&mut self) -> io::Result<()> {
        let lines = report::artist_table(&self.registry);
        self.say_all(&lines)
    }

    async fn release_history(&mut self) -> io::Result<()> {
        self.list()?;
        let Some(record) = self.choose_artist("Artist Nr: ")? else {
            return Ok(());
        };

        match self.library.release_history(&record).await {
            Ok(history) => {
                self.say_all(&report::history_lines(&record.name, &history))?;
                if !history.is_empty() {
                    let library = self.library;
                    let dir = library.store().root();
                    self.chart_saved(render::release_history_chart(&history, &record.name, dir))?;
                }
                Ok(())
            }
            Err(e) => self.failure(&e, "No release history is available for this artist."),
        }
    }

    async fn wiki_and_lyrics(&mut self) -> io::Result<()> {
        self.list()?;
        let Some(record) = self.choose_artist("Artist Nr: ")? else {
            return Ok(());
        };

        match self.library.wiki_summary(&record.name).await {
            Ok(summary) => self.say_all(&report::wiki_block(&summary))?,
            Err(e) => self.failure(&e, "Error! Artist not found on Wikipedia.")?,
        }

        self.say("Let's analyze their lyrics!")?;
        let Some(track) = self.prompt("Please input one of their songs: ")? else {
            return Ok(());
        };
        if track.is_empty() {
            return self.say("Invalid input.");
        }

        match self.library.lyrics(&record.name, &track).await {
            Ok(lyrics) => {
                let buckets = PronounBuckets::count(&lyrics);
                let [me, you, they] = buckets.as_array();
                self.say(&format!("'me': {me}, 'you': {you}, 'they': {they}"))?;
                if let Some(focus) = buckets.focus() {
                    self.say(&report::pronoun_line(focus, &track, &record.name))?;
                }
                let library = self.library;
                let dir = library.store().root();
                self.chart_saved(render::pronoun_chart(&buckets, &track, dir))
            }
            Err(e) => self.failure(&e, "This song was not found."),
        }
    }

    async fn compare(&mut self) -> io::Result<()> {
        self.say("Do you want to compare an artist with another artist or with this week's charts?")?;
        let Some(choice) = self
            .prompt("Type 'artist' to compare with artist, or 'charts' to compare with charts: ")?
        else {
            return Ok(());
        };
        match CompareWith::parse(&choice) {
            Some(CompareWith::Artist) => self.compare_artists().await,
            Some(CompareWith::Charts) => self.compare_to_charts().await,
            None => self.say("Invalid input."),
        }
    }

    async fn compare_artists(&mut self) -> io::Result<()> {
        self.list()?;
        let (Some(first), Some(second)) =
            (self.prompt("Artist Nr 1: ")?, self.prompt("Artist Nr 2: ")?)
        else {
            return Ok(());
        };

        let (Ok(a), Ok(b)) = (self.registry.lookup(&first), self.registry.lookup(&second)) else {
            return self.say("At least one of the artist numbers does not exist. Try again.");
        };
        let (a, b) = (a.clone(), b.clone());
        if a.number == b.number {
            return self.say("Choose two different artists.");
        }

        match self.artist_pair(&a, &b).await {
            Ok((ma, mb)) => self.say_all(&report::comparison(&ma, &mb, Opponent::Artist)),
            Err(e) => self.failure(&e, "Wikipedia page not found for one of the artists."),
        }
    }

    async fn compare_to_charts(&mut self) -> io::Result<()> {
        self.list()?;
        let Some(record) = self.choose_artist("Artist Nr: ")? else {
            return Ok(());
        };

        match self.artist_and_charts(&record).await {
            Ok((artist, charts)) => {
                self.say_all(&report::comparison(&artist, &charts, Opponent::Charts))
            }
            Err(e) => self.failure(&e, "Wikipedia page not found for this artist."),
        }
    }

    async fn artist_pair(
        &self,
        a: &ArtistRecord,
        b: &ArtistRecord,
    ) -> FetchResult<(DerivedMetrics, DerivedMetrics)> {
        let first = self.library.artist_metrics(a).await?;
        let second = self.library.artist_metrics(b).await?;
        Ok((first, second))
    }

    async fn artist_and_charts(
        &self,
        record: &ArtistRecord,
    ) -> FetchResult<(DerivedMetrics, DerivedMetrics)> {
        let artist = self.library.artist_metrics(record).await?;
        let charts = self.library.chart_metrics().await?;
        Ok((artist, charts))
    }

    async fn add_artist(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Name of artist you want to add: ")? else {
            return Ok(());
        };

        let wait = self.library.cooldown().interval();
        if !wait.is_zero() {
            self.say(&format!(
                "Wait {} seconds - due to limited requests to the catalog API",
                wait.as_secs()
            ))?;
        }

        match self.library.add_artist(&mut self.registry, &name).await {
            Ok(record) => self.say(&format!(
                "Added {} as artist number {}.",
                record.name, record.number
            )),
            Err(e) => self.failure(&e, "No artist with that name was found."),
        }
    }
}
