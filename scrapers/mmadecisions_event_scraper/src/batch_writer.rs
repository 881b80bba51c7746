use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    fmt, io,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::{
    event_scraper::EventScraper,
    fetcher::HtmlFetcher,
    types::{EventRecord, YearRange},
};

pub const CSV_HEADER: [&str; 3] = ["year", "title", "url"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub title_prefix: String,
    pub years: YearRange,
    pub output: PathBuf,
    pub events_per_year: Vec<(i32, usize)>,
}

impl RunSummary {
    pub fn events_written(&self) -> usize {
        self.events_per_year.iter().map(|(_, count)| count).sum()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Saved {} event URLs for years {} to {}",
            self.title_prefix,
            self.years,
            self.output.display()
        )
    }
}

/// CSV sink for event rows. The header is written on construction, so it is
/// present even when no year yields an event.
pub struct EventCsvWriter<W: io::Write> {
    writer: csv::Writer<W>,
}

impl<W: io::Write> EventCsvWriter<W> {
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b',')
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(inner);
        writer.write_record(CSV_HEADER)?;
        Ok(Self { writer })
    }

    pub fn write_event(&mut self, event: &EventRecord) -> Result<()> {
        self.writer.serialize(event)?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))
    }
}

/// Walks `years` newest first, writing every extracted event to `sink`.
/// Returns the sink and the number of rows written per year.
pub fn write_events<F, W>(
    scraper: &EventScraper<F>,
    years: &YearRange,
    sink: W,
) -> Result<(W, Vec<(i32, usize)>)>
where
    F: HtmlFetcher,
    W: io::Write,
{
    years.validate()?;
    let mut writer = EventCsvWriter::new(sink)?;
    let mut events_per_year = Vec::with_capacity(years.len());

    let pb = ProgressBar::new(years.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} years {msg}")?,
    );

    for year in years.years() {
        pb.set_message(year.to_string());
        let events = scraper
            .extract(year)
            .with_context(|| format!("Failed to extract events for {}", year))?;
        for event in &events {
            writer.write_event(event)?;
        }
        events_per_year.push((year, events.len()));
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok((writer.into_inner()?, events_per_year))
}

/// Scrapes every year in `years` into a freshly truncated CSV at `output` and
/// prints a confirmation line.
pub fn run<F: HtmlFetcher>(
    scraper: &EventScraper<F>,
    years: &YearRange,
    output: &Path,
) -> Result<RunSummary> {
    info!("Writing events for {} to {:?}", years, output);
    let file = std::fs::File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let (file, events_per_year) = write_events(scraper, years, io::BufWriter::new(file))?;
    file.into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush {}: {}", output.display(), e.error()))?
        .sync_all()?;

    let summary = RunSummary {
        title_prefix: scraper.title_prefix().to_string(),
        years: *years,
        output: output.to_path_buf(),
        events_per_year,
    };
    println!("{}", summary);
    Ok(summary)
}
