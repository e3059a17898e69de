use metrics::counter;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::batch::StatementWriter;
use crate::config::ConverterConfig;
use crate::error::{ConvertError, Result};
use crate::normalize::{Verdict, WordFilter};

/// Result of a complete conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Data records read, header excluded
    pub records_read: usize,
    pub malformed: usize,
    pub wrong_pos: usize,
    pub empty: usize,
    pub too_long: usize,
    pub duplicates: usize,
    /// Unique words written to the seed file
    pub accepted: usize,
    pub statements_written: usize,
    pub output_file: String,
}

impl RunReport {
    pub fn skipped(&self) -> usize {
        self.malformed + self.wrong_pos + self.empty + self.too_long + self.duplicates
    }

    fn record_skip(&mut self, verdict: &Verdict) {
        match verdict {
            Verdict::Accepted(_) => {}
            Verdict::Malformed => self.malformed += 1,
            Verdict::WrongPartOfSpeech => self.wrong_pos += 1,
            Verdict::Empty => self.empty += 1,
            Verdict::TooLong => self.too_long += 1,
            Verdict::Duplicate => self.duplicates += 1,
        }
    }
}

pub struct Pipeline;

impl Pipeline {
    /// CSV settings for the dictionary dump: first row is a header, rows may
    /// carry any number of fields.
    pub fn reader_builder() -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder.has_headers(true).flexible(true);
        builder
    }

    /// Convert the configured input file into the configured seed file.
    ///
    /// The input is opened before the output is created, so a missing source
    /// leaves no output file behind.
    #[instrument(skip(config), fields(input = %config.input_path.display(), output = %config.output_path.display()))]
    pub fn run(config: &ConverterConfig) -> Result<RunReport> {
        config.validate()?;

        let source = Self::open_source(&config.input_path)?;
        let reader = Self::reader_builder().from_reader(source);

        if let Some(parent) = config.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let output = BufWriter::new(File::create(&config.output_path)?);

        let mut report = Self::convert(reader, output, config)?;
        report.output_file = config.output_path.display().to_string();
        Ok(report)
    }

    /// Open the input, rejecting anything that is not a regular readable file.
    fn open_source(path: &Path) -> Result<File> {
        let not_found = || ConvertError::SourceNotFound {
            path: path.display().to_string(),
        };
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => not_found(),
            _ => ConvertError::Io(e),
        })?;
        // Directories open fine on Unix and only fail on the first read
        if !file.metadata()?.is_file() {
            return Err(not_found());
        }
        Ok(file)
    }

    /// Stream every record from `reader` through the word filter and write the
    /// table definition plus batched inserts to `out`.
    pub fn convert<R: Read, W: Write>(
        mut reader: csv::Reader<R>,
        out: W,
        config: &ConverterConfig,
    ) -> Result<RunReport> {
        config.validate()?;

        let mut filter = WordFilter::new(config.target_pos(), config.max_word_length);
        let mut writer = StatementWriter::new(
            out,
            &config.table_name,
            &config.column_name,
            config.batch_size,
        );
        let mut report = RunReport::default();

        writer.write_create_table(config.max_word_length)?;

        for result in reader.records() {
            let record = result?;
            report.records_read += 1;
            counter!("seeder_records_total").increment(1);

            match filter.evaluate(&record) {
                Verdict::Accepted(word) => {
                    writer.push(&word)?;
                    report.accepted += 1;
                    counter!("seeder_words_accepted_total").increment(1);
                    if config.progress_interval > 0
                        && report.accepted % config.progress_interval == 0
                    {
                        info!("Collected {} unique words so far", report.accepted);
                    }
                }
                other => {
                    debug!(
                        line = ?record.position().map(|p| p.line()),
                        reason = other.reason(),
                        "Skipping record"
                    );
                    counter!("seeder_records_skipped_total", "reason" => other.reason())
                        .increment(1);
                    report.record_skip(&other);
                }
            }
        }

        writer.flush_pending()?;
        report.statements_written = writer.statements_written();
        writer.finish()?;

        info!(
            "✅ Converted {} records: {} unique words, {} skipped, {} insert statements",
            report.records_read,
            filter.unique_count(),
            report.skipped(),
            report.statements_written
        );
        Ok(report)
    }
}
