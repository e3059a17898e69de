use metrics::counter;
use std::io::Write;
use tracing::debug;

use crate::error::Result;
use crate::sql;

/// Accumulates value tuples and writes them out as multi-row inserts.
///
/// A statement is written as soon as the batch holds `batch_size` tuples;
/// [`StatementWriter::finish`] writes the final partial batch.
pub struct StatementWriter<W: Write> {
    out: W,
    table: String,
    column: String,
    batch_size: usize,
    batch: Vec<String>,
    statements_written: usize,
}

impl<W: Write> StatementWriter<W> {
    pub fn new(out: W, table: &str, column: &str, batch_size: usize) -> Self {
        Self {
            out,
            table: table.to_string(),
            column: column.to_string(),
            batch_size,
            batch: Vec::with_capacity(batch_size),
            statements_written: 0,
        }
    }

    pub fn write_create_table(&mut self, max_word_length: usize) -> Result<()> {
        let stmt = sql::create_table_statement(&self.table, &self.column, max_word_length);
        self.out.write_all(stmt.as_bytes())?;
        Ok(())
    }

    /// Queue one word; flushes the batch when it becomes full.
    pub fn push(&mut self, word: &str) -> Result<()> {
        self.batch.push(sql::value_tuple(word));
        if self.batch.len() >= self.batch_size {
            self.flush_pending()?;
        }
        Ok(())
    }

    /// Write the current batch as one statement, if it holds anything.
    pub fn flush_pending(&mut self) -> Result<()> {
        if self.batch.is_empty() {
            return Ok(());
        }
        let stmt = sql::insert_ignore_statement(&self.table, &self.column, &self.batch);
        self.out.write_all(stmt.as_bytes())?;
        self.statements_written += 1;
        counter!("seeder_statements_written_total").increment(1);
        debug!(rows = self.batch.len(), "Wrote insert statement");
        self.batch.clear();
        Ok(())
    }

    pub fn statements_written(&self) -> usize {
        self.statements_written
    }

    /// Write any remaining tuples, flush the destination and hand it back.
    pub fn finish(mut self) -> Result<W> {
        self.flush_pending()?;
        self.out.flush()?;
        Ok(self.out)
    }
}
