use std::io::{self, Write};

use super::{AnalysisReport, DisposalRecord};

/* Where the results of a run go. Disposals are pushed one by one while the run progresses,
`finish` is only called when every trade went through. */
pub trait Reporter {
    fn report_disposal(&mut self, record: &DisposalRecord) -> io::Result<()>;

    fn finish(&mut self, report: &AnalysisReport) -> io::Result<()>;
}

pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        TextReporter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report_disposal(&mut self, record: &DisposalRecord) -> io::Result<()> {
        writeln!(
            self.out,
            "Sold currency {} with profit {} at {}",
            record.currency, record.profit, record.timestamp
        )?;
        for slice in &record.consumed {
            writeln!(
                self.out,
                "{} for {}, bought on {}",
                slice.amount, slice.lot_price, slice.lot_timestamp
            )?;
        }
        self.out.flush()
    }

    fn finish(&mut self, report: &AnalysisReport) -> io::Result<()> {
        for holding in &report.holdings {
            writeln!(
                self.out,
                "{}: realized {}, holding {} in {} lots",
                holding.currency, holding.realized_profit, holding.remaining, holding.open_lots
            )?;
        }
        self.out.flush()
    }
}

/* Structured output: nothing while running, the full report as json at the end */
pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        JsonReporter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report_disposal(&mut self, _record: &DisposalRecord) -> io::Result<()> {
        Ok(())
    }

    fn finish(&mut self, report: &AnalysisReport) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, report)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
