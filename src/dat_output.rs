//! gnuplot DAT output
//!
//! A `#` comment header naming the columns, then one line of comma-separated
//! integers per row. No footer.

use std::io::Write;

use crate::error::Result;

/// A fixed-arity row of integer columns
pub trait DatRow {
    /// Header comment describing the columns, including the leading `#`
    const HEADER: &'static str;

    /// Column values in output order
    fn fields(&self) -> Vec<i64>;
}

/// Streaming DAT writer
#[derive(Debug)]
pub struct DatOutput<W: Write> {
    writer: W,
    rows_written: usize,
}

impl<W: Write> DatOutput<W> {
    /// Create a new DAT writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rows_written: 0,
        }
    }

    /// Write the header line
    pub fn write_header(&mut self, header: &str) -> Result<()> {
        writeln!(self.writer, "{}", header)?;
        Ok(())
    }

    /// Write a single row
    pub fn write_row<R: DatRow>(&mut self, row: &R) -> Result<()> {
        writeln!(self.writer, "{}", format_row(row))?;
        self.rows_written += 1;
        Ok(())
    }

    /// Write the row type's header followed by every row, in order
    ///
    /// Rows are written as the iterator yields them.
    pub fn write_all<R, I>(&mut self, rows: I) -> Result<()>
    where
        R: DatRow,
        I: IntoIterator<Item = R>,
    {
        self.write_header(R::HEADER)?;
        for row in rows {
            self.write_row(&row)?;
        }
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Format a row as comma-separated integers
pub fn format_row<R: DatRow>(row: &R) -> String {
    row.fields()
        .iter()
        .map(|field| field.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PairRow(i64, i64);

    impl DatRow for PairRow {
        const HEADER: &'static str = "# left, right";

        fn fields(&self) -> Vec<i64> {
            vec![self.0, self.1]
        }
    }

    #[test]
    fn test_format_row_joins_with_commas() {
        assert_eq!(format_row(&PairRow(100, 3)), "100,3");
        assert_eq!(format_row(&PairRow(-1, 0)), "-1,0");
    }

    #[test]
    fn test_write_all_header_then_rows() {
        let mut output = DatOutput::new(Vec::new());
        output
            .write_all([PairRow(0, 1), PairRow(100, 2)])
            .unwrap();
        assert_eq!(output.rows_written(), 2);

        let bytes = output.finish().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "# left, right\n0,1\n100,2\n");
    }

    #[test]
    fn test_header_only_when_no_rows() {
        let mut output = DatOutput::new(Vec::new());
        output.write_all(std::iter::empty::<PairRow>()).unwrap();
        let bytes = output.finish().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "# left, right\n");
    }
}
