//! Create and manipulate the [Table].


use crate::utils;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use itertools::Itertools;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// A row-based table of string cells read from a delimited text file.
///
/// # Examples
///
/// ```
/// use combgc::Table;
///
/// let mut table = Table::new();
/// table.headers = vec!["1".to_string(), "2".to_string(), "3".to_string()];
/// table.add_row(vec!["A".into(), "B".into(), "C".into()]).unwrap();
///
/// println!("{}", table.to_markdown());
/// ```
///
/// | 1 | 2 | 3 |
/// |---|---|---|
/// | A | B | C |
///
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Table {
    /// Names of the table columns.
    pub headers: Vec<String>,
    /// Rows of table values.
    pub rows: Vec<Vec<String>>,
    /// Optional file path for where the table was read from.
    pub path: Option<PathBuf>,
}

impl Table {
    /// Create a new table with empty headers and rows.
    pub fn new() -> Self {
        Table { headers: Vec::new(), rows: Vec::new(), path: None }
    }

    /// True when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Add a new row to the table.
    pub fn add_row(&mut self, row: Vec<String>) -> Result<(), Report> {
        let ex = self.headers.len();
        let new = row.len();
        if ex != new {
            return Err(eyre!("New row size ({new}) does not match the headers ({ex})."));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Add a new column to the table. The column must have one value per row.
    pub fn add_column(&mut self, header: &str, column: Vec<String>) -> Result<(), Report> {
        let ex = self.rows.len();
        let new = column.len();
        if ex != new {
            return Err(eyre!("New column size ({new}) does not match existing table ({ex})."));
        }

        self.headers.push(header.to_string());
        column.into_iter().enumerate().for_each(|(i, val)| {
            self.rows[i].push(val);
        });
        Ok(())
    }

    /// Get the column index (0-based) corresponding to the header.
    pub fn get_header_index(&self, header: &str) -> Result<usize, Report> {
        let pos =
            self.headers.iter().position(|h| h == header).ok_or_else(|| {
                eyre!("Column '{header}' was not found in table: {:?}.", self.path)
            })?;

        Ok(pos)
    }

    /// Get table value at a particular column and row index.
    pub fn get(&self, header: &str, row: usize) -> Result<&str, Report> {
        let header_i = self.get_header_index(header)?;
        let row = self
            .rows
            .get(row)
            .ok_or_else(|| eyre!("Row ({row}) does not exist in the table."))?;
        Ok(&row[header_i])
    }

    /// Return a vector of table values in a column.
    pub fn get_column(&self, header: &str) -> Result<Vec<&str>, Report> {
        let header_i = self.get_header_index(header)?;
        let column = self.rows.iter().map(|row| row[header_i].as_str()).collect();
        Ok(column)
    }

    /// Create a new table holding only the given rows, in the given order.
    ///
    /// # Examples
    ///
    /// ```
    /// use combgc::Table;
    ///
    /// let mut table = Table::new();
    /// table.headers = vec!["id".to_string()];
    /// table.add_row(vec!["A".into()]).unwrap();
    /// table.add_row(vec!["B".into()]).unwrap();
    /// table.add_row(vec!["C".into()]).unwrap();
    ///
    /// let subset = table.subset(&[0, 2]);
    /// assert_eq!(subset.rows, vec![vec!["A".to_string()], vec!["C".to_string()]]);
    /// ```
    pub fn subset(&self, rows: &[usize]) -> Table {
        Table {
            headers: self.headers.clone(),
            rows: rows.iter().filter_map(|i| self.rows.get(*i).cloned()).collect_vec(),
            path: self.path.clone(),
        }
    }

    /// Read a TSV or CSV file into a Table.
    ///
    /// # Arguments
    ///
    /// * `path` - File path.
    /// * `delim` - Optional delimiter. Otherwise, will be identified based on path suffix (.tsv or .csv).
    pub fn read(path: &Path, delim: Option<char>) -> Result<Table, Report> {
        let mut table = Table::new();

        // if not provided, lookup delimiter from file extension
        let delim = match delim {
            Some(c) => c,
            None => utils::get_delimiter(&path)?,
        };

        // attempt to open the file path
        let file = File::open(path).wrap_err_with(|| eyre!("Failed to read file: {path:?}"))?;

        // read and parse lines
        for line in BufReader::new(file).lines().flatten() {
            let row = line.split(delim).map(String::from).collect_vec();
            // if headers are empty, this is the first line, write headers
            if table.headers.is_empty() {
                table.headers = row;
            }
            // otherwise regular row
            else {
                table.rows.push(row);
            }
        }

        table.path = Some(path.to_path_buf());

        Ok(table)
    }

    /// Write table to file.
    pub fn write(&self, path: &Path, delim: Option<char>) -> Result<(), Report> {
        let mut file =
            File::create(path).wrap_err_with(|| format!("Unable to create file: {path:?}"))?;

        // if not provided, lookup delimiter from file extension
        let delim = match delim {
            Some(c) => c,
            None => utils::get_delimiter(&path)?,
        };

        // write headers
        let line = format!("{}\n", self.headers.iter().join(delim.to_string().as_str()));
        file.write_all(line.as_bytes())
            .wrap_err_with(|| format!("Unable to write table headers: {line}"))?;

        // write regular rows
        for row in &self.rows {
            let line = format!("{}\n", row.iter().join(delim.to_string().as_str()));
            file.write_all(line.as_bytes())
                .wrap_err_with(|| format!("Unable to write table rows: {line}"))?;
        }

        Ok(())
    }

    /// Convert table to markdown format.
    pub fn to_markdown(&self) -> String {
        // get the maximum width of each column
        let col_widths = self
            // iterate through columns/headers
            .headers
            .iter()
            .enumerate()
            .map(|(col_i, header)| {
                self
                    // iterate through this column's rows,
                    // get max string width, +2 to add space on either side
                    .rows
                    .iter()
                    .map(|row| {
                        let cell_width = row[col_i].len();
                        if cell_width >= header.len() {
                            cell_width + 2
                        } else {
                            header.len() + 2
                        }
                    })
                    .max()
                    .unwrap_or(header.len() + 2)
            })
            .collect_vec();

        let mut markdown = String::from("|");
        // frame in between headers and rows
        let mut header_frame = String::from("|");

        // Create the header line
        for (header, col_width) in self.headers.iter().zip(col_widths.iter()) {
            let cell = format!("{:^width$}|", header, width = col_width);
            markdown.push_str(&cell);

            let frame = format!("{}|", "-".repeat(*col_width));
            header_frame.push_str(&frame);
        }
        markdown.push('\n');
        markdown.push_str(&header_frame);
        markdown.push('\n');

        // Create the row lines
        for row in &self.rows {
            markdown.push('|');
            for (col_i, col_width) in col_widths.iter().enumerate() {
                let cell = format!("{:^width$}|", row[col_i], width = col_width);
                markdown.push_str(&cell);
            }
            markdown.push('\n');
        }

        markdown
    }
}
