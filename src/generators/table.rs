//! Table output generator.
//!
//! Renders reports and episode tables as CSV, fixed-width text, or prints
//! them to the console.

use crate::models::report::Table;
use crate::Result;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output sink for a rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    /// Comma-separated file.
    Csv,
    /// Fixed-width plain-text file.
    Txt,
    /// Fixed-width text on stdout.
    Console,
}

impl OutputType {
    /// File extension for file-backed sinks.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            OutputType::Csv => Some("csv"),
            OutputType::Txt => Some("txt"),
            OutputType::Console => None,
        }
    }
}

impl FromStr for OutputType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputType::Csv),
            "txt" => Ok(OutputType::Txt),
            "console" => Ok(OutputType::Console),
            _ => Err(crate::Error::InvalidOutputType(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputType::Csv => write!(f, "csv"),
            OutputType::Txt => write!(f, "txt"),
            OutputType::Console => write!(f, "console"),
        }
    }
}

/// Resolve where a file sink writes to.
///
/// A path already ending in the sink's extension is used as is. Anything
/// else is treated as a directory (the current one when missing) and gets
/// `<default_name>.<ext>` appended.
pub fn resolve_output_path(
    output: Option<&Path>,
    default_name: &str,
    output_type: OutputType,
) -> Option<PathBuf> {
    let ext = output_type.extension()?;
    let path = match output {
        Some(p)
            if p
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(ext)) =>
        {
            p.to_path_buf()
        }
        Some(dir) => dir.join(format!("{}.{}", default_name, ext)),
        None => PathBuf::from(format!("{}.{}", default_name, ext)),
    };
    Some(path)
}

/// Write a table as CSV.
pub fn write_csv<W: std::io::Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&table.headers)?;
    for row in &table.rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render a table as right-aligned fixed-width text with a row index.
pub fn render_text(table: &Table) -> String {
    let index_width = table.rows.len().saturating_sub(1).to_string().len();

    let widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();

    out.push_str(&" ".repeat(index_width));
    for (header, width) in table.headers.iter().zip(&widths) {
        let _ = write!(out, "  {:>width$}", header, width = width);
    }
    out.push('\n');

    for (i, row) in table.rows.iter().enumerate() {
        let _ = write!(out, "{:<width$}", i, width = index_width);
        for (col, width) in widths.iter().enumerate() {
            let cell = row.get(col).map(String::as_str).unwrap_or("");
            let _ = write!(out, "  {:>width$}", cell, width = width);
        }
        out.push('\n');
    }

    out
}

/// Send a table to the chosen sink.
///
/// Returns the written file path for file sinks.
pub fn emit(
    table: &Table,
    output_type: OutputType,
    output: Option<&Path>,
    default_name: &str,
) -> Result<Option<PathBuf>> {
    let Some(path) = resolve_output_path(output, default_name, output_type) else {
        print!("{}", render_text(table));
        return Ok(None);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match output_type {
        OutputType::Csv => write_csv(table, std::fs::File::create(&path)?)?,
        _ => std::fs::write(&path, render_text(table))?,
    }

    tracing::info!("Wrote {} rows to {}", table.rows.len(), path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Table {
        Table {
            headers: vec!["A - Z".to_string(), "Movie".to_string()],
            rows: vec![
                vec![String::new(), String::new()],
                vec!["A".to_string(), "Alien".to_string()],
                vec![String::new(), "Amelie".to_string()],
            ],
        }
    }

    #[test]
    fn test_output_type_from_str() {
        assert_eq!("CSV".parse::<OutputType>().unwrap(), OutputType::Csv);
        assert_eq!("console".parse::<OutputType>().unwrap(), OutputType::Console);
        assert!(matches!(
            "xlsx".parse::<OutputType>(),
            Err(crate::Error::InvalidOutputType(_))
        ));
    }

    #[test]
    fn test_resolve_output_path() {
        assert_eq!(
            resolve_output_path(Some(Path::new("/tmp/out.csv")), "Movie Database", OutputType::Csv),
            Some(PathBuf::from("/tmp/out.csv"))
        );
        assert_eq!(
            resolve_output_path(Some(Path::new("/tmp")), "Movie Database", OutputType::Txt),
            Some(PathBuf::from("/tmp/Movie Database.txt"))
        );
        assert_eq!(
            resolve_output_path(None, "Episodes", OutputType::Csv),
            Some(PathBuf::from("Episodes.csv"))
        );
        assert_eq!(resolve_output_path(None, "Episodes", OutputType::Console), None);
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        write_csv(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "A - Z,Movie");
        assert_eq!(lines[2], "A,Alien");
        assert_eq!(lines[3], ",Amelie");
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "   A - Z   Movie");
        assert_eq!(lines[1], format!("0{}", " ".repeat(15)));
        assert_eq!(lines[2], format!("1{}A{}Alien", " ".repeat(6), " ".repeat(3)));
        assert_eq!(lines[3], format!("2{}Amelie", " ".repeat(9)));
    }

    #[test]
    fn test_emit_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = emit(&sample(), OutputType::Txt, Some(temp_dir.path()), "Movie Database")
            .unwrap()
            .unwrap();
        assert_eq!(path, temp_dir.path().join("Movie Database.txt"));
        assert!(std::fs::read_to_string(path).unwrap().contains("Amelie"));
    }
}
