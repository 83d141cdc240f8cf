use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use calamine::{Data, Reader, open_workbook_auto};
use once_cell::sync::OnceCell;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{DataSourceError, LoadError, SchemaError};
use super::model::{Attribute, Record, Table};

/// File the dashboard reads when nothing else is given.
pub const DEFAULT_DATA_FILE: &str = "basededados.xlsx";

/// Worksheet holding the submissions.
pub const DEFAULT_SHEET: &str = "Sheet1";

// ---------------------------------------------------------------------------
// DatasetSource – once-initialised handle over a data file
// ---------------------------------------------------------------------------

/// Handle over one data file. The first successful [`load`](Self::load)
/// reads and parses the file; every later call hands out the same table.
/// The cache is never invalidated.
#[derive(Debug)]
pub struct DatasetSource {
    path: PathBuf,
    sheet: String,
    table: OnceCell<Arc<Table>>,
}

impl DatasetSource {
    pub fn new(path: impl Into<PathBuf>, sheet: impl Into<String>) -> Self {
        DatasetSource {
            path: path.into(),
            sheet: sheet.into(),
            table: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    /// Load the table, reading the file only on the first successful call.
    pub fn load(&self) -> Result<Arc<Table>, LoadError> {
        if let Some(table) = self.table.get() {
            log::debug!("dataset cache hit for {}", self.path.display());
            return Ok(Arc::clone(table));
        }
        let table = self
            .table
            .get_or_try_init(|| load_file(&self.path, &self.sheet).map(Arc::new))?;
        log::info!(
            "Loaded {} records from {}",
            table.len(),
            self.path.display()
        );
        Ok(Arc::clone(table))
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load indication records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` / `.ods` – workbook, rows read from `sheet`
/// * `.csv`     – header row followed by records
/// * `.json`    – `[{ "Nome": "...", ... }, ...]`
/// * `.parquet` – one column per label
///
/// `sheet` is ignored for non-workbook formats.
pub fn load_file(path: &Path, sheet: &str) -> Result<Table, LoadError> {
    if !path.is_file() {
        return Err(DataSourceError::new(path, "file not found").into());
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => read_workbook(path, sheet),
        "csv" => read_csv(path),
        "json" => read_json(path),
        "parquet" | "pq" => read_parquet(path),
        other => {
            let reason = format!("unsupported file extension: .{other}");
            return Err(DataSourceError::new(path, reason).into());
        }
    }
    .map_err(|e| DataSourceError::from_anyhow(path, e))?;

    Ok(raw.into_table()?)
}

// ---------------------------------------------------------------------------
// RawSheet – header labels plus text cells, before schema mapping
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct RawSheet {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawSheet {
    /// Trim header labels and map the required columns onto records.
    fn into_table(self) -> Result<Table, SchemaError> {
        let headers: Vec<String> = self.headers.iter().map(|h| h.trim().to_string()).collect();

        let column = |attribute: Attribute| -> Result<usize, SchemaError> {
            headers
                .iter()
                .position(|h| h == attribute.source_label())
                .ok_or_else(|| SchemaError {
                    column: attribute.source_label().to_string(),
                    found: headers.clone(),
                })
        };

        let name = column(Attribute::Name)?;
        let category = column(Attribute::Category)?;
        let gender = column(Attribute::Gender)?;
        let indication = column(Attribute::Indication)?;
        let link = column(Attribute::Link)?;

        let records = self
            .rows
            .into_iter()
            .map(|row| {
                let cell = |idx: usize| row.get(idx).cloned().unwrap_or_default();
                let link_text = cell(link);
                Record {
                    name: cell(name),
                    category: cell(category),
                    gender: cell(gender),
                    indication: cell(indication),
                    link: if link_text.trim().is_empty() {
                        None
                    } else {
                        Some(link_text)
                    },
                }
            })
            .collect();

        Ok(Table::new(records))
    }
}

/// Render a number the way the spreadsheet shows it: integral values lose
/// their fractional part.
fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

/// The first row of the sheet holds the column labels.
fn read_workbook(path: &Path, sheet: &str) -> Result<RawSheet> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;

    let names = workbook.sheet_names();
    if !names.iter().any(|n| n == sheet) {
        bail!("sheet '{sheet}' not found (available: {})", names.join(", "));
    }

    let range = workbook
        .worksheet_range(sheet)
        .with_context(|| format!("reading sheet '{sheet}'"))?;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_to_text).collect(),
        None => Vec::new(),
    };
    let rows = rows
        .map(|row| row.iter().map(cell_to_text).collect())
        .collect();

    Ok(RawSheet { headers, rows })
}

fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<RawSheet> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(|v| v.to_string()).collect());
    }

    Ok(RawSheet { headers, rows })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`). Labels are the
/// union of all object keys.
fn read_json(path: &Path) -> Result<RawSheet> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut objects = Vec::with_capacity(records.len());
    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .into_iter()
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_text).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(RawSheet { headers, rows })
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        },
        JsonValue::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
/// Every column is read as text; nulls become empty cells.
fn read_parquet(path: &Path) -> Result<RawSheet> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| arrow_cell_to_text(col.as_ref(), row))
                .collect::<Result<Vec<String>>>()
                .with_context(|| format!("Row {row}"))?;
            rows.push(cells);
        }
    }

    Ok(RawSheet { headers, rows })
}

fn arrow_cell_to_text(col: &dyn Array, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Float64 => {
            format_number(col.as_primitive::<arrow::datatypes::Float64Type>().value(row))
        }
        _ => array_value_to_string(col, row).context("formatting parquet value")?,
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::array::StringArray;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use pretty_assertions::assert_eq;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    use super::*;

    const PADDED_HEADER: &str = " Nome ,Qual categoria deseja cadrastar  ,\tQual o gênero da sua solicitação,Qual indicação você deseja fazer? , Insira o Link da sua indicação ";

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn sample_csv(dir: &TempDir) -> PathBuf {
        write_file(
            dir,
            "indicacoes.csv",
            &format!(
                "{PADDED_HEADER}\n\
                 Ana,Filme,Drama,Central do Brasil,https://example.org/cb\n\
                 Bia,Livro,Romance,Dom Casmurro,\n"
            ),
        )
    }

    #[test]
    fn csv_headers_are_trimmed() {
        let dir = TempDir::new().unwrap();
        let table = load_file(&sample_csv(&dir), DEFAULT_SHEET).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.records()[0],
            Record {
                name: "Ana".into(),
                category: "Filme".into(),
                gender: "Drama".into(),
                indication: "Central do Brasil".into(),
                link: Some("https://example.org/cb".into()),
            }
        );
        assert_eq!(table.records()[1].link, None);
    }

    #[test]
    fn short_rows_fill_with_blanks() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "short.csv", &format!("{PADDED_HEADER}\nCaio,Série\n"));
        let table = load_file(&path, DEFAULT_SHEET).unwrap();
        let r = &table.records()[0];
        assert_eq!(r.category, "Série");
        assert_eq!(r.gender, "");
        assert_eq!(r.link, None);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "extra.csv",
            &format!("ID,{PADDED_HEADER},Email\n7,Ana,Filme,Drama,Central do Brasil,,ana@example.org\n"),
        );
        let table = load_file(&path, DEFAULT_SHEET).unwrap();
        assert_eq!(table.records()[0].name, "Ana");
        assert_eq!(table.records()[0].indication, "Central do Brasil");
    }

    #[test]
    fn missing_column_is_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "bad.csv", "Nome,Categoria\nAna,Filme\n");
        match load_file(&path, DEFAULT_SHEET) {
            Err(LoadError::Schema(e)) => {
                assert_eq!(e.column, "Qual categoria deseja cadrastar");
                assert_eq!(e.found, vec!["Nome".to_string(), "Categoria".to_string()]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_data_source_error() {
        let dir = TempDir::new().unwrap();
        let err = load_file(&dir.path().join("nope.xlsx"), DEFAULT_SHEET).unwrap_err();
        assert!(matches!(err, LoadError::DataSource(_)), "{err:?}");
    }

    #[test]
    fn unsupported_extension_is_data_source_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "data.txt", "hello");
        let err = load_file(&path, DEFAULT_SHEET).unwrap_err();
        assert!(err.to_string().contains("unsupported file extension"), "{err}");
    }

    #[test]
    fn corrupt_workbook_is_data_source_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "basededados.xlsx", "not a zip archive");
        let err = load_file(&path, DEFAULT_SHEET).unwrap_err();
        assert!(matches!(err, LoadError::DataSource(_)), "{err:?}");
    }

    /// Workbook with padded header labels, as exported by the form.
    fn write_workbook(dir: &TempDir, sheet: &str) -> PathBuf {
        let path = dir.path().join("basededados.xlsx");
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet).unwrap();
        for (col, attribute) in Attribute::ALL.iter().enumerate() {
            let label = format!("  {} ", attribute.source_label());
            worksheet.write_string(0, col as u16, label).unwrap();
        }
        worksheet.write_number(1, 0, 2024.0).unwrap();
        worksheet.write_string(1, 1, "Filme").unwrap();
        // gender (column 2) and link (column 4) left blank
        worksheet.write_string(1, 3, "Central do Brasil").unwrap();
        worksheet.write_string(2, 0, "Bia").unwrap();
        worksheet.write_string(2, 1, "Livro").unwrap();
        worksheet.write_string(2, 2, "Romance").unwrap();
        worksheet.write_string(2, 3, "Dom Casmurro").unwrap();
        worksheet.write_string(2, 4, "https://example.org/dc").unwrap();
        workbook.save(&path).unwrap();
        path
    }

    #[test]
    fn xlsx_headers_are_trimmed() {
        let dir = TempDir::new().unwrap();
        let path = write_workbook(&dir, DEFAULT_SHEET);
        let table = load_file(&path, DEFAULT_SHEET).unwrap();

        assert_eq!(
            table.records(),
            &[
                Record {
                    name: "2024".into(),
                    category: "Filme".into(),
                    gender: "".into(),
                    indication: "Central do Brasil".into(),
                    link: None,
                },
                Record {
                    name: "Bia".into(),
                    category: "Livro".into(),
                    gender: "Romance".into(),
                    indication: "Dom Casmurro".into(),
                    link: Some("https://example.org/dc".into()),
                },
            ]
        );
    }

    #[test]
    fn missing_sheet_is_data_source_error() {
        let dir = TempDir::new().unwrap();
        let path = write_workbook(&dir, "Respostas");
        match load_file(&path, DEFAULT_SHEET) {
            Err(LoadError::DataSource(e)) => {
                assert!(e.reason.contains("sheet 'Sheet1' not found"), "{e}");
                assert!(e.reason.contains("Respostas"), "{e}");
            }
            other => panic!("expected data source error, got {other:?}"),
        }
    }

    #[test]
    fn json_records_load() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "indicacoes.json",
            r#"[
                {" Nome": "Ana", "Qual categoria deseja cadrastar": "Filme",
                 "Qual o gênero da sua solicitação": "Drama",
                 "Qual indicação você deseja fazer?": "Central do Brasil",
                 "Insira o Link da sua indicação": null},
                {" Nome": "Bia", "Qual categoria deseja cadrastar": "Jogo",
                 "Qual o gênero da sua solicitação": "RPG",
                 "Qual indicação você deseja fazer?": 1984,
                 "Insira o Link da sua indicação": "https://example.org"}
            ]"#,
        );
        let table = load_file(&path, DEFAULT_SHEET).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].link, None);
        assert_eq!(table.records()[1].indication, "1984");
        assert_eq!(table.records()[1].link.as_deref(), Some("https://example.org"));
    }

    #[test]
    fn parquet_columns_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("indicacoes.parquet");

        let labels = Attribute::ALL.map(|a| format!("{} ", a.source_label()));
        let schema = Arc::new(Schema::new(
            labels
                .iter()
                .map(|l| Field::new(l, DataType::Utf8, true))
                .collect::<Vec<_>>(),
        ));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("Ana"), Some("Bia")])),
                Arc::new(StringArray::from(vec![Some("Filme"), Some("Livro")])),
                Arc::new(StringArray::from(vec![Some("Drama"), None])),
                Arc::new(StringArray::from(vec![Some("Central do Brasil"), Some("Dom Casmurro")])),
                Arc::new(StringArray::from(vec![None, Some("https://example.org")])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path, DEFAULT_SHEET).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].gender, "");
        assert_eq!(table.records()[0].link, None);
        assert_eq!(table.records()[1].link.as_deref(), Some("https://example.org"));
    }

    #[test]
    fn source_reads_file_once() {
        let dir = TempDir::new().unwrap();
        let path = sample_csv(&dir);
        let source = DatasetSource::new(&path, DEFAULT_SHEET);
        assert!(source.table.get().is_none());

        let first = source.load().unwrap();
        // A second read would now fail.
        std::fs::remove_file(&path).unwrap();
        let second = source.load().unwrap();

        assert!(source.table.get().is_some());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("later.csv");
        let source = DatasetSource::new(&path, DEFAULT_SHEET);
        assert!(source.load().is_err());
        assert!(source.table.get().is_none());

        std::fs::copy(sample_csv(&dir), &path).unwrap();
        assert_eq!(source.load().unwrap().len(), 2);
    }

    #[test]
    fn integral_numbers_drop_fraction() {
        assert_eq!(format_number(2024.0), "2024");
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(cell_to_text(&Data::Float(7.0)), "7");
        assert_eq!(cell_to_text(&Data::Empty), "");
    }
}
