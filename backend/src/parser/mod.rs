//! File intake: upload checks, encoding and delimiter auto-detection.
//!
//! Turns an uploaded word list into a [`RawTable`]. No detection logic here;
//! every row (header included) is kept as-is.
//!
//! Binary spreadsheet formats are not decoded: users export them as CSV.

use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::RawTable;

/// Largest accepted upload (5 MB).
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Extensions accepted by the intake layer.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

/// Decoded table with intake metadata
#[derive(Debug, Clone)]
pub struct DecodedTable {
    /// All rows, header included
    pub table: RawTable,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
}

/// Reject uploads the pipeline should never see.
///
/// `file_name` is optional because multipart uploads may omit it; a missing
/// name or extension is accepted.
pub fn check_upload(file_name: Option<&str>, size: usize) -> CsvResult<()> {
    if size > MAX_FILE_SIZE {
        return Err(CsvError::FileTooLarge {
            size,
            max_mb: MAX_FILE_SIZE / (1024 * 1024),
        });
    }

    let extension = file_name
        .map(Path::new)
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension {
        Some(ext) if !ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => {
            Err(CsvError::UnsupportedFileType { extension: ext })
        }
        _ => Ok(()),
    }
}

/// Detect the encoding of raw bytes using chardet.
///
/// Valid UTF-8 is taken as-is: Turkmen letters in short files confuse the
/// statistical detector.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to string using the specified encoding.
///
/// Unknown labels are looked up in the WHATWG registry; anything else falls
/// back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => Ok(String::from_utf8_lossy(bytes).into_owned()),
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.into_owned())
        }
        "windows-1252" | "cp1252" => Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()),
        label => match encoding_rs::Encoding::for_label(label.as_bytes()) {
            Some(enc) => {
                let (decoded, _, had_errors) = enc.decode(bytes);
                if had_errors {
                    return Err(CsvError::EncodingError(format!(
                        "content is not valid {}",
                        enc.name()
                    )));
                }
                Ok(decoded.into_owned())
            }
            None => Ok(String::from_utf8_lossy(bytes).into_owned()),
        },
    }
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse delimited text into a table. No header handling: row 0 is row 0.
pub fn parse_table(content: &str, delimiter: char) -> CsvResult<RawTable> {
    let delimiter = u8::try_from(delimiter).map_err(|_| CsvError::ParseError {
        line: 0,
        message: format!("delimiter '{}' is not a single byte", delimiter),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    // A trailing newline-only file still has no rows worth detecting.
    if rows.iter().all(|r| r.iter().all(|c| c.trim().is_empty())) {
        return Err(CsvError::EmptyFile);
    }

    Ok(RawTable::new(rows))
}

/// Parse a file with auto-detection of encoding and delimiter.
///
/// # Example
/// ```ignore
/// let decoded = parse_file_auto("/path/to/words.csv")?;
/// println!("Encoding: {}, Delimiter: '{}'", decoded.encoding, decoded.delimiter);
/// println!("Rows: {}", decoded.table.len());
/// ```
pub fn parse_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<DecodedTable> {
    let path = path.as_ref();
    let size = usize::try_from(std::fs::metadata(path)?.len()).unwrap_or(usize::MAX);
    check_upload(path.file_name().and_then(|n| n.to_str()), size)?;
    let bytes = std::fs::read(path)?;
    parse_bytes_auto(&bytes)
}

/// Parse bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<DecodedTable> {
    if bytes.is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);
    let table = parse_table(&content, delimiter)?;

    Ok(DecodedTable {
        table,
        encoding,
        delimiter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_simple_table() {
        let table = parse_table("apple;[ˈæpəl];alma\npear;[peə];armyt", ';').unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0], vec!["apple", "[ˈæpəl]", "alma"]);
        assert_eq!(table.rows()[1][2], "armyt");
    }

    #[test]
    fn test_ragged_rows_allowed() {
        let table = parse_table("a,b\n1,2,3,4\n5", ',').unwrap();
        assert_eq!(table.width(), 4);
        assert_eq!(table.rows()[2], vec!["5"]);
    }

    #[test]
    fn test_quoted_values() {
        let table = parse_table("\"good, fine\",gowy\n", ',').unwrap();
        assert_eq!(table.rows()[0][0], "good, fine");
    }

    #[test]
    fn test_cells_trimmed() {
        let table = parse_table(" apple \t alma \n", '\t').unwrap();
        assert_eq!(table.rows()[0], vec!["apple", "alma"]);
    }

    #[test]
    fn test_empty_content_error() {
        assert!(matches!(parse_table("", ','), Err(CsvError::EmptyFile)));
        assert!(matches!(parse_bytes_auto(b""), Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
    }

    #[test]
    fn test_detect_delimiter_tab() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
    }

    #[test]
    fn test_detect_delimiter_pipe() {
        assert_eq!(detect_delimiter("a|b|c\n1|2|3"), '|');
    }

    #[test]
    fn test_detect_delimiter_defaults_to_comma() {
        assert_eq!(detect_delimiter("single"), ',');
    }

    #[test]
    fn test_auto_parse_utf8() {
        let content = "Word;Translation\napple;alma\nbeautiful;owadan\ngood;gowy\n";
        let decoded = parse_bytes_auto(content.as_bytes()).unwrap();

        assert_eq!(decoded.delimiter, ';');
        assert_eq!(decoded.table.len(), 4);
    }

    #[test]
    fn test_bom_stripped() {
        let decoded = decode_content(b"\xEF\xBB\xBFword", "utf-8").unwrap();
        assert_eq!(decoded, "word");
    }

    #[test]
    fn test_detect_encoding_prefers_utf8() {
        assert_eq!(detect_encoding("şeýle, söz".as_bytes()), "utf-8");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_check_upload_size_limit() {
        assert!(check_upload(Some("words.csv"), MAX_FILE_SIZE).is_ok());
        let err = check_upload(Some("words.csv"), MAX_FILE_SIZE + 1).unwrap_err();
        assert!(err.to_string().contains("5 MB"));
    }

    #[test]
    fn test_check_upload_extension() {
        assert!(check_upload(Some("Words.CSV"), 10).is_ok());
        assert!(check_upload(Some("list.tsv"), 10).is_ok());
        assert!(check_upload(None, 10).is_ok());
        assert!(matches!(
            check_upload(Some("words.xlsx"), 10),
            Err(CsvError::UnsupportedFileType { .. })
        ));
    }

    #[test]
    fn test_parse_file_auto() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "apple,alma").unwrap();
        writeln!(file, "pear,armyt").unwrap();

        let decoded = parse_file_auto(file.path()).unwrap();
        assert_eq!(decoded.delimiter, ',');
        assert_eq!(decoded.table.len(), 2);
    }

    #[test]
    fn test_parse_file_rejects_oversize_before_reading() {
        // Sparse file: the limit is checked from metadata.
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.as_file().set_len(MAX_FILE_SIZE as u64 + 1).unwrap();
        assert!(matches!(
            parse_file_auto(file.path()),
            Err(CsvError::FileTooLarge { max_mb: 5, .. })
        ));
    }

    #[test]
    fn test_parse_file_rejects_extension() {
        let file = tempfile::Builder::new().suffix(".xls").tempfile().unwrap();
        assert!(matches!(
            parse_file_auto(file.path()),
            Err(CsvError::UnsupportedFileType { .. })
        ));
    }
}
