use std::fs;
use std::io;
use std::path::Path;

use crate::error::InputError;
use super::model::RawPin;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read a pin table from `path`.
///
/// Row layout is `number, name[, electrical type]`. The whole file is read
/// before parsing so the handle is released before any classification work.
pub fn load_pins(path: &Path, delimiter: u8) -> Result<Vec<RawPin>, InputError> {
    log::info!("Reading pin table: {}", path.display());

    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => InputError::NotFound(path.to_path_buf()),
        _ => InputError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let pins = parse_pins(&bytes, delimiter)?;
    log::info!("Loaded {} pins from {}", pins.len(), path.display());
    Ok(pins)
}

/// Parse pin rows from an in-memory table. A leading UTF-8 BOM is ignored.
pub fn parse_pins(bytes: &[u8], delimiter: u8) -> Result<Vec<RawPin>, InputError> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .from_reader(body);

    let mut pins = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| InputError::Parse {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            source: e,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() < 2 {
            log::debug!("Skipping short row at line {}", line);
            continue;
        }

        let number = record.get(0).unwrap_or_default();
        let name = record.get(1).unwrap_or_default();

        if is_header(number, name) {
            log::debug!("Skipping header row at line {}: {:?}", line, number);
            continue;
        }

        pins.push(RawPin::new(number, name, record.get(2).unwrap_or_default()));
    }

    Ok(pins)
}

/// Header rows are not declared, only recognised by their labels.
fn is_header(number: &str, name: &str) -> bool {
    number.contains("Pin") || name.contains("Name")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(text: &str) -> Vec<RawPin> {
        parse_pins(text.as_bytes(), b',').unwrap()
    }

    #[test]
    fn reads_rows_and_trims_fields() {
        let pins = parse("1, VDD , Power\n2,PA0,I/O\n3,PA1\n");
        assert_eq!(
            pins,
            vec![
                RawPin::new("1", "VDD", "Power"),
                RawPin::new("2", "PA0", "I/O"),
                RawPin::new("3", "PA1", ""),
            ]
        );
    }

    #[test]
    fn skips_header_and_short_rows() {
        let pins = parse("Pin,Name,Type\n\nlonely\n1,PA0,Input\nDesignator,Pin Name\n");
        assert_eq!(pins, vec![RawPin::new("1", "PA0", "Input")]);
    }

    #[test]
    fn header_match_is_case_sensitive() {
        let pins = parse("pin,name\n");
        assert_eq!(pins.len(), 1);
    }

    #[test]
    fn strips_byte_order_mark() {
        let pins = parse("\u{feff}1,PA0,Input\n");
        assert_eq!(pins[0].number, "1");
    }

    #[test]
    fn honours_custom_delimiter() {
        let pins = parse_pins("1;PA0;Output\n".as_bytes(), b';').unwrap();
        assert_eq!(pins, vec![RawPin::new("1", "PA0", "Output")]);
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let err = parse_pins(&b"1,PA\xFF0\n"[..], b',').unwrap_err();
        assert!(matches!(err, InputError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = load_pins(&path, b',').unwrap_err();
        assert!(matches!(err, InputError::NotFound(ref p) if p == &path));
    }

    #[test]
    fn unreadable_path_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_pins(dir.path(), b',').unwrap_err();
        assert!(matches!(err, InputError::Read { ref path, .. } if path == dir.path()));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Pin,Name,Type").unwrap();
        writeln!(file, "1,GND,GND").unwrap();
        let pins = load_pins(file.path(), b',').unwrap();
        assert_eq!(pins, vec![RawPin::new("1", "GND", "GND")]);
    }
}
