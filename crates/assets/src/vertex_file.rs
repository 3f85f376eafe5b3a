use glam::Vec3;
use std::num::ParseFloatError;
use std::path::{Path, PathBuf};
use trilab_common::Triangle;

/// Errors from reading a vertex file.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: missing field {index} (expected x,y,z)")]
    MissingField { line: usize, index: usize },
    #[error("line {line}, field {index}: {value:?} is not a number: {source}")]
    BadNumber {
        line: usize,
        index: usize,
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Parse up to three `x,y,z` lines.
///
/// Fields are trimmed and anything past the third field is ignored. Lines
/// after the third are not read. A text with fewer than three lines leaves
/// the remaining corners at the origin.
pub fn parse_triangle(text: &str) -> Result<Triangle, AssetError> {
    let mut triangle = Triangle::default();
    let mut read = 0;

    for (i, line) in text.lines().take(3).enumerate() {
        triangle.vertices[i] = parse_vertex(line, i + 1)?;
        read += 1;
    }

    if read < 3 {
        tracing::warn!(lines = read, "vertex file is short; missing corners stay at the origin");
    }
    Ok(triangle)
}

fn parse_vertex(line: &str, line_no: usize) -> Result<Vec3, AssetError> {
    let fields: Vec<&str> = line.split(',').collect();
    let mut xyz = [0.0f32; 3];
    for (index, slot) in xyz.iter_mut().enumerate() {
        let raw = fields.get(index).ok_or(AssetError::MissingField {
            line: line_no,
            index,
        })?;
        let value = raw.trim();
        *slot = value.parse().map_err(|source| AssetError::BadNumber {
            line: line_no,
            index,
            value: value.to_string(),
            source,
        })?;
    }
    Ok(Vec3::from_array(xyz))
}

/// Read and parse a vertex file. The file is closed before parsing starts.
pub fn load_triangle(path: impl AsRef<Path>) -> Result<Triangle, AssetError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let triangle = parse_triangle(&text)?;
    tracing::debug!(path = %path.display(), ?triangle, "loaded vertex file");
    Ok(triangle)
}

/// Like `load_triangle`, but a failure is logged and becomes `None`.
pub fn load_triangle_or_absent(path: impl AsRef<Path>) -> Option<Triangle> {
    match load_triangle(path) {
        Ok(triangle) => Some(triangle),
        Err(e) => {
            tracing::error!("error reading vertex file: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// Log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn parses_three_lines_in_order() {
        let t = parse_triangle("0,0,1\n1,0,1\n0.5,1,0").unwrap();
        assert_eq!(
            t.vertices,
            [
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(0.5, 1.0, 0.0),
            ]
        );
    }

    #[test]
    fn tolerates_spaces_and_crlf() {
        let t = parse_triangle(" -1.5 , 2,3\r\n4, 5 ,6\r\n7,8, 9 \r\n").unwrap();
        assert_eq!(t.vertices[0], Vec3::new(-1.5, 2.0, 3.0));
        assert_eq!(t.vertices[2], Vec3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn extra_fields_and_lines_ignored() {
        let t = parse_triangle("1,2,3,99\n4,5,6\n7,8,9\nnot,a,vertex\n").unwrap();
        assert_eq!(t.vertices[0], Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.vertices[2], Vec3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn short_file_leaves_origin() {
        let t = parse_triangle("1,1,1\n").unwrap();
        assert_eq!(t.vertices[0], Vec3::ONE);
        assert_eq!(t.vertices[1], Vec3::ZERO);
        assert_eq!(t.vertices[2], Vec3::ZERO);
    }

    #[test]
    fn missing_field_is_reported() {
        let err = parse_triangle("0,0,1\n1,0\n0,1,0").unwrap_err();
        assert!(matches!(err, AssetError::MissingField { line: 2, index: 2 }));
    }

    #[test]
    fn non_numeric_field_is_reported() {
        let err = parse_triangle("0,0,1\n1,0,1\n0.5,abc,0").unwrap_err();
        match err {
            AssetError::BadNumber {
                line, index, value, ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(index, 1);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_line_is_a_bad_number() {
        let err = parse_triangle("\n1,0,1\n0,1,0").unwrap_err();
        assert!(matches!(err, AssetError::BadNumber { line: 1, index: 0, .. }));
    }

    #[test]
    fn load_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "0,0,1\n1,0,1\n0.5,1,0\n").unwrap();
        let t = load_triangle(tmp.path()).unwrap();
        assert_eq!(t.vertices[1], Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_triangle(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn missing_file_logs_error_and_becomes_absent() {
        let dir = tempfile::tempdir().unwrap();
        let logs = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();

        let loaded = tracing::subscriber::with_default(subscriber, || {
            load_triangle_or_absent(dir.path().join("triangle.txt"))
        });

        assert!(loaded.is_none());
        let text = logs.text();
        assert!(text.contains("ERROR"), "{text}");
        assert!(text.contains("error reading vertex file"), "{text}");
    }

    #[test]
    fn malformed_file_becomes_absent() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "x,y,z\n").unwrap();
        assert!(load_triangle_or_absent(tmp.path()).is_none());
    }
}
