use std::io::Write;

use csvprogs_core::{CsvDialect, CsvSink, CsvSource, KWayMerge, KeySpec, RowSource, RowStreamExt};

const FIRST: &str = "time,close\r\n\
2015-04-15T15:00,26.98\r\n\
2015-04-16T15:00,27.04\r\n\
2015-04-17T15:00,27.77\r\n";

const SECOND: &str = "time,position\r\n\
2015-04-15T12:00,1\r\n\
2015-04-15T12:30,-1\r\n\
2015-04-15T12:45,1\r\n\
2015-04-15T14:45,-1\r\n\
2015-04-16T09:30,1\r\n";

const MERGED: &[u8] = b"time,close,position\r\n\
2015-04-15T12:00,,1\r\n\
2015-04-15T12:30,,-1\r\n\
2015-04-15T12:45,,1\r\n\
2015-04-15T14:45,,-1\r\n\
2015-04-15T15:00,26.98,\r\n\
2015-04-16T09:30,,1\r\n\
2015-04-16T15:00,27.04,\r\n\
2015-04-17T15:00,27.77,\r\n";

fn temp_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

#[test]
fn merge_files_to_bytes() {
    let a = temp_csv(FIRST);
    let b = temp_csv(SECOND);
    let dialect = CsvDialect::default();
    let sources = [a.path(), b.path()]
        .into_iter()
        .map(|p| CsvSource::open(p, &dialect))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let merge = KWayMerge::new(sources, KeySpec::text(["time"]).unwrap());
    let mut sink = CsvSink::new(Vec::new(), merge.columns().to_vec(), &dialect, true).unwrap();
    let n = sink.write_all(merge).unwrap();
    assert_eq!(n, 8);
    assert_eq!(sink.into_inner().unwrap(), MERGED);
}

#[test]
fn collapse_after_merge_keeps_header() {
    let src = CsvSource::from_reader(MERGED, &CsvDialect::default(), "merged").unwrap();
    let columns = src.columns().to_vec();
    let spec = KeySpec::text(["time"]).unwrap();
    let mut sink = CsvSink::new(Vec::new(), columns, &CsvDialect::default(), true).unwrap();
    sink.write_all(src.collapse(&spec)).unwrap();
    assert_eq!(sink.into_inner().unwrap(), MERGED);
}

#[test]
fn missing_file_reports_path() {
    let err = CsvSource::open(std::path::Path::new("/no/such/file.csv"), &CsvDialect::default())
        .err()
        .unwrap();
    assert!(err.to_string().contains("/no/such/file.csv"));
}

#[test]
fn append_to_existing_file() {
    let out = temp_csv("time,close\r\n1,a\r\n");
    let dialect = CsvDialect::default();
    let src = CsvSource::from_reader("time,close\n2,b\n".as_bytes(), &dialect, "mem").unwrap();
    let columns = src.columns().to_vec();
    let mut sink = CsvSink::create(Some(out.path()), columns, &dialect, true).unwrap();
    sink.write_all(src).unwrap();
    sink.flush().unwrap();
    drop(sink);
    let written = std::fs::read_to_string(out.path()).unwrap();
    assert_eq!(written, "time,close\r\n1,a\r\n2,b\r\n");
}
