use crate::transcribe::TranscriptSegment;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const SUBTITLE_EXTENSION: &str = "srt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleRecord {
    pub index: usize, // 1-based
    pub start: String,
    pub end: String,
    pub text: String,
}

pub fn format_segment(segment: &TranscriptSegment) -> SubtitleRecord {
    SubtitleRecord {
        index: segment.index + 1,
        start: format_timestamp(segment.start),
        end: format_timestamp(segment.end),
        text: clean_text(&segment.text).to_string(),
    }
}

/// `H:MM:SS,000`. Fractional seconds are truncated and the millisecond
/// field is always zero; hours are not wrapped into days.
pub fn format_timestamp(seconds: f64) -> String {
    // negative and NaN inputs saturate to zero
    let total = seconds.trunc() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    format!("{}:{:02}:{:02},000", hours, minutes, secs)
}

/// Drops exactly one leading ASCII space.
pub fn clean_text(text: &str) -> &str {
    text.strip_prefix(' ').unwrap_or(text)
}

/// Appends subtitle blocks to a destination.
pub struct SubtitleWriter<W: Write> {
    out: W,
}

impl SubtitleWriter<BufWriter<File>> {
    /// Opens `path` for appending, creating it if needed. Existing content
    /// is kept.
    pub fn open_append(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> SubtitleWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn append(&mut self, record: &SubtitleRecord) -> io::Result<()> {
        writeln!(self.out, "{}", record.index)?;
        writeln!(self.out, "{} --> {}", record.start, record.end)?;
        writeln!(self.out, "{}", record.text)?;
        writeln!(self.out)?;
        Ok(())
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn segment(index: usize, start: f64, end: f64, text: &str) -> TranscriptSegment {
        TranscriptSegment {
            index,
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn formats_segment_with_leading_space() {
        let record = format_segment(&segment(0, 5.7, 9.2, " Hello world"));
        assert_eq!(
            record,
            SubtitleRecord {
                index: 1,
                start: "0:00:05,000".to_string(),
                end: "0:00:09,000".to_string(),
                text: "Hello world".to_string(),
            }
        );
    }

    #[test]
    fn formats_segment_past_one_hour() {
        let record = format_segment(&segment(4, 3661.0, 3662.0, "Test"));
        assert_eq!(record.index, 5);
        assert_eq!(record.start, "1:01:01,000");
        assert_eq!(record.end, "1:01:02,000");
        assert_eq!(record.text, "Test");
    }

    #[rstest]
    #[case(0.0, "0:00:00,000")]
    #[case(0.999, "0:00:00,000")]
    #[case(59.99, "0:00:59,000")]
    #[case(60.0, "0:01:00,000")]
    #[case(3599.5, "0:59:59,000")]
    #[case(36000.0, "10:00:00,000")]
    #[case(90061.0, "25:01:01,000")]
    #[case(-3.0, "0:00:00,000")]
    fn timestamps(#[case] seconds: f64, #[case] expected: &str) {
        assert_eq!(format_timestamp(seconds), expected);
    }

    fn parse_timestamp(stamp: &str) -> u64 {
        let (clock, millis) = stamp.split_once(',').unwrap();
        assert_eq!(millis, "000");
        let parts: Vec<u64> = clock.split(':').map(|p| p.parse().unwrap()).collect();
        parts[0] * 3600 + parts[1] * 60 + parts[2]
    }

    #[test]
    fn reformatting_a_timestamp_gives_it_back() {
        for seconds in [0.0, 1.0, 61.5, 3600.0, 86_399.9, 86_400.0, 100_000.25] {
            let once = format_timestamp(seconds);
            let whole = parse_timestamp(&once);
            assert_eq!(whole, seconds.trunc() as u64);
            assert_eq!(format_timestamp(whole as f64), once);
        }
        assert_eq!(format_timestamp(86_400.0), "24:00:00,000");
        assert_eq!(format_timestamp(100_000.25), "27:46:40,000");
    }

    #[rstest]
    #[case(" Hello", "Hello")]
    #[case("  two spaces", " two spaces")]
    #[case("no space", "no space")]
    #[case("trailing ", "trailing ")]
    #[case("", "")]
    #[case(" ", "")]
    #[case("\tTab", "\tTab")]
    #[case(" 안녕하세요", "안녕하세요")]
    fn cleans_one_leading_space(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(clean_text(text), expected);
    }

    #[test]
    fn passes_malformed_segments_through() {
        let record = format_segment(&segment(2, 10.0, 4.0, ""));
        assert_eq!(record.index, 3);
        assert_eq!(record.start, "0:00:10,000");
        assert_eq!(record.end, "0:00:04,000");
        assert_eq!(record.text, "");
    }

    #[test]
    fn writes_srt_blocks() {
        let mut writer = SubtitleWriter::new(Vec::new());
        writer
            .append(&format_segment(&segment(0, 0.0, 2.5, " First")))
            .unwrap();
        writer
            .append(&format_segment(&segment(1, 2.5, 4.0, "Second")))
            .unwrap();
        let out = String::from_utf8(writer.finish().unwrap()).unwrap();

        assert_eq!(
            out,
            "1\n0:00:00,000 --> 0:00:02,000\nFirst\n\n\
             2\n0:00:02,000 --> 0:00:04,000\nSecond\n\n"
        );
    }

    #[test]
    fn open_append_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video.srt");
        let record = format_segment(&segment(0, 1.0, 2.0, " Hi"));

        for _ in 0..2 {
            let mut writer = SubtitleWriter::open_append(&path).unwrap();
            writer.append(&record).unwrap();
            writer.finish().unwrap();
        }

        let block = "1\n0:00:01,000 --> 0:00:02,000\nHi\n\n";
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            format!("{block}{block}")
        );
    }
}
