//! CSV export of the engagement report.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::types::EngagementReport;

/// UTF-8 byte-order mark, written ahead of the CSV so spreadsheet tools
/// detect the encoding instead of assuming a legacy code page. Captions in
/// this domain are frequently Japanese and come out garbled without it.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

const HEADER: [&str; 7] = [
    "account",
    "permalink",
    "media_url",
    "like_count",
    "comment_count",
    "caption_excerpt",
    "is_outlier",
];

/// Writes the report as CSV to any writer, ranked rows in report order.
///
/// Absent media URLs become empty fields; the outlier flag renders as
/// `true`/`false`.
///
/// # Errors
///
/// Returns [`ExportError`] on any I/O or CSV failure.
pub fn write_csv<W: Write>(report: &EngagementReport, mut writer: W) -> Result<(), ExportError> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for analyzed in &report.posts {
        let post = &analyzed.post;
        let like_count = post.like_count.to_string();
        let comment_count = post.comment_count.to_string();
        csv_writer.write_record([
            post.account.as_str(),
            post.permalink.as_str(),
            post.media_url.as_deref().unwrap_or(""),
            like_count.as_str(),
            comment_count.as_str(),
            post.caption_excerpt.as_str(),
            if analyzed.is_outlier { "true" } else { "false" },
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes the report to a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ExportError`] if a directory or the file cannot be created,
/// or on any failure from [`write_csv`].
pub fn write_csv_file(report: &EngagementReport, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    write_csv(report, file)
}

#[cfg(test)]
mod tests {
    use gramlens_core::CanonicalPost;

    use super::*;
    use crate::types::{AnalyzedPost, EngagementReport};

    fn report_with(posts: Vec<AnalyzedPost>) -> EngagementReport {
        EngagementReport {
            posts,
            account_means: vec![],
        }
    }

    fn analyzed(account: &str, caption: &str, like_count: u64, is_outlier: bool) -> AnalyzedPost {
        AnalyzedPost {
            post: CanonicalPost {
                account: account.to_string(),
                permalink: format!("https://www.instagram.com/p/{account}/"),
                media_url: Some("https://cdn.example.com/a.jpg".to_string()),
                like_count,
                comment_count: 3,
                caption_excerpt: caption.to_string(),
            },
            group_mean_likes: 10.0,
            is_outlier,
        }
    }

    fn rendered(report: &EngagementReport) -> String {
        let mut buffer = Vec::new();
        write_csv(report, &mut buffer).expect("write should succeed");
        String::from_utf8(buffer).expect("output should be UTF-8")
    }

    #[test]
    fn output_starts_with_bom() {
        let mut buffer = Vec::new();
        write_csv(&report_with(vec![]), &mut buffer).unwrap();
        assert_eq!(&buffer[..3], UTF8_BOM);
    }

    #[test]
    fn empty_report_is_bom_plus_header() {
        let text = rendered(&report_with(vec![]));
        let body = text.strip_prefix('\u{feff}').expect("BOM present");
        assert_eq!(
            body,
            "account,permalink,media_url,like_count,comment_count,caption_excerpt,is_outlier\n"
        );
    }

    #[test]
    fn rows_render_in_report_order_with_flags() {
        let text = rendered(&report_with(vec![
            analyzed("a", "top post", 100, true),
            analyzed("a", "normal post", 10, false),
        ]));
        let body = text.strip_prefix('\u{feff}').unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "a,https://www.instagram.com/p/a/,https://cdn.example.com/a.jpg,100,3,top post,true"
        );
        assert_eq!(
            lines[2],
            "a,https://www.instagram.com/p/a/,https://cdn.example.com/a.jpg,10,3,normal post,false"
        );
    }

    #[test]
    fn absent_media_url_is_empty_field() {
        let mut row = analyzed("a", "caption", 5, false);
        row.post.media_url = None;
        let text = rendered(&report_with(vec![row]));
        assert!(text.contains(",https://www.instagram.com/p/a/,,5,"));
    }

    #[test]
    fn caption_with_comma_is_quoted() {
        let text = rendered(&report_with(vec![analyzed("a", "one, two", 5, false)]));
        assert!(text.contains("\"one, two\""));
    }

    #[test]
    fn multibyte_captions_survive() {
        let text = rendered(&report_with(vec![analyzed("a", "新作タイトル発売", 5, false)]));
        assert!(text.contains("新作タイトル発売"));
    }
}
