//! Index page rendering
//!
//! The template is plain HTML with `{{name}}` placeholders. It is read from
//! disk on every request when a path is configured, so it can be edited
//! without a restart; otherwise the page compiled into the binary is used.

use std::borrow::Cow;
use std::path::Path;

use daily_core::DailyRecord;

/// Page served when no template path is configured
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/index.html");

/// Load the index template
pub async fn load_template(path: Option<&Path>) -> std::io::Result<Cow<'static, str>> {
    match path {
        Some(path) => Ok(Cow::Owned(tokio::fs::read_to_string(path).await?)),
        None => Ok(Cow::Borrowed(DEFAULT_TEMPLATE)),
    }
}

/// Fill the template with today's record
///
/// Placeholders: `rows`, `cols`, `date`, `date_packed`, `score`, `moves`,
/// `pieces`, `board` (JSON array of symbols), `board_html` (one `div` per
/// row) and `mount`. Unknown placeholders are left untouched.
pub fn render(template: &str, record: &DailyRecord, mount: &str) -> serde_json::Result<String> {
    let size = record.board.size();
    let board_json = serde_json::to_string(&record.board)?;

    let values: [(&str, String); 10] = [
        ("rows", size.rows().to_string()),
        ("cols", size.cols().to_string()),
        ("date", record.date.to_string()),
        ("date_packed", record.date.packed().to_string()),
        ("score", record.score.to_string()),
        ("moves", optional(record.moves)),
        ("pieces", optional(record.pieces)),
        ("board", board_json),
        ("board_html", board_html(record)),
        ("mount", escape_html(mount)),
    ];

    let mut page = template.to_string();
    for (name, value) in values {
        page = page.replace(&format!("{{{{{name}}}}}"), &value);
    }
    Ok(page)
}

fn optional(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn board_html(record: &DailyRecord) -> String {
    let mut html = String::new();
    for row in record.board.rows() {
        html.push_str("<div class=\"row\">");
        for piece in row {
            html.push_str("<span class=\"cell\">");
            html.push_str(piece.symbol());
            html.push_str("</span>");
        }
        html.push_str("</div>\n");
    }
    html
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use daily_core::{BoardSize, GameDate, Submission};

    fn record() -> DailyRecord {
        let size = BoardSize::new(2, 3).unwrap();
        DailyRecord::fresh(GameDate::from_packed(20240309), size)
    }

    #[test]
    fn test_render_fresh_record() {
        let page = render(
            "{{date}} {{date_packed}} {{rows}}x{{cols}} {{score}}/{{moves}}/{{pieces}}",
            &record(),
            "",
        )
        .unwrap();
        assert_eq!(page, "2024-03-09 20240309 2x3 0/-/-");
    }

    #[test]
    fn test_render_scores_and_board() {
        let mut record = record();
        record.accept_first(&Submission::new(12, 4, 0));

        let page = render("{{score}} {{moves}} {{pieces}}|{{board}}", &record, "").unwrap();
        let (scores, board) = page.split_once('|').unwrap();
        assert_eq!(scores, "12 4 0");

        let symbols: Vec<String> = serde_json::from_str(board).unwrap();
        assert_eq!(symbols.len(), 6);
    }

    #[test]
    fn test_board_html_has_one_div_per_row() {
        let page = render("{{board_html}}", &record(), "").unwrap();
        assert_eq!(page.matches("<div class=\"row\">").count(), 2);
        assert_eq!(page.matches("<span class=\"cell\">").count(), 6);
    }

    #[test]
    fn test_mount_is_escaped_and_unknown_left_alone() {
        let page = render("{{mount}} {{nope}}", &record(), "/a<b").unwrap();
        assert_eq!(page, "/a&lt;b {{nope}}");
    }

    #[tokio::test]
    async fn test_load_default_and_missing_template() {
        let template = load_template(None).await.unwrap();
        assert!(template.contains("{{board_html}}"));

        let missing = load_template(Some(Path::new("/nonexistent/index.html"))).await;
        assert!(missing.is_err());
    }
}
