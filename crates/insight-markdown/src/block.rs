// File: crates/insight-markdown/src/block.rs
// Summary: Line scanner for headings, rules, tables, bullet lists and paragraphs.

use tracing::trace;

/// Column alignment taken from a table separator row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn from_token(token: &str) -> Self {
        let starts = token.starts_with(':');
        let ends = token.ends_with(':');
        // A lone ":" counts as both ends.
        if starts && ends {
            Align::Center
        } else if ends {
            Align::Right
        } else {
            Align::Left
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// Scan lines of inline-rendered text into block HTML.
pub fn render_blocks(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect();
    let mut out = String::with_capacity(text.len() + lines.len() * 9);
    let mut in_list = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some((level, content)) = heading(line) {
            close_list(&mut out, &mut in_list);
            out.push_str(&format!("<h{level}>{content}</h{level}>"));
            i += 1;
            continue;
        }

        if is_rule(line) {
            close_list(&mut out, &mut in_list);
            out.push_str("<hr/>");
            i += 1;
            continue;
        }

        if line.contains('|') && lines.get(i + 1).is_some_and(|next| is_separator_row(next)) {
            close_list(&mut out, &mut in_list);
            i = render_table(&lines, i, &mut out);
            continue;
        }

        if let Some(item) = list_item(line) {
            if !in_list {
                out.push_str("<ul>");
                in_list = true;
            }
            out.push_str(&format!("<li>{item}</li>"));
            i += 1;
            continue;
        }

        close_list(&mut out, &mut in_list);
        if line.trim().is_empty() {
            out.push_str("<br/>");
        } else {
            out.push_str(&format!("<p>{line}</p>"));
        }
        i += 1;
    }

    close_list(&mut out, &mut in_list);
    out
}

fn close_list(out: &mut String, in_list: &mut bool) {
    if *in_list {
        out.push_str("</ul>");
        *in_list = false;
    }
}

/// `#` to `######` followed by whitespace.
fn heading(line: &str) -> Option<(usize, &str)> {
    let s = line.trim_start();
    let level = s.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &s[level..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((level, rest.trim_start()))
}

/// Three or more hyphens and nothing else.
fn is_rule(line: &str) -> bool {
    let s = line.trim();
    s.len() >= 3 && s.bytes().all(|b| b == b'-')
}

/// `-` or `*` followed by whitespace; returns the item text.
fn list_item(line: &str) -> Option<&str> {
    let s = line.trim_start();
    let rest = s.strip_prefix(['-', '*'])?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim_start())
}

/// Optional whitespace and pipe framing around a run of `:`, `-`, `|` and spaces.
pub fn is_separator_row(line: &str) -> bool {
    let is_cell_char = |c: char| matches!(c, ':' | '-' | '|' | ' ');
    let s = line.trim_start();
    let s = s.strip_prefix('|').unwrap_or(s).trim_start();
    if s.is_empty() {
        // Only framing left; a space or pipe can still serve as the run.
        return line.contains([' ', '|']);
    }
    let run = s.find(|c: char| !is_cell_char(c)).unwrap_or(s.len());
    if run == 0 {
        return false;
    }
    let tail = s[run..].trim_start();
    tail.strip_prefix('|').unwrap_or(tail).trim_start().is_empty()
}

/// Trim, drop one leading and one trailing pipe, split on `|`, trim each cell.
pub fn split_cells(line: &str) -> Vec<&str> {
    let s = line.trim();
    let s = s.strip_prefix('|').unwrap_or(s);
    let s = s.strip_suffix('|').unwrap_or(s);
    s.split('|').map(str::trim).collect()
}

/// Render the table whose header is `lines[start]`; returns the index of the
/// first line after it. The line that ends the body is left for the caller.
fn render_table(lines: &[&str], start: usize, out: &mut String) -> usize {
    let header = split_cells(lines[start]);
    let aligns: Vec<Align> = split_cells(lines[start + 1]).into_iter().map(Align::from_token).collect();
    let align_at = |ci: usize| aligns.get(ci).copied().unwrap_or(Align::Left).as_css();

    let mut rows: Vec<Vec<&str>> = Vec::new();
    let mut next = start + 2;
    while let Some(line) = lines.get(next) {
        if !line.contains('|') {
            break;
        }
        let cells = split_cells(line);
        if cells.len() == 1 && cells[0].is_empty() {
            break;
        }
        rows.push(cells);
        next += 1;
    }
    trace!(columns = header.len(), rows = rows.len(), "table");

    out.push_str(r#"<table class="md-table"><thead><tr>"#);
    for (ci, cell) in header.iter().enumerate() {
        out.push_str(&format!(r#"<th style="text-align:{}">{}</th>"#, align_at(ci), cell));
    }
    out.push_str("</tr></thead><tbody>");
    for row in &rows {
        out.push_str("<tr>");
        for ci in 0..header.len() {
            let cell = row.get(ci).copied().unwrap_or("");
            out.push_str(&format!(r#"<td style="text-align:{}">{}</td>"#, align_at(ci), cell));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    next
}
