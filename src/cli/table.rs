//! Tabular rendering of saved patterns

use std::fmt::Write;

use findme::Pattern;

use super::terminal::Style;

const HEADERS: [&str; 4] = ["Alias", "Pattern", "Files only", "Directories only"];

/// Renders patterns as an aligned table, one row per pattern.
pub fn render(patterns: &[Pattern], style: Style) -> String {
    let widths: [usize; 4] = [
        column_width(HEADERS[0], patterns.iter().map(|p| p.alias().chars().count())),
        column_width(HEADERS[1], patterns.iter().map(|p| p.expression().chars().count())),
        column_width(HEADERS[2], patterns.iter().map(|p| flag_len(p.files_only))),
        column_width(HEADERS[3], patterns.iter().map(|p| flag_len(p.directories_only))),
    ];

    let mut out = String::new();

    for (header, width) in HEADERS.iter().zip(widths) {
        let _ = write!(out, "{}  ", style.header(&format!("{header:<width$}")));
    }
    out.push('\n');

    for width in widths {
        let _ = write!(out, "{:-<width$}  ", "");
    }
    out.push('\n');

    let [alias_width, expression_width, files_width, directories_width] = widths;
    for pattern in patterns {
        let _ = writeln!(
            out,
            "{:<alias_width$}  {:<expression_width$}  {}  {}  ",
            pattern.alias(),
            pattern.expression(),
            style.flag(pattern.files_only, files_width),
            style.flag(pattern.directories_only, directories_width),
        );
    }

    out
}

fn column_width(header: &str, cells: impl Iterator<Item = usize>) -> usize {
    cells.max().unwrap_or(0).max(header.len())
}

const fn flag_len(value: bool) -> usize {
    if value { "true".len() } else { "false".len() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_patterns() -> Vec<Pattern> {
        vec![
            Pattern::new("py", r"\.py$").unwrap().only_files(),
            Pattern::new("caches", r"\.(py)?cache").unwrap().only_directories(),
        ]
    }

    #[test]
    fn renders_header_separator_and_rows() {
        let rendered = render(&test_patterns(), Style::plain());
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Alias"));
        assert!(lines[0].contains("Directories only"));
        assert!(lines[1].starts_with("------"));
        assert!(lines[2].contains("py") && lines[2].contains(r"\.py$"));
        assert!(lines[3].contains("caches") && lines[3].contains(r"\.(py)?cache"));
    }

    #[test]
    fn plain_columns_line_up() {
        let rendered = render(&test_patterns(), Style::plain());

        assert_eq!(
            rendered,
            "\
Alias   Pattern       Files only  Directories only  
------  ------------  ----------  ----------------  
py      \\.py$         true        false             
caches  \\.(py)?cache  false       true              
"
        );
    }

    #[test]
    fn empty_input_renders_header_only() {
        assert_eq!(render(&[], Style::plain()).lines().count(), 2);
    }
}
