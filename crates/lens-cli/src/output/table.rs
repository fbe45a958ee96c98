//! Aligned plain-text tables for `--format table`.

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Narrowest a column is squeezed to when fitting the terminal.
const MIN_COLUMN_WIDTH: usize = 6;

/// Render an aligned table. Numeric cells are right-aligned.
#[must_use]
pub fn render_rows(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_width(cell))
                .max()
                .unwrap_or(0)
                .max(display_width(header))
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| {
            let text = truncate_text(header, *width);
            format_cell(&text, *width, false)
        })
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(display_width(&header_line));

    let row_lines = rows
        .iter()
        .map(|row| {
            widths
                .iter()
                .enumerate()
                .map(|(index, width)| {
                    let value = row.get(index).cloned().unwrap_or_else(|| "-".to_string());
                    let truncated = truncate_text(&value, *width);
                    let numeric = looks_numeric(&truncated);
                    let cell = format_cell(&truncated, *width, numeric);
                    if options.color && numeric {
                        colorize_signed(&cell)
                    } else {
                        cell
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>();

    let mut lines = Vec::with_capacity(2 + row_lines.len());
    lines.push(header_line);
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > display_width(headers[*idx]).max(MIN_COLUMN_WIDTH))
            .max_by_key(|(idx, width)| (**width, std::cmp::Reverse(*idx)))
            .map(|(idx, _)| idx);

        let Some(idx) = candidate else {
            break;
        };

        widths[idx] -= 1;
        total -= 1;
    }
}

/// Width in characters. Cyrillic labels are multi-byte, so byte length overcounts.
fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn truncate_text(value: &str, width: usize) -> String {
    if display_width(value) <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }

    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed.chars().any(|ch| ch.is_ascii_digit())
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ',' | 'e' | 'E'))
}

fn format_cell(value: &str, width: usize, numeric: bool) -> String {
    let pad = width.saturating_sub(display_width(value));
    if numeric {
        format!("{}{}", " ".repeat(pad), value)
    } else {
        format!("{}{}", value, " ".repeat(pad))
    }
}

/// Green for explicit gains, red for losses. Padding is applied first.
fn colorize_signed(cell: &str) -> String {
    let code = match cell.trim_start().chars().next() {
        Some('+') => "32",
        Some('-') => "31",
        _ => return cell.to_string(),
    };
    format!("\u{1b}[{code}m{cell}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn numeric_cells_align_right() {
        let table = render_rows(
            &["brand", "revenue"],
            &[
                vec!["Nivea".to_string(), "1200".to_string()],
                vec!["Dove".to_string(), "35".to_string()],
            ],
            PLAIN,
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].ends_with("   1200"));
        assert!(lines[3].ends_with("     35"));
    }

    #[test]
    fn cyrillic_cells_pad_by_characters() {
        let table = render_rows(&["день"], &[vec!["Пн".to_string()]], PLAIN);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(display_width(lines[0]), display_width(lines[2]));
    }

    #[test]
    fn fit_widths_shrinks_widest_column() {
        let mut widths = vec![30, 8];
        fit_widths(&mut widths, &["name", "value"], Some(30));
        assert_eq!(widths, vec![20, 8]);
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate_text("Увлажняющий крем", 8), "Увлажня…");
        assert_eq!(truncate_text("short", 8), "short");
    }

    #[test]
    fn signed_numbers_are_colored() {
        assert!(colorize_signed("   -12").starts_with("\u{1b}[31m"));
        assert!(colorize_signed("+4.5").starts_with("\u{1b}[32m"));
        assert_eq!(colorize_signed("  12"), "  12");
    }

    #[test]
    fn text_is_not_numeric() {
        assert!(looks_numeric("-3.5"));
        assert!(!looks_numeric("-"));
        assert!(!looks_numeric("Nivea"));
    }
}
