use serde::Serialize;
use std::io::Write;

/// Widest a cell renders before truncation. Profile fields (roles, strength
/// lists) can run long; the table stays scannable either way.
const MAX_CELL_WIDTH: usize = 40;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    write_json(&mut stdout.lock(), value)
}

pub fn print_table(headers: &[&str], rows: &[Vec<String>]) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    write_table(&mut stdout.lock(), headers, rows)
}

fn write_json<W: Write, T: Serialize>(w: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *w, value)?;
    writeln!(w)?;
    Ok(())
}

/// Render rows as a padded table with a dashed header rule. Cells wider than
/// [`MAX_CELL_WIDTH`] are clipped with an ellipsis; the last column is never
/// padded, so lines carry no trailing whitespace.
fn write_table<W: Write>(w: &mut W, headers: &[&str], rows: &[Vec<String>]) -> anyhow::Result<()> {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| clip(cell)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    write_row(w, &mut headers.iter().map(|h| h.to_string()), &widths)?;
    let rule: Vec<String> = widths.iter().map(|&n| "-".repeat(n)).collect();
    write_row(w, &mut rule.into_iter(), &widths)?;
    for row in rows {
        write_row(w, &mut row.into_iter(), &widths)?;
    }
    Ok(())
}

fn write_row<W: Write>(
    w: &mut W,
    cells: &mut dyn Iterator<Item = String>,
    widths: &[usize],
) -> anyhow::Result<()> {
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(&cell);
        if i + 1 < widths.len() {
            for _ in cell.chars().count()..widths[i] {
                line.push(' ');
            }
        }
    }
    writeln!(w, "{}", line.trim_end())?;
    Ok(())
}

fn clip(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell.to_string();
    }
    let mut clipped: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
    clipped.push('…');
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
        let mut buf = Vec::new();
        write_table(&mut buf, headers, rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn columns_align_on_widest_cell() {
        let out = render(
            &["ID", "NAME"],
            &[
                vec!["leo-kim".into(), "Leo Kim".into()],
                vec!["x".into(), "Y".into()],
            ],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID       NAME");
        assert_eq!(lines[1], "-------  -------");
        assert_eq!(lines[2], "leo-kim  Leo Kim");
        assert_eq!(lines[3], "x        Y");
    }

    #[test]
    fn long_cells_are_clipped_with_ellipsis() {
        let long = "a".repeat(MAX_CELL_WIDTH + 20);
        let out = render(&["ROLE"], &[vec![long]]);
        let row = out.lines().nth(2).unwrap();
        assert_eq!(row.chars().count(), MAX_CELL_WIDTH);
        assert!(row.ends_with('…'));
    }

    #[test]
    fn lines_carry_no_trailing_whitespace() {
        let out = render(
            &["ID", "NAME"],
            &[vec!["leo-kim".into(), "L".into()]],
        );
        for line in out.lines() {
            assert_eq!(line, line.trim_end());
        }
    }

    #[test]
    fn json_writer_emits_pretty_output_with_newline() {
        let mut buf = Vec::new();
        write_json(&mut buf, &serde_json::json!({"id": "leo-kim"})).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("\"id\": \"leo-kim\""));
        assert!(out.ends_with('\n'));
    }
}
