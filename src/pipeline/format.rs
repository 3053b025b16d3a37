/// Renders result rows as comma-separated text.
pub struct ResultFormatter;

impl ResultFormatter {
    pub fn format_row(row: &[f64]) -> String {
        row.iter()
            .map(|value| format!("{value:.4}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn format_index_row(indices: &[usize]) -> String {
        indices
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn format_rows(rows: &[Vec<f64>]) -> String {
        rows.iter()
            .map(|row| Self::format_row(row))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
