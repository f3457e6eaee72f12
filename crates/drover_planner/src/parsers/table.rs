use std::path::Path;

use crate::error::PlannerError;

/// A whitespace-delimited table whose first non-empty line is the header.
pub(crate) struct Table<'a> {
    header: Vec<&'a str>,
    rows: Vec<Row<'a>>,
}

pub(crate) struct Row<'a> {
    line: usize,
    fields: Vec<&'a str>,
}

impl<'a> Table<'a> {
    pub(crate) fn parse(content: &'a str, source: &Path) -> Result<Self, PlannerError> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let Some((_, header)) = lines.next() else {
            return Err(PlannerError::parse(source, 1, "Missing header line"));
        };
        let header = header.split_whitespace().collect::<Vec<_>>();

        let mut rows = Vec::new();
        for (line, text) in lines {
            let mut fields = text.split_whitespace().collect::<Vec<_>>();

            // Tables written with an unnamed index column carry one extra leading field
            if fields.len() == header.len() + 1 {
                fields.remove(0);
            }

            if fields.len() != header.len() {
                return Err(PlannerError::parse(
                    source,
                    line,
                    format!("Expected {} fields, found {}", header.len(), fields.len()),
                ));
            }

            rows.push(Row { line, fields });
        }

        Ok(Table { header, rows })
    }

    pub(crate) fn column(&self, name: &str, source: &Path) -> Result<usize, PlannerError> {
        self.optional_column(name)
            .ok_or_else(|| PlannerError::parse(source, 1, format!("Missing column {name}")))
    }

    pub(crate) fn optional_column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|column| *column == name)
    }

    pub(crate) fn rows(&self) -> &[Row<'a>] {
        &self.rows
    }
}

impl Row<'_> {
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn number(&self, column: usize, source: &Path) -> Result<f64, PlannerError> {
        let field = self.fields[column];
        field
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| PlannerError::parse(source, self.line, format!("Invalid number: {field}")))
    }

    pub(crate) fn text(&self, column: usize) -> &str {
        self.fields[column]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table() {
        let content = "\nA B\n1 2\n\n3 4\n";
        let table = Table::parse(content, Path::new("test")).unwrap();

        assert_eq!(table.column("B", Path::new("test")).unwrap(), 1);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[1].line(), 5);
        assert_eq!(table.rows()[1].number(0, Path::new("test")).unwrap(), 3.0);
    }

    #[test]
    fn test_index_column_is_skipped() {
        let table = Table::parse("A B\n0 1 2\n", Path::new("test")).unwrap();
        assert_eq!(table.rows()[0].text(0), "1");
    }

    #[test]
    fn test_short_row_is_rejected() {
        let error = Table::parse("A B C\n1 2\n", Path::new("test")).err().unwrap();
        assert!(matches!(error, PlannerError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_missing_column() {
        let table = Table::parse("A B\n1 2\n", Path::new("test")).unwrap();
        assert!(table.column("C", Path::new("test")).is_err());
        assert!(table.optional_column("C").is_none());
    }

    #[test]
    fn test_invalid_number() {
        let table = Table::parse("A\nx\n", Path::new("test")).unwrap();
        assert!(table.rows()[0].number(0, Path::new("test")).is_err());
    }
}
