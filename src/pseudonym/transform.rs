use crate::error::Error;
use crate::types::{CellValue, ColumnAssignments, Result, Table};

use super::SessionMapper;

/// Replace every non-missing cell of each assigned column with its pseudonym,
/// in place. Missing cells and unassigned columns pass through untouched, and
/// row count, row order, and column order are preserved.
///
/// All assigned column names are checked against the table before any cell is
/// rewritten; an unknown name fails the whole call with the table unmodified.
/// One mapper serves every assigned column, so a value repeated across
/// columns that share a prefix receives one label.
pub fn pseudonymize(
    table: &mut Table,
    assignments: &ColumnAssignments,
    mapper: &mut SessionMapper,
) -> Result<()> {
    for name in assignments.columns() {
        if !table.has_column(name) {
            return Err(Error::UnknownColumn(name.to_string()));
        }
    }

    for column in table.columns_mut() {
        let Some(prefix) = assignments.prefix_for(column.name()) else {
            continue;
        };
        for cell in column.cells_mut() {
            let Some(text) = cell.canonical_string() else {
                continue;
            };
            *cell = CellValue::Text(mapper.map(prefix, &text));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Column, Prefix};

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn vendor_table() -> Table {
        Table::new(vec![
            Column::new("Vendor", vec![text("Acme"), text("Boeing"), text("Acme")]),
            Column::new(
                "Amount",
                vec![
                    CellValue::Integer(100),
                    CellValue::Integer(250),
                    CellValue::Integer(75),
                ],
            ),
        ])
    }

    fn vendor_assignment() -> ColumnAssignments {
        let mut assignments = ColumnAssignments::new();
        assignments.assign("Vendor", Prefix::new("Vendor").unwrap());
        assignments
    }

    #[test]
    fn test_repeated_values_share_a_label() {
        let mut table = vendor_table();
        let mut mapper = SessionMapper::from_seed(1);
        pseudonymize(&mut table, &vendor_assignment(), &mut mapper).unwrap();

        let cells = table.column("Vendor").unwrap().cells();
        assert_eq!(cells[0], cells[2]);
        assert_ne!(cells[0], cells[1]);
        for cell in cells {
            let label = cell.canonical_string().unwrap();
            assert!(label.starts_with("Vendor_"), "unexpected label: {label}");
        }
    }

    #[test]
    fn test_unassigned_columns_untouched() {
        let mut table = vendor_table();
        let amount_before = table.column("Amount").unwrap().clone();
        let mut mapper = SessionMapper::from_seed(2);
        pseudonymize(&mut table, &vendor_assignment(), &mut mapper).unwrap();

        assert_eq!(table.column("Amount").unwrap(), &amount_before);
        assert_eq!(table.column_names(), vec!["Vendor", "Amount"]);
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_missing_cells_pass_through() {
        let mut table = Table::new(vec![Column::new(
            "Vendor",
            vec![text("Acme"), CellValue::Missing, text("Boeing")],
        )]);
        let mut mapper = SessionMapper::from_seed(3);
        pseudonymize(&mut table, &vendor_assignment(), &mut mapper).unwrap();

        let cells = table.column("Vendor").unwrap().cells();
        assert!(cells[1].is_missing());
        assert!(!cells[0].is_missing());
        assert!(!cells[2].is_missing());
        assert_eq!(mapper.summary().get("Vendor"), Some(&2));
    }

    #[test]
    fn test_unknown_column_leaves_table_unmodified() {
        let mut table = vendor_table();
        let before = table.clone();
        let mut assignments = vendor_assignment();
        assignments.assign("Supplier", Prefix::new("Vendor").unwrap());

        let mut mapper = SessionMapper::from_seed(4);
        let err = pseudonymize(&mut table, &assignments, &mut mapper).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn(name) if name == "Supplier"));
        assert_eq!(table, before);
    }

    #[test]
    fn test_empty_assignments_change_nothing() {
        let mut table = vendor_table();
        let before = table.clone();
        let mut mapper = SessionMapper::from_seed(5);
        pseudonymize(&mut table, &ColumnAssignments::new(), &mut mapper).unwrap();
        assert_eq!(table, before);
        assert!(mapper.summary().is_empty());
    }

    #[test]
    fn test_shared_prefix_consistent_across_columns() {
        let mut table = Table::new(vec![
            Column::new("Payer", vec![text("Acme"), text("Globex")]),
            Column::new("Payee", vec![text("Initech"), text("Acme")]),
        ]);
        let mut assignments = ColumnAssignments::new();
        let org = Prefix::new("Org").unwrap();
        assignments.assign("Payer", org.clone());
        assignments.assign("Payee", org);

        let mut mapper = SessionMapper::from_seed(6);
        pseudonymize(&mut table, &assignments, &mut mapper).unwrap();

        // "Acme" appears in both columns and must get one label
        let payer = table.column("Payer").unwrap().cells();
        let payee = table.column("Payee").unwrap().cells();
        assert_eq!(payer[0], payee[1]);
        assert_eq!(mapper.summary().get("Org"), Some(&3));
    }

    #[test]
    fn test_numeric_cells_map_by_canonical_form() {
        let mut table = Table::new(vec![Column::new(
            "Account",
            vec![
                CellValue::Integer(1001),
                CellValue::Text("1001".to_string()),
                CellValue::Float(10.5),
            ],
        )]);
        let mut assignments = ColumnAssignments::new();
        assignments.assign("Account", Prefix::new("Account").unwrap());

        let mut mapper = SessionMapper::from_seed(7);
        pseudonymize(&mut table, &assignments, &mut mapper).unwrap();

        let cells = table.column("Account").unwrap().cells();
        // Integer 1001 and text "1001" share a canonical form, so one label
        assert_eq!(cells[0], cells[1]);
        assert_ne!(cells[0], cells[2]);
        assert_eq!(mapper.summary().get("Account"), Some(&2));
    }
}
