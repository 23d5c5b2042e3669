//! Whole-project evaluation tests: reference shifting, cross-table reads,
//! error poisoning and the definition-order pass semantics

use canvas_sheets::prelude::*;

fn project_with_columns() -> Project {
    let mut project = Project::new();
    project.add_sheet("Sheet 1", "sheet_1");
    let table = project
        .add_table("sheet_1", "table_1", "table_1", 0.0, 0.0, 3, 3, None)
        .unwrap();
    table.set_cells([
        ("body[A0]", 1.0),
        ("body[A1]", 2.0),
        ("body[A2]", 3.0),
        ("body[B0]", 10.0),
        ("body[B1]", 20.0),
        ("body[B2]", 30.0),
    ]);
    project
}

#[test]
fn relative_references_shift_per_target_cell() {
    let mut project = project_with_columns();
    project
        .table_mut("table_1")
        .unwrap()
        .set_formula("body[C0:C2]", "=A0+B0")
        .unwrap();

    project.apply_formulas().unwrap();

    let table = project.table("table_1").unwrap();
    assert_eq!(table.get(0, 2), CellValue::Number(11.0));
    assert_eq!(table.get(1, 2), CellValue::Number(22.0));
    assert_eq!(table.get(2, 2), CellValue::Number(33.0));
}

#[test]
fn absolute_references_stay_pinned() {
    let mut project = project_with_columns();
    project
        .table_mut("table_1")
        .unwrap()
        .set_formula("body[C0:C2]", "=$A$0+B0")
        .unwrap();

    project.apply_formulas().unwrap();

    let table = project.table("table_1").unwrap();
    assert_eq!(table.get(0, 2), CellValue::Number(11.0));
    assert_eq!(table.get(1, 2), CellValue::Number(21.0));
    assert_eq!(table.get(2, 2), CellValue::Number(31.0));
}

#[test]
fn cross_table_reference_reads_foreign_cell() {
    let mut project = Project::new();
    project.add_sheet("Sheet 1", "sheet_1");
    let table_1 = project
        .add_table("sheet_1", "table_1", "table_1", 0.0, 0.0, 2, 2, None)
        .unwrap();
    table_1.set_cells([("body[A0]", 5.0)]);

    let table_2 = project
        .add_table("sheet_1", "table_2", "table_2", 0.0, 0.0, 2, 2, None)
        .unwrap();
    table_2.set_formula("body[B0]", "=table_1::A0*2").unwrap();

    project.apply_formulas().unwrap();

    assert_eq!(
        project.table("table_2").unwrap().get(0, 1),
        CellValue::Number(10.0)
    );
}

#[test]
fn cross_table_column_and_row_references() {
    let mut project = project_with_columns();
    let table_2 = project
        .add_table("sheet_1", "table_2", "table_2", 0.0, 0.0, 2, 2, None)
        .unwrap();
    table_2.set_formula("body[A0]", "=SUM(table_1::A)").unwrap();
    table_2.set_formula("body[A1]", "=SUM(table_1::1)").unwrap();

    project.apply_formulas().unwrap();

    let table_2 = project.table("table_2").unwrap();
    assert_eq!(table_2.get(0, 0), CellValue::Number(6.0));
    assert_eq!(table_2.get(1, 0), CellValue::Number(22.0));
}

#[test]
fn column_reference_function_form() {
    let mut project = project_with_columns();
    project
        .table_mut("table_1")
        .unwrap()
        .set_formula("body[C0]", "=SUM(col(A))")
        .unwrap();

    project.apply_formulas().unwrap();

    assert_eq!(
        project.table("table_1").unwrap().get(0, 2),
        CellValue::Number(6.0)
    );
}

#[test]
fn sum_over_range_and_mean_alias() {
    let mut project = project_with_columns();
    let table = project.table_mut("table_1").unwrap();
    table.set_formula("body[C0]", "=SUM(B0:B2)").unwrap();
    table.set_formula("body[C1]", "=MEAN(B0:B2)").unwrap();

    project.apply_formulas().unwrap();

    let table = project.table("table_1").unwrap();
    assert_eq!(table.get(0, 2), CellValue::Number(60.0));
    assert_eq!(table.get(1, 2), CellValue::Number(20.0));
}

#[test]
fn unparsable_formula_poisons_whole_target_range() {
    let mut project = project_with_columns();
    project
        .table_mut("table_1")
        .unwrap()
        .set_formula("body[D0:D2]", "=SUM((")
        .unwrap();

    project.apply_formulas().unwrap();

    let table = project.table("table_1").unwrap();
    assert_eq!(table.get(0, 3), CellValue::Error);
    assert_eq!(table.get(1, 3), CellValue::Error);
    assert_eq!(table.get(2, 3), CellValue::Error);
}

#[test]
fn evaluation_error_poisons_only_its_cell() {
    let mut project = Project::new();
    project.add_sheet("Sheet 1", "sheet_1");
    let table = project
        .add_table("sheet_1", "table_1", "table_1", 0.0, 0.0, 3, 3, None)
        .unwrap();
    table.set_cells([
        ("body[A0]", 0.0),
        ("body[A1]", 1.0),
        ("body[A2]", 2.0),
    ]);
    table.set_formula("body[C0:C2]", "=1/A0").unwrap();

    project.apply_formulas().unwrap();

    let table = project.table("table_1").unwrap();
    assert_eq!(table.get(0, 2), CellValue::Error);
    assert_eq!(table.get(1, 2), CellValue::Number(1.0));
    assert_eq!(table.get(2, 2), CellValue::Number(0.5));
}

#[test]
fn apply_formulas_is_idempotent_without_mutation() {
    let mut project = project_with_columns();
    {
        let table = project.table_mut("table_1").unwrap();
        table.set_formula("body[C0:C2]", "=A0*B0").unwrap();
        table.set_formula("body[D0]", "=SUM(C0:C2)").unwrap();
    }
    project
        .add_summary_table(
            "sheet_1",
            "summary_1",
            "summary_1",
            "table_1",
            None,
            vec![0],
            vec![ValueColumn {
                column: 1,
                agg: Aggregation::Sum,
            }],
        )
        .unwrap();

    project.apply_formulas().unwrap();
    project.apply_formulas().unwrap();
    let first = project.to_json();
    project.apply_formulas().unwrap();
    let second = project.to_json();

    assert_eq!(first, second);
}

#[test]
fn definition_order_reads_previous_pass_values() {
    let mut project = Project::new();
    project.add_sheet("Sheet 1", "sheet_1");
    let table = project
        .add_table("sheet_1", "table_1", "table_1", 0.0, 0.0, 1, 3, None)
        .unwrap();
    table.set_cells([("body[A0]", 1.0), ("body[B0]", 0.0)]);

    // C0 is defined before the B0 formula, so each pass computes C0 from
    // B0's previous-pass value.
    table.set_formula("body[C0]", "=B0+1").unwrap();
    table.set_formula("body[B0]", "=A0*2").unwrap();

    project.apply_formulas().unwrap();
    {
        let table = project.table("table_1").unwrap();
        assert_eq!(table.get(0, 2), CellValue::Number(1.0));
        assert_eq!(table.get(0, 1), CellValue::Number(2.0));
    }

    // A second pass reaches the fixed point.
    project.apply_formulas().unwrap();
    let table = project.table("table_1").unwrap();
    assert_eq!(table.get(0, 2), CellValue::Number(3.0));
}

#[test]
fn redefining_a_formula_moves_it_to_the_end_of_the_pass() {
    let mut project = Project::new();
    project.add_sheet("Sheet 1", "sheet_1");
    let table = project
        .add_table("sheet_1", "table_1", "table_1", 0.0, 0.0, 1, 2, None)
        .unwrap();
    table.set_formula("body[A0]", "=1").unwrap();
    table.set_formula("body[B0]", "=A0+1").unwrap();

    project.apply_formulas().unwrap();
    assert_eq!(
        project.table("table_1").unwrap().get(0, 1),
        CellValue::Number(2.0)
    );

    // Redefining A0 gives it a fresh, later order value, so B0 now runs
    // first and sees A0's previous-pass value during the next pass.
    project
        .table_mut("table_1")
        .unwrap()
        .set_formula("body[A0]", "=10")
        .unwrap();
    project.apply_formulas().unwrap();
    {
        let table = project.table("table_1").unwrap();
        assert_eq!(table.get(0, 0), CellValue::Number(10.0));
        assert_eq!(table.get(0, 1), CellValue::Number(2.0));
    }

    project.apply_formulas().unwrap();
    assert_eq!(
        project.table("table_1").unwrap().get(0, 1),
        CellValue::Number(11.0)
    );
}

#[test]
fn direct_write_clears_overlapped_formula() {
    let mut project = Project::new();
    project.add_sheet("Sheet 1", "sheet_1");
    let table = project
        .add_table("sheet_1", "table_1", "table_1", 0.0, 0.0, 2, 2, None)
        .unwrap();
    table.set_formula("body[A0]", "=1+1").unwrap();
    table.set_range("body[A0:A0]", vec![vec![5.0]], None);

    project.apply_formulas().unwrap();

    let table = project.table("table_1").unwrap();
    assert!(table.formula("body[A0]").is_none());
    assert_eq!(table.get(0, 0), CellValue::Number(5.0));
}

#[test]
fn clearing_a_formula_stops_reevaluation() {
    let mut project = Project::new();
    project.add_sheet("Sheet 1", "sheet_1");
    let table = project
        .add_table("sheet_1", "table_1", "table_1", 0.0, 0.0, 1, 1, None)
        .unwrap();
    table.set_formula("body[A0]", "=2+3").unwrap();

    project.apply_formulas().unwrap();
    assert_eq!(
        project.table("table_1").unwrap().get(0, 0),
        CellValue::Number(5.0)
    );

    let table = project.table_mut("table_1").unwrap();
    table.set_formula("body[A0]", "").unwrap();
    table.store_result("body[A0]", CellValue::Number(42.0));

    let stats = project.apply_formulas().unwrap();
    assert_eq!(stats.formula_count, 0);
    assert_eq!(
        project.table("table_1").unwrap().get(0, 0),
        CellValue::Number(42.0)
    );
}

#[test]
fn grid_growth_and_minimize_roundtrip() {
    let mut project = Project::new();
    project.add_sheet("Sheet 1", "sheet_1");
    let table = project
        .add_table("sheet_1", "table_1", "table_1", 0.0, 0.0, 2, 2, None)
        .unwrap();

    table.set(3, 4, 1.0);
    assert_eq!(table.grid_spec().body_rows, 4);
    assert_eq!(table.grid_spec().body_cols, 5);
    assert_eq!(table.rect().width, 5.0 * canvas_sheets::CELL_WIDTH);
    assert_eq!(table.rect().height, 4.0 * canvas_sheets::CELL_HEIGHT);

    table.minimize();
    assert_eq!(table.grid_spec().body_rows, 4);
    assert_eq!(table.grid_spec().body_cols, 5);

    // Clearing the far cell lets minimize shrink to the remaining content
    table.store_result("body[E3]", CellValue::Empty);
    table.set(0, 0, 2.0);
    table.minimize();
    assert_eq!(table.grid_spec().body_rows, 1);
    assert_eq!(table.grid_spec().body_cols, 1);
}

#[test]
fn if_with_comparison_condition() {
    let mut project = project_with_columns();
    project
        .table_mut("table_1")
        .unwrap()
        .set_formula("body[C0:C2]", "=IF(A0>1,\"big\",\"small\")")
        .unwrap();

    project.apply_formulas().unwrap();

    let table = project.table("table_1").unwrap();
    assert_eq!(table.get(0, 2), CellValue::from("small"));
    assert_eq!(table.get(1, 2), CellValue::from("big"));
    assert_eq!(table.get(2, 2), CellValue::from("big"));
}

#[test]
fn formula_on_unknown_table_reference_writes_sentinel() {
    let mut project = project_with_columns();
    project
        .table_mut("table_1")
        .unwrap()
        .set_formula("body[C0]", "=missing::A0")
        .unwrap();

    let stats = project.apply_formulas().unwrap();
    assert_eq!(stats.errors, 1);
    assert_eq!(project.table("table_1").unwrap().get(0, 2), CellValue::Error);
}

#[test]
fn arity_error_writes_sentinel() {
    let mut project = project_with_columns();
    project
        .table_mut("table_1")
        .unwrap()
        .set_formula("body[C0]", "=NOT(A0,B0)")
        .unwrap();

    project.apply_formulas().unwrap();
    assert_eq!(project.table("table_1").unwrap().get(0, 2), CellValue::Error);
}

#[test]
fn summary_runs_interleaved_with_formulas_by_order() {
    let mut project = Project::new();
    project.add_sheet("Sheet 1", "sheet_1");
    let table = project
        .add_table("sheet_1", "table_1", "table_1", 0.0, 0.0, 2, 2, None)
        .unwrap();
    table.set_cells([
        ("body[A0]", CellValue::from("G")),
        ("body[A1]", CellValue::from("G")),
    ]);
    // B column is produced by a formula defined before the summary, so the
    // summary sees the freshly computed values within the same pass.
    table.set_formula("body[B0:B1]", "=2+2").unwrap();

    project
        .add_summary_table(
            "sheet_1",
            "summary_1",
            "summary_1",
            "table_1",
            None,
            vec![0],
            vec![ValueColumn {
                column: 1,
                agg: Aggregation::Sum,
            }],
        )
        .unwrap();

    let stats = project.apply_formulas().unwrap();
    assert_eq!(stats.summary_count, 1);
    assert_eq!(
        project.table("summary_1").unwrap().get(0, 1),
        CellValue::Number(8.0)
    );
}
