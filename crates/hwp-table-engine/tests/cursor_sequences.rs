//! End-to-end primitive sequences recorded against a dry-run surface.

use hwp_table_engine::recording::{Call, Primitive, RecordingSurface};
use hwp_table_engine::{
    CellAddress, CellAddresser, CellMerger, ColumnFiller, Direction, Emphasis, EngineConfig,
    MergeRange, SurfaceError, TableData, TableDimensions, TableFactory,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn moves(calls: &[Call]) -> Vec<Direction> {
    calls
        .iter()
        .filter_map(|c| match c {
            Call::Move(d) => Some(*d),
            _ => None,
        })
        .collect()
}

proptest! {
    #[test]
    fn test_move_to_issues_columns_then_rows(row in 1u32..40, col in 1u32..40) {
        let mut surface = RecordingSurface::new();
        let target = CellAddress::new(row, col).unwrap();
        let outcome = CellAddresser::new(&mut surface).move_to(target, true);
        prop_assert!(outcome.is_success());

        prop_assert_eq!(&surface.calls()[0], &Call::MoveToTableOrigin);
        let mut expected = vec![Direction::Right; (col - 1) as usize];
        expected.extend(vec![Direction::Down; (row - 1) as usize]);
        prop_assert_eq!(moves(surface.calls()), expected);
        prop_assert_eq!(surface.calls().len(), 1 + (col - 1 + row - 1) as usize);
    }
}

#[test]
fn test_fast_path_failure_tries_structured_exactly_once() {
    let mut surface = RecordingSurface::new();
    surface
        .fail_always(Primitive::CreateTableFast, SurfaceError::Busy)
        .fail_always(Primitive::CreateTableStructured, SurfaceError::Busy);
    let dims = TableDimensions::new(4, 2).unwrap();
    let outcome = TableFactory::new(&mut surface).create_with_data(dims, None, false);

    assert!(!outcome.is_success());
    assert_eq!(surface.count(Primitive::CreateTableFast), 1);
    assert_eq!(surface.count(Primitive::CreateTableStructured), 1);
}

#[test]
fn test_header_table_full_sequence() {
    let mut surface = RecordingSurface::new();
    let data = TableData::from_json(r#"[["No", "Item"], [1, "pen"]]"#).unwrap();
    let dims = TableDimensions::new(2, 2).unwrap();
    let outcome = TableFactory::new(&mut surface).create_with_data(dims, Some(&data), true);
    assert!(outcome.is_success(), "{outcome}");
    assert_eq!(outcome.message, "Created a 2x2 table and filled 2 rows (4 cells)");

    let on = Call::SetEmphasis(Emphasis::bold());
    let off = Call::SetEmphasis(Emphasis {
        bold: Some(false),
        ..Emphasis::default()
    });
    assert_eq!(
        surface.calls(),
        &[
            Call::ProbeInsideTable,
            Call::CreateTableFast { rows: 2, cols: 2 },
            Call::SelectCell,
            Call::Delete,
            on.clone(),
            Call::Insert("No".into()),
            off.clone(),
            Call::Move(Direction::Right),
            Call::SelectCell,
            Call::Delete,
            on,
            Call::Insert("Item".into()),
            off,
            Call::Move(Direction::Left),
            Call::Move(Direction::Down),
            Call::SelectCell,
            Call::Delete,
            Call::Insert("1".into()),
            Call::Move(Direction::Right),
            Call::SelectCell,
            Call::Delete,
            Call::Insert("pen".into()),
            Call::SelectCell,
            Call::CancelSelection,
            Call::Move(Direction::Down),
        ]
    );
}

#[test]
fn test_no_emphasis_without_header_flag() {
    let mut surface = RecordingSurface::new();
    let data: TableData = vec![vec!["a", "b"], vec!["c", "d"]].into_iter().collect();
    let dims = TableDimensions::new(2, 2).unwrap();
    TableFactory::new(&mut surface).create_with_data(dims, Some(&data), false);
    assert_eq!(surface.count(Primitive::SetEmphasis), 0);
}

#[test]
fn test_custom_header_emphasis_from_config() {
    let mut surface = RecordingSurface::new();
    let config: EngineConfig =
        serde_json::from_str(r#"{"header_emphasis": {"bold": true, "underline": true}}"#).unwrap();
    let data: TableData = vec![vec!["h"], vec!["v"]].into_iter().collect();
    TableFactory::new(&mut surface)
        .with_config(config)
        .create_with_data(TableDimensions::new(2, 1).unwrap(), Some(&data), true);

    let emphasis: Vec<&Call> = surface
        .calls()
        .iter()
        .filter(|c| matches!(c, Call::SetEmphasis(_)))
        .collect();
    assert_eq!(
        emphasis,
        vec![
            &Call::SetEmphasis(Emphasis {
                bold: Some(true),
                italic: None,
                underline: Some(true),
            }),
            &Call::SetEmphasis(Emphasis {
                bold: Some(false),
                italic: None,
                underline: Some(false),
            }),
        ]
    );
}

#[test]
fn test_probe_true_never_creates() {
    let mut surface = RecordingSurface::new().with_cursor_in_table(true);
    let data: TableData = vec![vec!["x"]].into_iter().collect();
    let outcome = TableFactory::new(&mut surface).create_with_data(
        TableDimensions::new(5, 5).unwrap(),
        Some(&data),
        true,
    );
    assert!(outcome.is_success());
    assert_eq!(surface.count(Primitive::CreateTableFast), 0);
    assert_eq!(surface.count(Primitive::CreateTableStructured), 0);
    assert_eq!(surface.count(Primitive::ProbeInsideTable), 1);
}

#[test]
fn test_ragged_rows_return_to_first_column() {
    let mut surface = RecordingSurface::new();
    let data: TableData = vec![vec!["a"], vec!["b", "c", "d"], vec!["e", "f"]]
        .into_iter()
        .collect();
    TableFactory::new(&mut surface).create_with_data(
        TableDimensions::new(3, 3).unwrap(),
        Some(&data),
        false,
    );

    // row 1: no moves right, then down. row 2: 2 right, 2 left, down.
    // row 3: 1 right. exit: down.
    let expected = vec![
        Direction::Down,
        Direction::Right,
        Direction::Right,
        Direction::Left,
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Down,
    ];
    assert_eq!(moves(surface.calls()), expected);
}

#[test]
fn test_column_fill_start_after_end_writes_nothing() {
    let mut surface = RecordingSurface::new();
    let outcome = ColumnFiller::new(&mut surface).fill_column(5, 3, 2, false);
    assert!(outcome.is_success());
    assert_eq!(surface.count(Primitive::InsertText), 0);
    assert_eq!(surface.count(Primitive::DeleteSelection), 0);
}

#[test]
fn test_merge_degenerate_and_inverted() {
    let mut surface = RecordingSurface::new();
    let single = MergeRange {
        start: CellAddress::new(2, 1).unwrap(),
        end: CellAddress::new(2, 1).unwrap(),
    };
    assert!(CellMerger::new(&mut surface).merge(single).is_success());
    assert_eq!(surface.count(Primitive::ExtendSelection), 0);
    assert_eq!(surface.count(Primitive::MergeCells), 1);

    surface.clear();
    let inverted = MergeRange {
        start: CellAddress::new(3, 2).unwrap(),
        end: CellAddress::new(1, 1).unwrap(),
    };
    let (ok, message) = CellMerger::new(&mut surface).merge(inverted).into_parts();
    assert!(!ok);
    assert!(message.starts_with("Error:"));
    assert!(message.contains("invalid range"));
    assert!(surface.calls().is_empty());
}

#[test]
fn test_disconnected_surface_short_circuits_every_component() {
    let mut surface = RecordingSurface::disconnected();
    let cell = CellAddress::origin();

    let moved = CellAddresser::new(&mut surface).move_to(cell, true);
    let filled = ColumnFiller::new(&mut surface).fill_column(1, 3, 1, true);
    let merged = CellMerger::new(&mut surface).merge(MergeRange {
        start: cell,
        end: cell,
    });
    let created = TableFactory::new(&mut surface).create_with_data(
        TableDimensions::new(1, 1).unwrap(),
        None,
        false,
    );
    for outcome in [moved, filled, merged, created] {
        assert_eq!(outcome.message, "Error: not connected to the document");
    }
    assert!(surface.calls().is_empty());
}
