#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use float_cmp::approx_eq;
    use test_case::test_case;

    use dienest::catalog::{DieLineLookup, InMemoryCatalog, SheetStore};
    use dienest::engine::NestingEngine;
    use dienest::entities::{
        DieLine, DieLineId, DieLineQuantity, Layout, Margins, NestingOptions, NestingRequest, PlacementId,
        Sheet, SheetId, SheetRequest, SheetSizeRange,
    };
    use dienest::error::{InputError, NestingError};
    use dienest::geometry::geo_enums::Rotation;
    use dienest::geometry::primitives::Point;
    use dienest::geometry::OverlapMode;
    use dienest::io::ext_repr::ExtJob;
    use dienest::io::import;
    use dienest::packing::{Adjustment, CollisionGuard, LayoutSession, adjust_placement, pack_sheet};
    use dienest::util::{EngineConfig, assertions};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn sheet(id: u64, width: f64, height: f64, margin: f64) -> Sheet {
        let request = SheetRequest {
            name: format!("sheet {id}"),
            width,
            height,
            margins: Margins::uniform(margin),
            material: "Cardboard".to_string(),
        };
        Sheet::new(SheetId(id), request).unwrap()
    }

    /// Catalog with die lines `(id, width, height)` and a single 300x200 sheet with id 1 and margins 10.
    fn catalog(die_lines: &[(u64, f64, f64)]) -> InMemoryCatalog {
        let catalog = InMemoryCatalog::new();
        for &(id, w, h) in die_lines {
            catalog.insert_die_line(DieLine::rectangular(DieLineId(id), w, h).unwrap());
        }
        catalog.put_sheet(sheet(1, 300.0, 200.0, 10.0));
        catalog
    }

    fn request(sheet_id: Option<u64>, demands: &[(u64, usize)], options: NestingOptions) -> NestingRequest {
        NestingRequest {
            sheet_id: sheet_id.map(SheetId),
            die_lines: demands
                .iter()
                .map(|&(id, quantity)| DieLineQuantity {
                    die_line_id: DieLineId(id),
                    quantity,
                })
                .collect(),
            options,
        }
    }

    fn no_rotation(spacing: f64) -> NestingOptions {
        NestingOptions {
            spacing,
            allow_rotation: false,
            ..NestingOptions::default()
        }
    }

    fn engine(catalog: InMemoryCatalog) -> NestingEngine<InMemoryCatalog> {
        NestingEngine::new(catalog, EngineConfig::default())
    }

    #[test]
    fn two_pieces_on_one_row() {
        init_logger();
        let engine = engine(catalog(&[(1, 100.0, 150.0)]));
        let result = engine
            .optimize(&request(Some(1), &[(1, 2)], no_rotation(5.0)))
            .unwrap();

        let positions = result.placements.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>();
        assert_eq!(positions, vec![(10.0, 10.0), (115.0, 10.0)]);
        assert!(result.placements.iter().all(|p| p.rotation == Rotation::Deg0));
        assert!(approx_eq!(f64, result.utilization(), 50.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, result.waste(), 50.0, epsilon = 1e-9));
        assert!(result.is_complete());
        assert!(!result.is_optimized_size);
    }

    #[test]
    fn oversized_piece_is_skipped_without_error() {
        init_logger();
        let engine = engine(catalog(&[(1, 350.0, 50.0)]));
        let result = engine
            .optimize(&request(Some(1), &[(1, 1)], NestingOptions::default()))
            .unwrap();

        assert!(result.placements.is_empty());
        assert_eq!(result.unplaced, vec![DieLineId(1)]);
        assert_eq!(result.utilization(), 0.0);
    }

    #[test]
    fn oversized_piece_does_not_block_smaller_ones() {
        init_logger();
        let engine = engine(catalog(&[(1, 350.0, 50.0), (2, 100.0, 100.0)]));
        let result = engine
            .optimize(&request(Some(1), &[(1, 1), (2, 1)], NestingOptions::default()))
            .unwrap();

        assert_eq!(result.n_placed(), 1);
        assert_eq!(result.placements[0].die_line_id, DieLineId(2));
        assert_eq!(result.placements[0].position(), Point(10.0, 10.0));
        assert_eq!(result.unplaced, vec![DieLineId(1)]);
    }

    #[test]
    fn full_row_opens_a_new_row() {
        init_logger();
        let catalog = catalog(&[(1, 100.0, 150.0)]);
        catalog.put_sheet(sheet(2, 300.0, 400.0, 10.0));
        let engine = engine(catalog);
        let result = engine
            .optimize(&request(Some(2), &[(1, 3)], no_rotation(5.0)))
            .unwrap();

        let positions = result.placements.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>();
        //the next row starts below the tallest footprint plus spacing, plus the spacing between rows
        assert_eq!(positions, vec![(10.0, 10.0), (115.0, 10.0), (10.0, 170.0)]);
    }

    #[test_case(200.0, None; "no room below the new row")]
    #[test_case(250.0, Some(Point(10.0, 170.0)); "room for the small piece below")]
    fn skipped_unit_keeps_the_new_row(height: f64, small_position: Option<Point>) {
        init_logger();
        let catalog = catalog(&[(1, 100.0, 150.0), (2, 50.0, 20.0)]);
        catalog.put_sheet(sheet(2, 300.0, height, 10.0));
        let engine = engine(catalog);
        //the third large piece opens a row at y = 170 and is too tall for it, the small piece follows on that row
        let result = engine
            .optimize(&request(Some(2), &[(1, 3), (2, 1)], no_rotation(5.0)))
            .unwrap();

        let small = result.placements.iter().find(|p| p.die_line_id == DieLineId(2));
        assert_eq!(small.map(|p| p.position()), small_position);
        assert_eq!(result.placements.len(), 2 + small_position.is_some() as usize);
        match small_position {
            Some(_) => assert_eq!(result.unplaced, vec![DieLineId(1)]),
            None => assert_eq!(result.unplaced, vec![DieLineId(1), DieLineId(2)]),
        }
    }

    #[test_case(Rotation::ALL.to_vec(), None; "first rotation fitting the width is too tall")]
    #[test_case(vec![Rotation::Deg90], Some(Rotation::Deg90); "only the quarter turn")]
    fn rotation_is_chosen_by_row_width(allowed_rotations: Vec<Rotation>, expected: Option<Rotation>) {
        init_logger();
        let engine = engine(catalog(&[(1, 100.0, 200.0)]));
        let options = NestingOptions {
            spacing: 0.0,
            allow_rotation: true,
            allowed_rotations,
            ..NestingOptions::default()
        };
        //0° fits the 280 wide interior but not its 180 height, 90° would fit both
        let result = engine.optimize(&request(Some(1), &[(1, 1)], options)).unwrap();

        assert_eq!(result.placements.first().map(|p| p.rotation), expected);
        assert_eq!(result.unplaced.len(), expected.is_none() as usize);
        if expected.is_some() {
            assert_eq!(result.placements[0].position(), Point(10.0, 10.0));
        }
    }

    #[test_case(true, Some(Rotation::Deg90); "rotation allowed")]
    #[test_case(false, None; "rotation disallowed")]
    fn rotation_makes_a_piece_fit(allow_rotation: bool, expected: Option<Rotation>) {
        init_logger();
        let catalog = catalog(&[(1, 150.0, 100.0)]);
        catalog.put_sheet(sheet(2, 140.0, 220.0, 10.0));
        let engine = engine(catalog);
        let options = NestingOptions {
            spacing: 0.0,
            allow_rotation,
            ..NestingOptions::default()
        };
        let result = engine.optimize(&request(Some(2), &[(1, 1)], options)).unwrap();

        assert_eq!(result.placements.first().map(|p| p.rotation), expected);
    }

    #[test_case(&[(1, 4), (2, 6), (3, 10)], 5.0, true; "mixed with rotation")]
    #[test_case(&[(1, 4), (2, 6), (3, 10)], 5.0, false; "mixed without rotation")]
    #[test_case(&[(3, 40)], 0.0, true; "many small pieces, no spacing")]
    #[test_case(&[(1, 1), (2, 1), (3, 1), (4, 2)], 12.5, true; "large spacing")]
    fn packed_layouts_are_feasible(demands: &[(u64, usize)], spacing: f64, allow_rotation: bool) {
        init_logger();
        let engine = engine(catalog(&[
            (1, 80.0, 60.0),
            (2, 45.0, 70.0),
            (3, 20.0, 25.0),
            (4, 120.0, 30.0),
        ]));
        let options = NestingOptions {
            spacing,
            allow_rotation,
            ..NestingOptions::default()
        };
        let result = engine.optimize(&request(Some(1), demands, options)).unwrap();

        let layout = Layout::new(result.sheet.clone(), result.placements.clone(), engine.catalog()).unwrap();
        let guard = CollisionGuard::new(spacing, 1e-6, OverlapMode::BoundingBox).unwrap();
        assert!(assertions::layout_is_feasible(&layout, &guard));
        assert!(assertions::metrics_are_consistent(&result.metrics));
        assert!(approx_eq!(f64, result.utilization() + result.waste(), 100.0, epsilon = 1e-9));
        assert_eq!(result.n_placed() + result.unplaced.len(), result.n_requested);
    }

    #[test]
    fn packing_is_deterministic() {
        init_logger();
        let engine = engine(catalog(&[(1, 80.0, 60.0), (2, 45.0, 70.0), (3, 20.0, 25.0)]));
        let request = request(Some(1), &[(3, 7), (1, 3), (2, 5)], NestingOptions::default());

        let first = engine.optimize(&request).unwrap();
        let second = engine.optimize(&request).unwrap();
        assert_eq!(first.placements, second.placements);
        assert_eq!(first.unplaced, second.unplaced);
    }

    #[test]
    fn placements_follow_the_sort_order() {
        init_logger();
        let engine = engine(catalog(&[(1, 20.0, 30.0), (2, 30.0, 20.0), (3, 50.0, 50.0)]));
        let result = engine
            .optimize(&request(Some(1), &[(1, 1), (2, 1), (3, 1)], no_rotation(0.0)))
            .unwrap();

        //area descending, then width descending
        let order = result.placements.iter().map(|p| p.die_line_id.0).collect::<Vec<_>>();
        assert_eq!(order, vec![3, 2, 1]);
        let ids = result.placements.iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![PlacementId(0), PlacementId(1), PlacementId(2)]);
    }

    #[test]
    fn iteration_cap_limits_attempts() {
        init_logger();
        let engine = engine(catalog(&[(1, 20.0, 20.0)]));
        let options = NestingOptions {
            max_iterations: 3,
            ..NestingOptions::default()
        };
        let result = engine.optimize(&request(Some(1), &[(1, 5)], options)).unwrap();

        assert_eq!(result.n_placed(), 3);
        assert_eq!(result.unplaced.len(), 2);
        assert_eq!(result.n_requested, 5);
    }

    #[test]
    fn size_search_selects_smallest_feasible_sheet() {
        init_logger();
        let engine = engine(catalog(&[(1, 150.0, 150.0)]));
        let options = NestingOptions {
            spacing: 0.0,
            sheet_size_range: Some(SheetSizeRange {
                min_width: 100.0,
                max_width: 200.0,
                min_height: 100.0,
                max_height: 200.0,
            }),
            ..NestingOptions::default()
        };
        let request = request(None, &[(1, 1)], options);
        let result = engine.optimize(&request).unwrap();

        assert!(result.is_optimized_size);
        assert_eq!(result.sheet.id, SheetId::UNASSIGNED);
        assert_eq!((result.sheet.width, result.sheet.height), (170.0, 170.0));
        assert_eq!(result.sheet.margins, Margins::uniform(10.0));
        assert_eq!(result.placements[0].position(), Point(10.0, 10.0));
        assert!(approx_eq!(f64, result.utilization(), 22500.0 / 28900.0 * 100.0, epsilon = 1e-9));

        //repeated searches leave the catalog untouched
        for _ in 0..5 {
            assert_eq!(engine.optimize(&request).unwrap().sheet, result.sheet);
        }
        assert_eq!(engine.catalog().sheets().len(), 1);

        //persisting the synthesized sheet is up to the caller
        let stored = engine.catalog().insert_sheet(result.sheet.to_request()).unwrap();
        assert_eq!(stored.id, SheetId(2));
        assert_eq!(engine.catalog().sheet(stored.id), Some(stored));
    }

    #[test]
    fn size_range_too_small_for_largest_piece() {
        init_logger();
        let engine = engine(catalog(&[(1, 150.0, 150.0)]));
        let range = SheetSizeRange {
            min_width: 100.0,
            max_width: 150.0,
            min_height: 100.0,
            max_height: 150.0,
        };
        let options = NestingOptions {
            sheet_size_range: Some(range),
            ..NestingOptions::default()
        };
        let err = engine.optimize(&request(None, &[(1, 1)], options)).unwrap_err();

        assert_eq!(
            err,
            NestingError::SizeRangeInfeasible {
                range,
                required_width: 170.0,
                required_height: 170.0,
            }
        );
    }

    #[test]
    fn size_range_exhausted() {
        init_logger();
        let engine = engine(catalog(&[(1, 150.0, 150.0)]));
        let range = SheetSizeRange {
            min_width: 170.0,
            max_width: 180.0,
            min_height: 170.0,
            max_height: 180.0,
        };
        let options = NestingOptions {
            sheet_size_range: Some(range),
            ..NestingOptions::default()
        };
        let err = engine.optimize(&request(None, &[(1, 4)], options)).unwrap_err();

        assert_eq!(err, NestingError::SizeRangeExhausted(range));
    }

    #[test]
    fn unknown_references_are_reported() {
        init_logger();
        let engine = engine(catalog(&[(1, 10.0, 10.0)]));

        let err = engine
            .optimize(&request(Some(1), &[(1, 1), (9, 1)], NestingOptions::default()))
            .unwrap_err();
        assert_eq!(err, NestingError::DieLineNotFound(DieLineId(9)));

        let err = engine
            .optimize(&request(Some(5), &[(1, 1)], NestingOptions::default()))
            .unwrap_err();
        assert_eq!(err, NestingError::SheetNotFound(SheetId(5)));
    }

    #[test]
    fn packing_nothing_yields_an_empty_outcome() {
        let outcome = pack_sheet(&sheet(1, 300.0, 200.0, 10.0), &[], &NestingOptions::default()).unwrap();

        assert!(outcome.placements.is_empty());
        assert!(outcome.is_complete());
        assert_eq!(outcome.metrics.utilization, 0.0);
        assert_eq!(outcome.metrics.waste, 100.0);
    }

    #[test_case(&[]; "no die lines")]
    #[test_case(&[(1, 0)]; "zero quantity")]
    fn nothing_to_place(demands: &[(u64, usize)]) {
        init_logger();
        let engine = engine(catalog(&[(1, 10.0, 10.0)]));
        let err = engine
            .optimize(&request(Some(1), demands, NestingOptions::default()))
            .unwrap_err();
        assert_eq!(err, NestingError::NoDieLinesToPlace);
    }

    #[test_case(NestingOptions { spacing: -1.0, ..NestingOptions::default() }, InputError::InvalidSpacing(-1.0); "negative spacing")]
    #[test_case(NestingOptions { max_iterations: 0, ..NestingOptions::default() }, InputError::ZeroIterations; "zero iterations")]
    #[test_case(NestingOptions { allowed_rotations: vec![], ..NestingOptions::default() }, InputError::EmptyRotationSet; "no rotations")]
    #[test_case(NestingOptions { allow_rotation: false, allowed_rotations: vec![Rotation::Deg90], ..NestingOptions::default() }, InputError::MissingZeroRotation; "zero rotation missing")]
    fn invalid_options_are_rejected(options: NestingOptions, expected: InputError) {
        init_logger();
        let engine = engine(catalog(&[(1, 10.0, 10.0)]));
        let err = engine.optimize(&request(Some(1), &[(1, 1)], options)).unwrap_err();
        assert_eq!(err, NestingError::Input(expected));
    }

    #[test]
    fn missing_sheet_selection() {
        init_logger();
        let engine = engine(catalog(&[(1, 10.0, 10.0)]));
        let err = engine
            .optimize(&request(None, &[(1, 1)], NestingOptions::default()))
            .unwrap_err();
        assert_eq!(err, NestingError::Input(InputError::MissingSheet));
    }

    #[test]
    fn invalid_geometry_is_rejected_at_construction() {
        assert!(DieLine::rectangular(DieLineId(1), 0.0, 10.0).is_err());
        assert!(DieLine::new(DieLineId(1), 10.0, 10.0, Some(vec![Point(0.0, 0.0), Point(10.0, 0.0)])).is_err());
        let collinear = vec![Point(0.0, 0.0), Point(5.0, 5.0), Point(10.0, 10.0)];
        assert!(DieLine::new(DieLineId(1), 10.0, 10.0, Some(collinear)).is_err());
        let non_finite = vec![Point(0.0, 0.0), Point(f64::NAN, 0.0), Point(10.0, 10.0)];
        assert!(DieLine::new(DieLineId(1), 10.0, 10.0, Some(non_finite)).is_err());
        let too_large = vec![Point(0.0, 0.0), Point(20.0, 0.0), Point(20.0, 10.0)];
        assert!(DieLine::new(DieLineId(1), 10.0, 10.0, Some(too_large)).is_err());
    }

    /// Two 100x150 pieces at (10, 10) and (115, 10) on the 300x200 sheet.
    fn two_piece_setup() -> (NestingEngine<InMemoryCatalog>, Sheet, Vec<dienest::entities::PlacedDieLine>) {
        let engine = engine(catalog(&[(1, 100.0, 150.0)]));
        let result = engine
            .optimize(&request(Some(1), &[(1, 2)], no_rotation(5.0)))
            .unwrap();
        (engine, result.sheet, result.placements)
    }

    fn adjustment(id: u64, x: f64, y: f64, rotation: Rotation) -> Adjustment {
        Adjustment {
            placement_id: PlacementId(id),
            x,
            y,
            rotation,
        }
    }

    #[test_case(180.0, 10.0, Rotation::Deg0; "move right")]
    #[test_case(115.0, 10.0, Rotation::Deg0; "move in place")]
    #[test_case(115.0, 10.0, Rotation::Deg90; "rotate in place")]
    #[test_case(115.0, 85.0, Rotation::Deg90; "rotate to bottom right")]
    fn accepted_adjustments(x: f64, y: f64, rotation: Rotation) {
        init_logger();
        let (engine, sheet, placements) = two_piece_setup();
        let original = placements.clone();

        let updated = engine
            .manual_adjust(&placements, &adjustment(1, x, y, rotation), &sheet, 5.0)
            .unwrap();

        assert_eq!(placements, original);
        assert_eq!(updated[0], placements[0]);
        assert_eq!((updated[1].x, updated[1].y, updated[1].rotation), (x, y, rotation));
        assert_eq!(updated[1].id, PlacementId(1));
    }

    #[test]
    fn colliding_adjustment_is_rejected() {
        init_logger();
        let (engine, sheet, placements) = two_piece_setup();
        let err = engine
            .manual_adjust(&placements, &adjustment(1, 60.0, 10.0, Rotation::Deg0), &sheet, 5.0)
            .unwrap_err();
        assert_eq!(
            err,
            NestingError::CollisionDetected {
                placement_id: PlacementId(1),
                conflicts: vec![PlacementId(0)],
            }
        );

        //closer than the spacing, but not overlapping
        let err = engine
            .manual_adjust(&placements, &adjustment(1, 112.0, 10.0, Rotation::Deg0), &sheet, 5.0)
            .unwrap_err();
        assert!(matches!(err, NestingError::CollisionDetected { .. }));
    }

    #[test]
    fn conflicts_are_reported_in_ascending_order() {
        init_logger();
        let engine = engine(catalog(&[(1, 50.0, 50.0)]));
        let result = engine
            .optimize(&request(Some(1), &[(1, 4)], no_rotation(0.0)))
            .unwrap();

        //a 50x50 box at (35, 10) covers parts of placements 0 and 1, placement 3 is moved
        let err = engine
            .manual_adjust(&result.placements, &adjustment(3, 35.0, 10.0, Rotation::Deg0), &result.sheet, 0.0)
            .unwrap_err();
        assert_eq!(
            err,
            NestingError::CollisionDetected {
                placement_id: PlacementId(3),
                conflicts: vec![PlacementId(0), PlacementId(1)],
            }
        );
    }

    #[test_case(200.0, 10.0, Rotation::Deg0; "past the right margin")]
    #[test_case(115.0, 5.0, Rotation::Deg0; "into the top margin")]
    #[test_case(150.0, 10.0, Rotation::Deg90; "rotated past the right margin")]
    #[test_case(f64::NAN, 10.0, Rotation::Deg0; "not a number")]
    fn out_of_bounds_adjustment_is_rejected(x: f64, y: f64, rotation: Rotation) {
        init_logger();
        let (engine, sheet, placements) = two_piece_setup();
        let err = engine
            .manual_adjust(&placements, &adjustment(1, x, y, rotation), &sheet, 5.0)
            .unwrap_err();
        assert!(matches!(
            err,
            NestingError::OutOfBounds {
                placement_id: PlacementId(1),
                ..
            }
        ));
    }

    #[test]
    fn unknown_placement_is_rejected() {
        init_logger();
        let (engine, sheet, placements) = two_piece_setup();
        let err = engine
            .manual_adjust(&placements, &adjustment(7, 10.0, 10.0, Rotation::Deg0), &sheet, 5.0)
            .unwrap_err();
        assert_eq!(err, NestingError::PlacementNotFound(PlacementId(7)));
    }

    #[test]
    fn polygon_mode_accepts_nested_triangles() {
        init_logger();
        let catalog = catalog(&[]);
        let triangle = vec![Point(0.0, 0.0), Point(100.0, 0.0), Point(100.0, 100.0)];
        catalog.insert_die_line(DieLine::new(DieLineId(1), 100.0, 100.0, Some(triangle)).unwrap());
        let sheet = catalog.sheet(SheetId(1)).unwrap();

        let result = NestingEngine::new(&catalog, EngineConfig::default())
            .optimize(&request(Some(1), &[(1, 2)], no_rotation(0.0)))
            .unwrap();
        assert_eq!(result.n_placed(), 2);

        //rotated by 180°, the second triangle complements the first one
        let nested = adjustment(1, 10.0, 10.0, Rotation::Deg180);

        let bbox_engine = NestingEngine::new(&catalog, EngineConfig::default());
        let err = bbox_engine
            .manual_adjust(&result.placements, &nested, &sheet, 0.0)
            .unwrap_err();
        assert!(matches!(err, NestingError::CollisionDetected { .. }));

        let polygon_config = EngineConfig {
            overlap_mode: OverlapMode::Polygon,
            ..EngineConfig::default()
        };
        let polygon_engine = NestingEngine::new(&catalog, polygon_config);
        let updated = polygon_engine
            .manual_adjust(&result.placements, &nested, &sheet, 0.0)
            .unwrap();
        assert_eq!(updated[1].position(), Point(10.0, 10.0));

        //same orientation on top of each other still collides
        let stacked = adjustment(1, 10.0, 10.0, Rotation::Deg0);
        assert!(polygon_engine
            .manual_adjust(&result.placements, &stacked, &sheet, 0.0)
            .is_err());
    }

    #[test]
    fn session_applies_adjustments_atomically() {
        init_logger();
        let (engine, sheet, placements) = two_piece_setup();
        let result = engine
            .optimize(&request(Some(sheet.id.0), &[(1, 2)], no_rotation(5.0)))
            .unwrap();
        let session = engine.open_session(&result, 5.0).unwrap();

        session.adjust(&adjustment(1, 180.0, 10.0, Rotation::Deg0)).unwrap();
        let before = session.placements();
        assert_eq!(before[1].position(), Point(180.0, 10.0));

        //rejected, layout is left untouched
        assert!(session.adjust(&adjustment(0, 150.0, 10.0, Rotation::Deg0)).is_err());
        assert_eq!(session.placements(), before);

        //the original position of placement 1 is free now
        session.adjust(&adjustment(0, 70.0, 10.0, Rotation::Deg0)).unwrap();
        assert_eq!(session.placements()[0].position(), Point(70.0, 10.0));

        assert!(approx_eq!(f64, session.metrics().utilization, 50.0, epsilon = 1e-9));
        assert_ne!(session.placements(), placements);
    }

    #[test]
    fn concurrent_adjustments_keep_layout_feasible() {
        init_logger();
        let engine = engine(catalog(&[(1, 50.0, 50.0)]));
        let result = engine
            .optimize(&request(Some(1), &[(1, 3)], no_rotation(5.0)))
            .unwrap();
        let session = Arc::new(engine.open_session(&result, 5.0).unwrap());

        //both threads try to claim the same spot, at most one of them can succeed
        std::thread::scope(|s| {
            for id in [0, 1] {
                let session = session.clone();
                s.spawn(move || {
                    let _ = session.adjust(&adjustment(id, 200.0, 100.0, Rotation::Deg0));
                });
            }
        });

        let layout = session.snapshot();
        let guard = *session.guard();
        assert!(assertions::layout_is_feasible(&layout, &guard));
        let at_spot = layout
            .placements()
            .iter()
            .filter(|p| p.position() == Point(200.0, 100.0))
            .count();
        assert_eq!(at_spot, 1);
    }

    #[test]
    fn adjust_placement_without_engine() {
        init_logger();
        let catalog = catalog(&[(1, 100.0, 150.0)]);
        let sheet = catalog.sheet(SheetId(1)).unwrap();
        let demands = vec![(catalog.die_lines()[0].clone(), 2)];
        let outcome = pack_sheet(&sheet, &demands, &no_rotation(5.0)).unwrap();
        let layout = Layout::new(sheet, outcome.placements, &catalog).unwrap();
        let guard = CollisionGuard::new(5.0, 1e-6, OverlapMode::BoundingBox).unwrap();

        let updated = adjust_placement(&layout, &adjustment(0, 10.0, 40.0, Rotation::Deg0), &guard).unwrap();
        assert_eq!(updated[0].position(), Point(10.0, 40.0));
        assert_eq!(layout.placements()[0].position(), Point(10.0, 10.0));

        let session = LayoutSession::new(layout, guard);
        session.adjust(&adjustment(0, 10.0, 40.0, Rotation::Deg0)).unwrap();
        assert_eq!(session.into_layout().placements(), updated.as_slice());
    }

    #[test]
    fn waste_of_arbitrary_placements() {
        init_logger();
        let (engine, _, placements) = two_piece_setup();
        let waste = engine.calculate_waste(SheetId(1), &placements).unwrap();
        assert!(approx_eq!(f64, waste, 50.0, epsilon = 1e-9));

        assert_eq!(
            engine.calculate_waste(SheetId(3), &placements),
            Err(NestingError::SheetNotFound(SheetId(3)))
        );

        let empty = engine.calculate_waste(SheetId(1), &[]).unwrap();
        assert_eq!(empty, 100.0);
    }

    #[test]
    fn updated_sheet_is_used_by_later_runs() {
        init_logger();
        let engine = engine(catalog(&[(1, 100.0, 150.0)]));
        let updated = engine
            .catalog()
            .update_sheet(
                SheetId(1),
                SheetRequest {
                    name: "wide".to_string(),
                    width: 400.0,
                    height: 200.0,
                    margins: Margins::uniform(10.0),
                    material: String::new(),
                },
            )
            .unwrap();
        assert_eq!(updated.width, 400.0);

        let result = engine
            .optimize(&request(Some(1), &[(1, 3)], no_rotation(5.0)))
            .unwrap();
        assert_eq!(result.n_placed(), 3);
        assert!(approx_eq!(f64, result.utilization(), 3.0 * 15000.0 / 80000.0 * 100.0, epsilon = 1e-9));

        let err = engine
            .catalog()
            .update_sheet(SheetId(42), updated.to_request())
            .unwrap_err();
        assert_eq!(err, NestingError::SheetNotFound(SheetId(42)));
    }

    #[test]
    fn unassigned_sheet_does_not_move_the_id_counter() {
        init_logger();
        let catalog = catalog(&[]);
        let unassigned = Sheet::new(SheetId::UNASSIGNED, sheet(1, 300.0, 200.0, 10.0).to_request()).unwrap();
        catalog.put_sheet(unassigned);
        assert!(catalog.sheet(SheetId::UNASSIGNED).is_some());

        let inserted = catalog.insert_sheet(sheet(1, 120.0, 80.0, 5.0).to_request()).unwrap();
        assert_eq!(inserted.id, SheetId(2));
        assert_eq!(catalog.sheets().len(), 3);
    }

    #[test]
    fn removed_catalog_entries_are_not_found() {
        init_logger();
        let engine = engine(catalog(&[(1, 100.0, 150.0), (2, 60.0, 40.0)]));
        assert!(engine.catalog().remove_die_line(DieLineId(2)).is_some());
        assert_eq!(engine.catalog().die_lines().len(), 1);

        let err = engine
            .optimize(&request(Some(1), &[(1, 1), (2, 1)], no_rotation(5.0)))
            .unwrap_err();
        assert_eq!(err, NestingError::DieLineNotFound(DieLineId(2)));

        assert!(engine.catalog().remove_sheet(SheetId(1)).is_some());
        assert!(engine.catalog().sheets().is_empty());
        let err = engine
            .optimize(&request(Some(1), &[(1, 1)], no_rotation(5.0)))
            .unwrap_err();
        assert_eq!(err, NestingError::SheetNotFound(SheetId(1)));
    }

    #[test]
    fn job_is_imported_from_json() {
        let json = r#"{
            "name": "pennants",
            "die_lines": [
                { "id": 1, "name": "pennant.pdf", "file_type": "PDF", "width": 80, "height": 40,
                  "outline": [[0, 0], [80, 20], [0, 40]] }
            ],
            "sheets": [
                { "id": 7, "width": 300, "height": 200, "margins": { "top": 10, "bottom": 10, "left": 10, "right": 10 } }
            ],
            "request": {
                "sheet_id": 7,
                "die_lines": [{ "die_line_id": 1, "quantity": 2 }],
                "options": { "allowed_rotations": [0, 90] }
            },
            "adjustments": [{ "placement_id": 1, "x": 200, "y": 100, "rotation": -270 }]
        }"#;
        let ext_job: ExtJob = serde_json::from_str(json).unwrap();
        let job = import::import_job(&ext_job).unwrap();

        assert_eq!(job.request.sheet_id, Some(SheetId(7)));
        assert_eq!(job.request.options.allowed_rotations, vec![Rotation::Deg0, Rotation::Deg90]);
        assert_eq!(job.request.options.spacing, NestingOptions::default().spacing);
        assert_eq!(job.adjustments[0].rotation, Rotation::Deg90);
        let die_line = job.catalog.die_line(DieLineId(1)).unwrap();
        assert_eq!(die_line.outline.n_vertices(), 3);
        assert_eq!(die_line.file_type, "PDF");

        let mut invalid = ext_job.clone();
        invalid.adjustments[0].rotation = 45.0;
        assert!(import::import_job(&invalid).is_err());

        let mut duplicated = ext_job;
        duplicated.die_lines.push(duplicated.die_lines[0].clone());
        assert!(import::import_job(&duplicated).is_err());
    }
}
