//! Integration tests exercising full compile/decompile round trips, shared
//! tuple and shared point handling, and axis-region edge cases.

use tuple_variation::{
    AxisRegion, CompileError, Deltas, F2Dot14, SharedCoordIndices, Tag, TupleVariation, VariationKind,
};

fn wght() -> Tag {
    Tag::new(b"wght")
}

fn wdth() -> Tag {
    Tag::new(b"wdth")
}

fn no_sharing() -> SharedCoordIndices {
    SharedCoordIndices::new()
}

#[test]
fn gvar_paired_deltas_round_trip() {
    let tv = TupleVariation {
        axes: vec![(
            wght(),
            AxisRegion {
                start: F2Dot14::ZERO,
                peak: F2Dot14::from_f64(1.0),
                end: F2Dot14::from_f64(1.0),
            },
        )],
        deltas: Deltas::Gvar(vec![
            Some((10, 0)),
            Some((-105, 0)),
            Some((0, 4130)),
            Some((-58, -1228)),
            Some((0, 0)),
        ]),
    };
    let axis_order = [wght()];
    let kind = VariationKind::Gvar { num_points_in_glyph: 5 };
    let (header, data) = tv.compile(&axis_order, &no_sharing(), None).unwrap();
    let (decoded, header_len, data_len) =
        TupleVariation::decompile(&header, &data, &axis_order, kind, "gvar", &[], None).unwrap();
    assert_eq!(decoded, tv);
    assert_eq!(header_len, header.len());
    assert_eq!(data_len, data.len());
}

#[test]
fn cvar_scalar_deltas_round_trip() {
    let tv = TupleVariation {
        axes: vec![(
            wdth(),
            AxisRegion {
                start: F2Dot14::ZERO,
                peak: F2Dot14::from_f64(-1.0),
                end: F2Dot14::from_f64(-1.0),
            },
        )],
        deltas: Deltas::Cvar(vec![
            Some(1),
            Some(2),
            Some(3),
            Some(0),
            Some(0),
            Some(0),
            Some(0),
            Some(0),
        ]),
    };
    let axis_order = [wdth()];
    let kind = VariationKind::Cvar { num_entries: 8 };
    let (header, data) = tv.compile(&axis_order, &no_sharing(), None).unwrap();
    let (decoded, _, _) = TupleVariation::decompile(&header, &data, &axis_order, kind, "cvar", &[], None).unwrap();
    assert_eq!(decoded, tv);
}

#[test]
fn all_points_shortcut_round_trips_through_full_pipeline() {
    let tv = TupleVariation {
        axes: vec![],
        deltas: Deltas::Cvar(vec![Some(7); 12]),
    };
    let axis_order: [Tag; 0] = [];
    let kind = VariationKind::Cvar { num_entries: 12 };
    let (header, data) = tv.compile(&axis_order, &no_sharing(), None).unwrap();
    // "all points" is a single leading zero byte in the aux data.
    assert_eq!(data[0], 0x00);
    let (decoded, _, _) = TupleVariation::decompile(&header, &data, &axis_order, kind, "cvar", &[], None).unwrap();
    assert_eq!(decoded.used_points(), (0..12).collect::<Vec<u16>>());
}

#[test]
fn multiple_axes_with_mixed_default_and_intermediate_regions() {
    let tv = TupleVariation {
        axes: vec![
            (
                wght(),
                AxisRegion {
                    start: F2Dot14::from_f64(-0.5),
                    peak: F2Dot14::from_f64(1.0),
                    end: F2Dot14::from_f64(1.0),
                },
            ),
            (
                wdth(),
                AxisRegion {
                    start: F2Dot14::ZERO,
                    peak: F2Dot14::from_f64(1.0),
                    end: F2Dot14::from_f64(1.0),
                },
            ),
        ],
        deltas: {
            let mut x = vec![None; 20];
            let mut y = vec![None; 20];
            for (p, (dx, dy)) in [(0usize, (1i16, -1i16)), (3, (2, -2)), (9, (3, -3))] {
                x[p] = Some(dx);
                y[p] = Some(dy);
            }
            Deltas::Gvar(x.into_iter().zip(y).map(|(a, b)| a.zip(b)).collect())
        },
    };
    let axis_order = [wght(), wdth()];
    let kind = VariationKind::Gvar { num_points_in_glyph: 20 };
    let (header, data) = tv.compile(&axis_order, &no_sharing(), None).unwrap();
    let flags = u16::from_be_bytes([header[2], header[3]]);
    assert_eq!(flags & 0x4000, 0x4000, "wght's non-default region requires an intermediate tuple");
    let (decoded, _, _) = TupleVariation::decompile(&header, &data, &axis_order, kind, "gvar", &[], None).unwrap();
    assert_eq!(decoded, tv);
}

#[test]
fn compile_rejects_axis_missing_from_axis_order() {
    let tv = TupleVariation {
        axes: vec![(
            wght(),
            AxisRegion { start: F2Dot14::ZERO, peak: F2Dot14::from_f64(1.0), end: F2Dot14::from_f64(1.0) },
        )],
        deltas: Deltas::Cvar(vec![Some(1)]),
    };
    let axis_order = [wdth()];
    let err = tv.compile(&axis_order, &no_sharing(), None).unwrap_err();
    assert_eq!(err, CompileError::UnknownAxis(wght()));
}

#[test]
fn has_impact_reflects_whether_any_position_is_set() {
    let impactful = TupleVariation {
        axes: vec![],
        deltas: Deltas::Cvar(vec![Some(1)]),
    };
    let inert = TupleVariation {
        axes: vec![],
        deltas: Deltas::Cvar(vec![None]),
    };
    assert!(impactful.has_impact());
    assert!(!inert.has_impact());
}

#[test]
fn shared_tuple_table_is_consulted_when_peak_matches_and_reused_across_records() {
    // Two variations share the same wght=1.0 peak; the outer table assigns
    // it shared-tuple index 0, and both records reference it instead of
    // embedding their own copy.
    let axis_order = [wght()];
    let peak = [F2Dot14::from_f64(1.0)];
    let mut shared_coords = SharedCoordIndices::new();
    shared_coords.insert(tuple_variation::encode_peak(&peak), 0);
    let shared_tuples = vec![peak.to_vec()];

    let make = |v: i16| TupleVariation {
        axes: vec![(
            wght(),
            AxisRegion { start: F2Dot14::ZERO, peak: F2Dot14::from_f64(1.0), end: F2Dot14::from_f64(1.0) },
        )],
        deltas: Deltas::Cvar(vec![Some(v)]),
    };

    for v in [1i16, -1] {
        let tv = make(v);
        let (header, data) = tv.compile(&axis_order, &shared_coords, None).unwrap();
        assert_eq!(header.len(), 4, "no peak tuple embedded when a shared index matches");
        let (decoded, _, _) = TupleVariation::decompile(
            &header,
            &data,
            &axis_order,
            VariationKind::Cvar { num_entries: 1 },
            "cvar",
            &shared_tuples,
            None,
        )
        .unwrap();
        assert_eq!(decoded, tv);
    }
}

#[test]
fn shared_point_set_round_trips_without_private_points() {
    let tv = TupleVariation {
        axes: vec![],
        deltas: Deltas::Gvar(vec![Some((1, 1)), None, Some((3, 3)), None, Some((5, 5))]),
    };
    let shared_points = [0u16, 2, 4];
    let axis_order: [Tag; 0] = [];
    let kind = VariationKind::Gvar { num_points_in_glyph: 5 };

    let (header, data) = tv.compile(&axis_order, &no_sharing(), Some(&shared_points)).unwrap();
    let (decoded, _, _) =
        TupleVariation::decompile(&header, &data, &axis_order, kind, "gvar", &[], Some(&shared_points)).unwrap();
    assert_eq!(decoded, tv);
}
