use anyhow::Result;
use anywkt::read::{read_all, read_file, read_str, write_file, write_string,
                   ReadError};
use anywkt::settings::Limits;
use anywkt::value::{collection, coord, point, Geometry};
use std::path::Path;

#[test]
fn adapter_constructors() {
    assert_eq!(point(30.0, 10.0), Geometry::Point(coord(30.0, 10.0)));
    assert_eq!(Geometry::from(coord(30.0, 10.0)), point(30.0, 10.0));
    assert_eq!(collection(vec![]), Geometry::Collection(vec![]));
}

#[test]
fn keywords_are_case_insensitive() -> Result<()> {
    assert_eq!(read_str("point(1 2)")?, point(1.0, 2.0));
    assert_eq!(read_str("Point(1 2)")?, point(1.0, 2.0));
    assert_eq!(read_str("pOiNt(1 2)")?, point(1.0, 2.0));
    assert_eq!(read_str("multipoint empty")?,
               Geometry::MultiPoint(vec![]));
    Ok(())
}

#[test]
fn whitespace_is_insignificant_between_tokens() -> Result<()> {
    assert_eq!(read_str("  POINT \t ( 1 \n 2 ) ")?, point(1.0, 2.0));
    assert_eq!(read_str("LINESTRING(0 0\n,\n1 1)")?,
               Geometry::LineString(vec![coord(0.0, 0.0),
                                         coord(1.0, 1.0)]));
    Ok(())
}

#[test]
fn multipoint_member_forms() -> Result<()> {
    let expected = Geometry::MultiPoint(
        vec![coord(1.0, 2.0), coord(3.0, 4.0)]);
    assert_eq!(read_str("MULTIPOINT(1 2,3 4)")?, expected);
    assert_eq!(read_str("MULTIPOINT((1 2),(3 4))")?, expected);
    assert_eq!(read_str("MULTIPOINT((1 2),3 4)")?, expected);
    Ok(())
}

#[test]
fn writer_canonical_forms() {
    assert_eq!(write_string(&point(30.0, 10.0)), "POINT(30 10)");
    assert_eq!(write_string(&Geometry::LineString(vec![])),
               "LINESTRING EMPTY");
    assert_eq!(write_string(&Geometry::Polygon(vec![
        vec![coord(0.0, 0.0), coord(4.0, 0.0), coord(4.0, 4.0),
             coord(0.0, 4.0), coord(0.0, 0.0)],
    ])), "POLYGON((0 0,4 0,4 4,0 4,0 0))");
    // MULTIPOINT members are always written in the wrapped form
    assert_eq!(write_string(&Geometry::MultiPoint(
        vec![coord(1.0, 2.0), coord(3.0, 4.0)])),
               "MULTIPOINT((1 2),(3 4))");
    assert_eq!(write_string(&Geometry::Polygon(vec![])), "POLYGON EMPTY");
    assert_eq!(write_string(&Geometry::Collection(vec![])),
               "GEOMETRYCOLLECTION EMPTY");
}

#[test]
fn ring_is_written_as_a_one_ring_polygon() -> Result<()> {
    let ring = vec![coord(0.0, 0.0), coord(1.0, 0.0),
                    coord(1.0, 1.0), coord(0.0, 0.0)];
    let g = Geometry::Ring(ring.clone());
    let s = write_string(&g);
    assert_eq!(s, "POLYGON((0 0,1 0,1 1,0 0))");
    // and so it comes back as a polygon, not a ring
    assert_eq!(read_str(&s)?, Geometry::Polygon(vec![ring]));
    Ok(())
}

#[test]
fn structural_roundtrips() -> Result<()> {
    let polygon_with_hole = Geometry::Polygon(vec![
        vec![coord(0.0, 0.0), coord(10.0, 0.0), coord(10.0, 10.0),
             coord(0.0, 10.0), coord(0.0, 0.0)],
        vec![coord(1.0, 1.0), coord(2.0, 1.0), coord(2.0, 2.0),
             coord(1.0, 1.0)],
    ]);
    let geometries = vec![
        point(1.0, 2.0),
        Geometry::MultiPoint(vec![coord(-1.0, -2.0), coord(3.5, 4.5)]),
        Geometry::LineString(vec![coord(0.0, 0.0), coord(1.0, 1.0)]),
        Geometry::LineString(vec![]),
        polygon_with_hole.clone(),
        Geometry::MultiLineString(vec![
            vec![coord(0.0, 0.0), coord(1.0, 1.0)],
            vec![coord(2.0, 2.0), coord(3.0, 3.0)],
        ]),
        Geometry::MultiPolygon(vec![
            vec![vec![coord(0.0, 0.0), coord(1.0, 0.0), coord(1.0, 1.0),
                      coord(0.0, 0.0)]],
        ]),
        collection(vec![
            point(1.0, 2.0),
            collection(vec![polygon_with_hole]),
            Geometry::MultiPolygon(vec![]),
        ]),
        collection(vec![]),
    ];
    for g in &geometries {
        assert_eq!(&read_str(&write_string(g))?, g,
                   "roundtrip of {g}");
    }
    Ok(())
}

#[test]
fn numeric_roundtrips() -> Result<()> {
    let coords = vec![
        coord(0.1, -0.2),
        coord(1.0 / 3.0, 2.0 / 3.0),
        coord(123456.789, -0.000001),
        coord(2.5e10, 1e-10),
        coord(f64::MAX, f64::MIN_POSITIVE),
        coord(-0.0, 0.0),
    ];
    let g = Geometry::MultiPoint(coords);
    assert_eq!(read_str(&write_string(&g))?, g);
    Ok(())
}

#[test]
fn point_has_no_empty_form() {
    let e = read_str("POINT EMPTY").unwrap_err();
    assert!(matches!(e.err, ReadError::Unexpected { .. }));
    assert_eq!(format!("{e}"), "expected '(', got 'EMPTY' @1.6");
}

#[test]
fn empty_parens_are_not_the_empty_form() {
    let e = read_str("POLYGON()").unwrap_err();
    assert_eq!(format!("{e}"), "expected '(', got ')' @1.8");
}

#[test]
fn missing_latitude() {
    let e = read_str("POINT(1)").unwrap_err();
    assert_eq!(format!("{e}"), "expected a number, got ')' @1.7");
}

#[test]
fn error_positions_track_lines() {
    let e = read_str("POINT(1\n2,)").unwrap_err();
    assert_eq!(format!("{e}"), "expected ')', got ',' @2.1");
}

#[test]
fn trailing_input_is_an_error() {
    let e = read_str("POINT(1 2)POINT(3 4)").unwrap_err();
    assert!(matches!(e.err, ReadError::TrailingInput(_)));
    assert_eq!(format!("{e}"), "trailing 'POINT' after the geometry @1.10");
}

#[test]
fn unknown_geometry_keyword() {
    let e = read_str("CIRCULARSTRING(0 0,1 1,2 0)").unwrap_err();
    assert!(matches!(e.err, ReadError::UnsupportedGeometryType(_)));
    assert_eq!(format!("{e}"),
               "unsupported geometry type 'CIRCULARSTRING' @1.0");
}

#[test]
fn unrecognized_character() {
    let e = read_str("POINT(1;2)").unwrap_err();
    assert!(matches!(e.err, ReadError::Lex(_)));
    assert_eq!(format!("{e}"), "unrecognized character ';' @1.7");
}

#[test]
fn malformed_number() {
    let e = read_str("POINT(1.2.3 4)").unwrap_err();
    assert_eq!(format!("{e}"), "invalid numeric literal '1.2.3' @1.6");
}

#[test]
fn premature_end_of_input() {
    let e = read_str("LINESTRING(0 0,").unwrap_err();
    assert!(matches!(e.err, ReadError::PrematureEof(_)));
    assert_eq!(format!("{e}"), "expected a number, got end of input @1.14");
}

#[test]
fn multipoint_member_must_be_paren_or_number() {
    let e = read_str("MULTIPOINT(EMPTY)").unwrap_err();
    assert_eq!(format!("{e}"), "expected '(' or a number, got 'EMPTY' @1.11");
}

fn nested_collections(n: usize) -> String {
    let mut s = String::new();
    for _ in 0..n {
        s.push_str("GEOMETRYCOLLECTION(");
    }
    s.push_str("POINT(1 2)");
    for _ in 0..n {
        s.push(')');
    }
    s
}

#[test]
fn depth_fuel_bounds_collection_nesting() -> Result<()> {
    let limits = Limits { depth_fuel: 3 };
    read_all(nested_collections(3).as_bytes(), &limits)?;
    let e = read_all(nested_collections(4).as_bytes(), &limits)
        .unwrap_err();
    assert!(matches!(e.err, ReadError::NestingTooDeep));
    Ok(())
}

#[test]
fn default_depth_fuel() -> Result<()> {
    read_str(&nested_collections(500))?;
    let e = read_str(&nested_collections(501)).unwrap_err();
    assert!(matches!(e.err, ReadError::NestingTooDeep));
    Ok(())
}

#[test]
fn file_roundtrip() -> Result<()> {
    let path = std::env::temp_dir().join(
        format!("anywkt-codec-{}.wkt", std::process::id()));
    let g = read_str("GEOMETRYCOLLECTION(POINT(1 2),LINESTRING EMPTY)")?;
    write_file(&path, &g)?;
    let g2 = read_file(&path)?;
    std::fs::remove_file(&path)?;
    assert_eq!(g2, g);
    Ok(())
}

#[test]
fn read_file_reports_the_path() {
    let e = read_file(Path::new("/nonexistent/islands.wkt")).unwrap_err();
    assert!(format!("{e}").contains("islands.wkt"));
}
