//! Capability adapters against platform-shaped documents.

use gpf_common::GpfError;
use gpf_protocol::{find_server, Capabilities, TileSource};
use test_utils::fixtures::{TMS_CAPABILITIES, WMS_CAPABILITIES, WMTS_CAPABILITIES};

fn parse(server_id: &str, document: &str) -> Capabilities {
    let server = find_server(server_id).unwrap();
    Capabilities::parse(server, &server.url("https://geoapi.fr"), document.as_bytes()).unwrap()
}

#[test]
fn test_wms_layers_in_document_order() {
    let caps = parse("wms-r", WMS_CAPABILITIES);
    let names: Vec<String> = caps.layers().map(|l| l.name).collect();
    assert_eq!(names, ["SCAN1000_PYR-JPEG_WLD_WM", "ADMINEXPRESS-COG.LATEST"]);
}

#[test]
fn test_wms_tile_source() {
    let caps = parse("wms-r", WMS_CAPABILITIES);
    let layer = caps.layer("SCAN1000_PYR-JPEG_WLD_WM").unwrap();
    assert_eq!(layer.title, "Carte 1:1 000 000");
    assert_eq!(
        layer.tile_source,
        TileSource::Wms {
            url: "https://data.geopf.fr/wms-r/wms".to_string(),
            version: "1.3.0".to_string(),
            layers: "SCAN1000_PYR-JPEG_WLD_WM".to_string(),
            styles: "normal".to_string(),
            format: "image/png".to_string(),
            transparent: true,
        }
    );
}

#[test]
fn test_wms_explicit_style() {
    let caps = parse("wms-r", WMS_CAPABILITIES);
    let source = caps
        .tile_source("ADMINEXPRESS-COG.LATEST", Some("gris"))
        .unwrap();
    assert!(matches!(source, TileSource::Wms { ref styles, .. } if styles == "gris"));

    let err = caps
        .tile_source("ADMINEXPRESS-COG.LATEST", Some("rouge"))
        .unwrap_err();
    assert!(matches!(err, GpfError::StyleNotFound { .. }));
}

#[test]
fn test_wmts_zoom_bounds_from_limits() {
    let caps = parse("wmts", WMTS_CAPABILITIES);
    let layer = caps.layer("HR.ORTHOIMAGERY.ORTHOPHOTOS").unwrap();
    match layer.tile_source {
        TileSource::Wmts {
            min_zoom,
            max_zoom,
            ref format,
            ref style,
            ..
        } => {
            assert_eq!(min_zoom, Some(6));
            assert_eq!(max_zoom, Some(19));
            assert_eq!(format, "image/jpeg");
            assert_eq!(style, "normal");
        }
        ref other => panic!("unexpected tile source {:?}", other),
    }
    assert!(layer.styles["normal"].is_default);
}

#[test]
fn test_wmts_url_template() {
    let caps = parse("wmts", WMTS_CAPABILITIES);
    let source = caps.tile_source("PLAN-IGN_PNG", None).unwrap();
    assert_eq!(
        source.url(),
        "https://data.geopf.fr/wmts?service=WMTS&version=1.0.0&request=GetTile\
         &tilematrixSet=PM&height=256&width=256\
         &tilematrix={z}&tilecol={x}&tilerow={y}\
         &layer=PLAN-IGN_PNG&format=image/png&style=normal"
    );
}

#[test]
fn test_wmts_prefers_pseudo_mercator_link() {
    let caps = parse("wmts", WMTS_CAPABILITIES);
    let source = caps.tile_source("PLAN-IGN_PNG", Some("classique")).unwrap();
    match source {
        TileSource::Wmts {
            tile_matrix_set,
            min_zoom,
            max_zoom,
            style,
            ..
        } => {
            assert_eq!(tile_matrix_set, "PM");
            assert_eq!((min_zoom, max_zoom), (Some(0), Some(18)));
            assert_eq!(style, "classique");
        }
        other => panic!("unexpected tile source {:?}", other),
    }
}

#[test]
fn test_wmts_empty_limits_report_no_levels() {
    let caps = parse("wmts", WMTS_CAPABILITIES);
    let layer = caps.layer("EMPTY.LIMITS").unwrap();
    let json = serde_json::to_value(&layer.tile_source).unwrap();
    assert_eq!(json["protocol"], "WMTS");
    assert!(json.get("min_zoom").is_none());
    assert!(json.get("max_zoom").is_none());
}

#[test]
fn test_wmts_ignores_tile_matrix_set_definitions() {
    let caps = parse("wmts", WMTS_CAPABILITIES);
    assert_eq!(caps.len(), 3);
}

#[test]
fn test_tms_layers() {
    let caps = parse("tms", TMS_CAPABILITIES);
    let names: Vec<String> = caps.layers().map(|l| l.name).collect();
    assert_eq!(names, ["PLAN.IGN", "PCI"]);

    let layer = caps.layer("PCI").unwrap();
    assert_eq!(layer.title, "Parcellaire express");
    assert_eq!(layer.styles.len(), 1);
    assert_eq!(
        layer.tile_source,
        TileSource::Tms {
            url_template: "https://data.geopf.fr/tms/1.0.0/PCI/{z}/{x}/{y}.png".to_string(),
            extension: "png".to_string(),
        }
    );
}

#[test]
fn test_unknown_layer() {
    let caps = parse("tms", TMS_CAPABILITIES);
    assert!(matches!(
        caps.layer("ORTHO"),
        Err(GpfError::LayerNotFound { ref server, ref layer }) if server == "tms" && layer == "ORTHO"
    ));
}

#[test]
fn test_unreadable_document() {
    let server = find_server("wmts").unwrap();
    let err = Capabilities::parse(server, "https://data.geopf.fr/wmts", b"<html>oops")
        .err()
        .unwrap();
    assert!(matches!(err, GpfError::CapabilityParseFailed { ref server, .. } if server == "wmts"));
    assert_eq!(err.http_status_code(), 500);
}

#[test]
fn test_layer_json_shape() {
    let caps = parse("wms-r", WMS_CAPABILITIES);
    let layer = caps.layer("ADMINEXPRESS-COG.LATEST").unwrap();
    let json = serde_json::to_value(&layer).unwrap();
    assert_eq!(json["name"], "ADMINEXPRESS-COG.LATEST");
    assert_eq!(json["styles"]["gris"]["title"], "Style gris");
    assert_eq!(json["tile_source"]["protocol"], "WMS");
}
