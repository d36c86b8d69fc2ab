//! GetCapabilities document of the proxy WMS.
//!
//! The proxy advertises one logical layer per threshold table. The service
//! URL is not known until a request arrives, so the document carries an
//! `{OnlineResource}` placeholder filled per request.

use quick_xml::escape::escape;

use gpf_common::selector::PROXY_LAYERS;
use gpf_common::ThresholdTable;

pub const ONLINE_RESOURCE_PLACEHOLDER: &str = "{OnlineResource}";

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMS_Capabilities version="1.3.0" xmlns="http://www.opengis.net/wms" xmlns:xlink="http://www.w3.org/1999/xlink">
  <Service>
    <Name>WMS</Name>
    <Title>Proxy WMS des cartes IGN</Title>
    <Abstract>Choisit la pyramide de cartes scannées adaptée à l'échelle demandée</Abstract>
    <OnlineResource xlink:type="simple" xlink:href="{OnlineResource}"/>
  </Service>
  <Capability>
    <Request>
      <GetCapabilities>
        <Format>text/xml</Format>
        <DCPType><HTTP><Get><OnlineResource xlink:type="simple" xlink:href="{OnlineResource}"/></Get></HTTP></DCPType>
      </GetCapabilities>
      <GetMap>
        <Format>image/png</Format>
        <Format>image/jpeg</Format>
        <DCPType><HTTP><Get><OnlineResource xlink:type="simple" xlink:href="{OnlineResource}"/></Get></HTTP></DCPType>
      </GetMap>
    </Request>
    <Exception>
      <Format>XML</Format>
    </Exception>
    <Layer>
      <Title>Proxy WMS</Title>
      <CRS>EPSG:3857</CRS>
      <EX_GeographicBoundingBox>
        <westBoundLongitude>-180</westBoundLongitude>
        <eastBoundLongitude>180</eastBoundLongitude>
        <southBoundLatitude>-85.0511</southBoundLatitude>
        <northBoundLatitude>85.0511</northBoundLatitude>
      </EX_GeographicBoundingBox>
"#;

const FOOTER: &str = r#"    </Layer>
  </Capability>
</WMS_Capabilities>
"#;

fn layer_xml(table: &ThresholdTable) -> String {
    format!(
        r#"      <Layer queryable="0" opaque="1">
        <Name>{name}</Name>
        <Title>{name}</Title>
        <CRS>EPSG:3857</CRS>
        <BoundingBox CRS="EPSG:3857" minx="-20037508.3427892" miny="-20037508.3427892" maxx="20037508.3427892" maxy="20037508.3427892"/>
        <MinScaleDenominator>{min}</MinScaleDenominator>
        <MaxScaleDenominator>{max}</MaxScaleDenominator>
      </Layer>
"#,
        name = escape(table.alias),
        min = table.min_scale(),
        max = table.max_scale(),
    )
}

/// Capabilities template with the `{OnlineResource}` placeholder.
pub fn capabilities_template() -> String {
    let mut xml = String::from(HEADER);
    for table in PROXY_LAYERS {
        xml.push_str(&layer_xml(table));
    }
    xml.push_str(FOOTER);
    xml
}

/// Capabilities document pointing clients at `online_resource`.
pub fn proxy_capabilities(online_resource: &str) -> String {
    capabilities_template().replace(ONLINE_RESOURCE_PLACEHOLDER, &escape(online_resource))
}

/// Online resource URL of the proxy as seen by the client:
/// `<scheme>://<host><path>?`.
pub fn online_resource(scheme: &str, host: &str, path: &str) -> String {
    format!("{}://{}{}?", scheme, host, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_replaced_everywhere() {
        let url = online_resource("https", "geoapi.fr", "/gpf/wms");
        let xml = proxy_capabilities(&url);
        assert!(!xml.contains(ONLINE_RESOURCE_PLACEHOLDER));
        assert_eq!(xml.matches("https://geoapi.fr/gpf/wms?").count(), 3);
    }

    #[test]
    fn test_advertises_cartes_ign() {
        let xml = capabilities_template();
        assert!(xml.contains("<Name>cartesIGN</Name>"));
        assert!(xml.contains("<MinScaleDenominator>2000</MinScaleDenominator>"));
        assert!(xml.contains("<MaxScaleDenominator>2000000</MaxScaleDenominator>"));
    }

    #[test]
    fn test_online_resource_is_escaped() {
        let xml = proxy_capabilities("http://h/wms?a=1&b=2");
        assert!(xml.contains("http://h/wms?a=1&amp;b=2"));
    }
}
