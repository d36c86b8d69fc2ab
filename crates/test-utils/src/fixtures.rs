//! Capability documents shaped like the ones served by the geodata platform.
//!
//! Trimmed to a handful of layers but keeping the element nesting, namespaces
//! and sibling elements the adapters have to skip over.

/// The sample GetMap extent used across proxy tests (EPSG:3857).
pub const SAMPLE_BBOX: &str = "-626172,5948635,-313086,6261721";

/// WMS 1.3.0 capabilities: a root layer with three children, one of them
/// unnamed, one with two styles.
pub const WMS_CAPABILITIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMS_Capabilities xmlns="http://www.opengis.net/wms" xmlns:xlink="http://www.w3.org/1999/xlink" version="1.3.0">
  <Service>
    <Name>WMS</Name>
    <Title>Service WMS Raster</Title>
  </Service>
  <Capability>
    <Request>
      <GetCapabilities>
        <Format>text/xml</Format>
      </GetCapabilities>
      <GetMap>
        <Format>image/png</Format>
        <Format>image/jpeg</Format>
      </GetMap>
    </Request>
    <Exception>
      <Format>XML</Format>
    </Exception>
    <Layer>
      <Title>Couches raster</Title>
      <CRS>EPSG:3857</CRS>
      <Layer queryable="0">
        <Name>SCAN1000_PYR-JPEG_WLD_WM</Name>
        <Title>Carte 1:1 000 000</Title>
        <Abstract>Carte de France au millionieme</Abstract>
        <CRS>EPSG:3857</CRS>
        <BoundingBox CRS="EPSG:3857" minx="-20037508" miny="-20037508" maxx="20037508" maxy="20037508"/>
        <Style>
          <Name>normal</Name>
          <Title>Donnees brutes</Title>
        </Style>
        <MinScaleDenominator>500000</MinScaleDenominator>
      </Layer>
      <Layer queryable="1">
        <Name>ADMINEXPRESS-COG.LATEST</Name>
        <Title>ADMIN EXPRESS</Title>
        <Style>
          <Name>normal</Name>
          <Title>Style normal</Title>
        </Style>
        <Style>
          <Name>gris</Name>
          <Title>Style gris</Title>
        </Style>
      </Layer>
      <Layer>
        <Title>Groupe sans nom</Title>
      </Layer>
    </Layer>
  </Capability>
</WMS_Capabilities>
"#;

/// WMTS 1.0.0 capabilities with the `ows:` namespace prefix, three layers and
/// a tile matrix set definition after them.
pub const WMTS_CAPABILITIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Capabilities xmlns="http://www.opengis.net/wmts/1.0" xmlns:ows="http://www.opengis.net/ows/1.1" xmlns:xlink="http://www.w3.org/1999/xlink" version="1.0.0">
  <ows:ServiceIdentification>
    <ows:Title>Service WMTS</ows:Title>
    <ows:ServiceType>OGC WMTS</ows:ServiceType>
  </ows:ServiceIdentification>
  <Contents>
    <Layer>
      <ows:Title>Photographies aeriennes</ows:Title>
      <ows:Abstract>Ortho 20 cm</ows:Abstract>
      <ows:WGS84BoundingBox>
        <ows:LowerCorner>-178.18 -22.59</ows:LowerCorner>
        <ows:UpperCorner>167.96 51.09</ows:UpperCorner>
      </ows:WGS84BoundingBox>
      <ows:Identifier>HR.ORTHOIMAGERY.ORTHOPHOTOS</ows:Identifier>
      <Style isDefault="true">
        <ows:Title>Donnees Brutes</ows:Title>
        <ows:Identifier>normal</ows:Identifier>
      </Style>
      <Format>image/jpeg</Format>
      <TileMatrixSetLink>
        <TileMatrixSet>PM</TileMatrixSet>
        <TileMatrixSetLimits>
          <TileMatrixLimits>
            <TileMatrix>6</TileMatrix>
            <MinTileRow>20</MinTileRow>
            <MaxTileRow>26</MaxTileRow>
            <MinTileCol>28</MinTileCol>
            <MaxTileCol>36</MaxTileCol>
          </TileMatrixLimits>
          <TileMatrixLimits>
            <TileMatrix>19</TileMatrix>
            <MinTileRow>180000</MinTileRow>
            <MaxTileRow>190000</MaxTileRow>
            <MinTileCol>250000</MinTileCol>
            <MaxTileCol>270000</MaxTileCol>
          </TileMatrixLimits>
          <TileMatrixLimits>
            <TileMatrix>10</TileMatrix>
            <MinTileRow>300</MinTileRow>
            <MaxTileRow>400</MaxTileRow>
            <MinTileCol>450</MinTileCol>
            <MaxTileCol>560</MaxTileCol>
          </TileMatrixLimits>
        </TileMatrixSetLimits>
      </TileMatrixSetLink>
    </Layer>
    <Layer>
      <ows:Title>Plan IGN</ows:Title>
      <ows:Identifier>PLAN-IGN_PNG</ows:Identifier>
      <Style isDefault="false">
        <ows:Title>Classique</ows:Title>
        <ows:Identifier>classique</ows:Identifier>
      </Style>
      <Style isDefault="true">
        <ows:Title>Legende normale</ows:Title>
        <ows:Identifier>normal</ows:Identifier>
      </Style>
      <Format>image/png</Format>
      <TileMatrixSetLink>
        <TileMatrixSet>LAMB93</TileMatrixSet>
      </TileMatrixSetLink>
      <TileMatrixSetLink>
        <TileMatrixSet>PM</TileMatrixSet>
        <TileMatrixSetLimits>
          <TileMatrixLimits>
            <TileMatrix>0</TileMatrix>
          </TileMatrixLimits>
          <TileMatrixLimits>
            <TileMatrix>18</TileMatrix>
          </TileMatrixLimits>
        </TileMatrixSetLimits>
      </TileMatrixSetLink>
    </Layer>
    <Layer>
      <ows:Title>Couche sans niveaux</ows:Title>
      <ows:Identifier>EMPTY.LIMITS</ows:Identifier>
      <Style isDefault="true">
        <ows:Title>Normal</ows:Title>
        <ows:Identifier>normal</ows:Identifier>
      </Style>
      <Format>image/png</Format>
      <TileMatrixSetLink>
        <TileMatrixSet>PM</TileMatrixSet>
        <TileMatrixSetLimits>
        </TileMatrixSetLimits>
      </TileMatrixSetLink>
    </Layer>
    <TileMatrixSet>
      <ows:Identifier>PM</ows:Identifier>
      <ows:SupportedCRS>EPSG:3857</ows:SupportedCRS>
      <TileMatrix>
        <ows:Identifier>0</ows:Identifier>
        <ScaleDenominator>559082264.0287178958533332</ScaleDenominator>
        <TopLeftCorner>-20037508.3427892476 20037508.3427892476</TopLeftCorner>
        <TileWidth>256</TileWidth>
        <TileHeight>256</TileHeight>
        <MatrixWidth>1</MatrixWidth>
        <MatrixHeight>1</MatrixHeight>
      </TileMatrix>
    </TileMatrixSet>
  </Contents>
</Capabilities>
"#;

/// TMS 1.0.0 service document listing two tile maps.
pub const TMS_CAPABILITIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TileMapService version="1.0.0" services="https://data.geopf.fr/tms/">
  <Title>Service TMS</Title>
  <Abstract>Tuiles vectorielles et raster</Abstract>
  <TileMaps>
    <TileMap title="Plan IGN vecteur" srs="EPSG:3857" profile="global-mercator" extension="pbf" href="https://data.geopf.fr/tms/1.0.0/PLAN.IGN"/>
    <TileMap title="Parcellaire express" srs="EPSG:3857" profile="global-mercator" extension="png" href="https://data.geopf.fr/tms/1.0.0/PCI"/>
  </TileMaps>
</TileMapService>
"#;

/// Per-layer TMS TileMap resource.
pub const TMS_TILE_MAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TileMap version="1.0.0" tilemapservice="https://data.geopf.fr/tms/1.0.0/">
  <Title>PCI</Title>
  <SRS>EPSG:3857</SRS>
  <TileFormat width="256" height="256" mime-type="image/png" extension="png"/>
</TileMap>
"#;

/// Bytes standing in for a rendered PNG from the upstream WMS.
pub const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
