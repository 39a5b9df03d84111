//! Mesh export as KML or GeoJSON.

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use rayon::prelude::*;
use serde_json::{json, Value};
use spherical::LatLng;
use tmg_common::{CellKey, TmgError, TmgResult};
use tracing::debug;

use crate::grid::Grid;
use crate::polygon::CellPolygon;

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";
const STYLE_ID: &str = "transGreenPoly";
const FOLDER_NAME: &str = "Triangular Mesh Grid";
const FOLDER_DESCRIPTION: &str = "Global triangular mesh grid coverage.";

/// Output format for a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeshFormat {
    #[default]
    Kml,
    GeoJson,
}

impl MeshFormat {
    /// Parse from string (e.g., "kml", "geojson").
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "kml" => Some(MeshFormat::Kml),
            "geojson" | "json" => Some(MeshFormat::GeoJson),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MeshFormat::Kml => "kml",
            MeshFormat::GeoJson => "geojson",
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            MeshFormat::Kml => "kml",
            MeshFormat::GeoJson => "geojson",
        }
    }
}

impl fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The polygons of a set of cells, ready to render.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub polygons: Vec<CellPolygon>,
}

impl Grid {
    /// Build the polygons of `keys` in parallel, keeping their order.
    pub fn mesh(&self, keys: &[CellKey]) -> TmgResult<Mesh> {
        let polygons = keys
            .par_iter()
            .map(|&key| self.polygon(key))
            .collect::<TmgResult<Vec<_>>>()?;
        debug!(cells = polygons.len(), "built mesh");
        Ok(Mesh { polygons })
    }

    /// Mesh of every cell of one rhomboid.
    pub fn rhomboid_mesh(&self, rhomboid: u8) -> TmgResult<Mesh> {
        self.mesh(&self.rhomboid_cells(rhomboid)?)
    }

    /// Mesh of the cells overlapping the box spanned by `from` and `to`.
    pub fn tile_mesh(&self, from: LatLng, to: LatLng, orientation: i32) -> TmgResult<Mesh> {
        self.mesh(&self.tile(from, to, orientation)?)
    }
}

impl Mesh {
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn render(&self, format: MeshFormat) -> TmgResult<String> {
        match format {
            MeshFormat::Kml => self.to_kml(),
            MeshFormat::GeoJson => Ok(serde_json::to_string_pretty(&self.to_geojson())?),
        }
    }

    /// Render and write to `path`.
    pub fn write_to(&self, format: MeshFormat, path: &Path) -> TmgResult<()> {
        let body = self.render(format)?;
        std::fs::write(path, body)?;
        debug!(path = %path.display(), %format, cells = self.len(), "wrote mesh");
        Ok(())
    }

    /// A KML 2.2 document with one placemark per cell, all sharing a
    /// translucent green polygon style.
    pub fn to_kml(&self) -> TmgResult<String> {
        let mut w = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        write(&mut w, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write(
            &mut w,
            Event::Start(BytesStart::new("kml").with_attributes([("xmlns", KML_NAMESPACE)])),
        )?;
        start(&mut w, "Document")?;
        text_element(&mut w, "name", FOLDER_NAME)?;

        write(
            &mut w,
            Event::Start(BytesStart::new("Style").with_attributes([("id", STYLE_ID)])),
        )?;
        start(&mut w, "LineStyle")?;
        text_element(&mut w, "width", "1.5")?;
        text_element(&mut w, "color", "11111111")?;
        end(&mut w, "LineStyle")?;
        start(&mut w, "PolyStyle")?;
        text_element(&mut w, "color", "7d00ff00")?;
        end(&mut w, "PolyStyle")?;
        end(&mut w, "Style")?;

        start(&mut w, "Folder")?;
        text_element(&mut w, "name", FOLDER_NAME)?;
        text_element(&mut w, "visibility", "1")?;
        text_element(&mut w, "description", FOLDER_DESCRIPTION)?;
        for polygon in &self.polygons {
            write_placemark(&mut w, polygon)?;
        }
        end(&mut w, "Folder")?;
        end(&mut w, "Document")?;
        end(&mut w, "kml")?;

        String::from_utf8(w.into_inner().into_inner()).map_err(|e| TmgError::export(e.to_string()))
    }

    /// A GeoJSON FeatureCollection with one Polygon feature per cell,
    /// carrying the cell key as a property.
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self
            .polygons
            .iter()
            .map(|p| {
                json!({
                    "type": "Feature",
                    "id": p.key,
                    "properties": {
                        "key": p.key,
                        "rhomboid": p.key.rhomboid,
                        "x": p.key.x,
                        "y": p.key.y,
                    },
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [p.to_lng_lat_ring()],
                    },
                })
            })
            .collect();
        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}

type KmlWriter = Writer<Cursor<Vec<u8>>>;

fn write_placemark(w: &mut KmlWriter, polygon: &CellPolygon) -> TmgResult<()> {
    let key = polygon.key.to_string();
    start(w, "Placemark")?;
    text_element(w, "name", "Cell")?;
    text_element(w, "visibility", "1")?;
    text_element(w, "styleUrl", &format!("#{}", STYLE_ID))?;
    start(w, "description")?;
    write(w, Event::CData(BytesCData::new(format!("{} polygon", key))))?;
    end(w, "description")?;
    write(
        w,
        Event::Start(BytesStart::new("Polygon").with_attributes([("id", key.as_str())])),
    )?;
    start(w, "outerBoundaryIs")?;
    start(w, "LinearRing")?;
    let coordinates = polygon
        .to_lng_lat_ring()
        .iter()
        .map(|[lng, lat]| format!("{},{},1", lng, lat))
        .collect::<Vec<_>>()
        .join(" ");
    text_element(w, "coordinates", &coordinates)?;
    end(w, "LinearRing")?;
    end(w, "outerBoundaryIs")?;
    end(w, "Polygon")?;
    end(w, "Placemark")
}

fn write(w: &mut KmlWriter, event: Event<'_>) -> TmgResult<()> {
    w.write_event(event).map_err(|e| TmgError::export(e.to_string()))
}

fn start(w: &mut KmlWriter, name: &str) -> TmgResult<()> {
    write(w, Event::Start(BytesStart::new(name)))
}

fn end(w: &mut KmlWriter, name: &str) -> TmgResult<()> {
    write(w, Event::End(BytesEnd::new(name)))
}

fn text_element(w: &mut KmlWriter, name: &str, text: &str) -> TmgResult<()> {
    start(w, name)?;
    write(w, Event::Text(BytesText::new(text)))?;
    end(w, name)
}
