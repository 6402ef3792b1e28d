//! Dataset loaders: turn an external point source into [`RawPoint`]s.
//!
//! This is a collaborator, not core mining logic — it has no notion of
//! radius or prevalence. It only has to produce well-formed rows with
//! dense, first-seen-order ids; malformed rows are reported, never
//! silently dropped.

use std::io::Read;

use crate::error::{LoadError, LoadResult};
use crate::point_set::RawPoint;

/// Something that can be read into a flat list of [`RawPoint`]s.
pub trait PointSource {
    fn load(&mut self) -> LoadResult<Vec<RawPoint>>;
}

/// Reads `type,x,y` or `id,type,x,y` rows from a CSV-like reader. A
/// non-numeric first data line is treated as a header and skipped.
pub struct CsvPointSource<R> {
    reader: R,
}

impl<R: Read> CsvPointSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> PointSource for CsvPointSource<R> {
    fn load(&mut self) -> LoadResult<Vec<RawPoint>> {
        let mut contents = String::new();
        self.reader.read_to_string(&mut contents)?;

        let mut points = Vec::new();
        for (row, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let (type_name, x_str, y_str) = match fields.len() {
                3 => (fields[0], fields[1], fields[2]),
                4 => (fields[1], fields[2], fields[3]),
                n => {
                    return Err(LoadError::MalformedRow {
                        row,
                        reason: format!("expected 3 or 4 columns, got {n}"),
                    });
                }
            };

            let (x, y) = match (x_str.parse::<f64>(), y_str.parse::<f64>()) {
                (Ok(x), Ok(y)) => (x, y),
                _ if row == 0 => continue, // header row
                _ => {
                    return Err(LoadError::MalformedRow {
                        row,
                        reason: format!("non-numeric coordinates ({x_str:?}, {y_str:?})"),
                    });
                }
            };

            points.push(RawPoint::new(points.len() as u64, type_name, x, y));
        }

        Ok(points)
    }
}

/// Reads a GeoJSON `FeatureCollection` of `Point` features. The feature
/// type is read from a configurable property, `"type"` by default.
#[cfg(feature = "loaders")]
pub struct GeoJsonPointSource<R> {
    reader: R,
    type_property: String,
}

#[cfg(feature = "loaders")]
impl<R: Read> GeoJsonPointSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, type_property: "type".to_string() }
    }

    /// Overrides the GeoJSON property holding the feature type name.
    pub fn with_type_property(mut self, name: impl Into<String>) -> Self {
        self.type_property = name.into();
        self
    }
}

#[cfg(feature = "loaders")]
impl<R: Read> PointSource for GeoJsonPointSource<R> {
    fn load(&mut self) -> LoadResult<Vec<RawPoint>> {
        let mut contents = String::new();
        self.reader.read_to_string(&mut contents)?;
        let value: serde_json::Value =
            serde_json::from_str(&contents).map_err(|e| LoadError::MalformedGeoJson(e.to_string()))?;

        let features = value
            .get("features")
            .and_then(|f| f.as_array())
            .ok_or_else(|| LoadError::MalformedGeoJson("missing \"features\" array".to_string()))?;

        let mut points = Vec::with_capacity(features.len());
        for (index, feature) in features.iter().enumerate() {
            let coords = feature
                .pointer("/geometry/coordinates")
                .and_then(|c| c.as_array())
                .ok_or_else(|| LoadError::MalformedGeoJson(format!("feature {index} missing geometry.coordinates")))?;

            let x = coords
                .first()
                .and_then(|v| v.as_f64())
                .ok_or_else(|| LoadError::MalformedGeoJson(format!("feature {index} has a non-numeric x coordinate")))?;
            let y = coords
                .get(1)
                .and_then(|v| v.as_f64())
                .ok_or_else(|| LoadError::MalformedGeoJson(format!("feature {index} has a non-numeric y coordinate")))?;

            let type_name = feature
                .pointer(&format!("/properties/{}", self.type_property))
                .and_then(|v| v.as_str())
                .ok_or_else(|| LoadError::MissingTypeProperty { index, property: self.type_property.clone() })?;

            points.push(RawPoint::new(index as u64, type_name, x, y));
        }

        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_csv_rows_without_header() {
        let csv = "A,0.0,0.0\nB,1.0,1.0\n";
        let mut source = CsvPointSource::new(Cursor::new(csv));
        let points = source.load().unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].id, 0);
        assert_eq!(points[1].feature_type, "B");
    }

    #[test]
    fn skips_a_leading_header_row() {
        let csv = "type,x,y\nA,0.0,0.0\n";
        let mut source = CsvPointSource::new(Cursor::new(csv));
        let points = source.load().unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].feature_type, "A");
    }

    #[test]
    fn rejects_malformed_rows_past_the_header() {
        let csv = "A,0.0,0.0\nB,not-a-number,1.0\n";
        let mut source = CsvPointSource::new(Cursor::new(csv));
        assert!(matches!(source.load(), Err(LoadError::MalformedRow { row: 1, .. })));
    }

    #[cfg(feature = "loaders")]
    #[test]
    fn parses_geojson_point_features() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"type": "school"}, "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}},
                {"type": "Feature", "properties": {"type": "hospital"}, "geometry": {"type": "Point", "coordinates": [3.0, 4.0]}}
            ]
        }"#;
        let mut source = GeoJsonPointSource::new(Cursor::new(geojson));
        let points = source.load().unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].feature_type, "school");
        assert_eq!(points[1].x, 3.0);
    }

    #[cfg(feature = "loaders")]
    #[test]
    fn reports_missing_type_property() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}}
            ]
        }"#;
        let mut source = GeoJsonPointSource::new(Cursor::new(geojson));
        assert!(matches!(source.load(), Err(LoadError::MissingTypeProperty { index: 0, .. })));
    }
}
