use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::EPSG_WGS84;

fn epsg_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"(?i)EPSG[\s:/]*(?:0/)?(\d+)").expect("valid EPSG pattern"))
}

/// Extract an EPSG code from text such as `EPSG:25833`,
/// `urn:ogc:def:crs:EPSG::4258`, `.../def/crs/EPSG/0/25833` or a bare `25833`.
pub fn extract_epsg(text: &str) -> Option<u32> {
    let text = text.trim();

    if let Some(caps) = epsg_marker().captures(text) {
        return caps[1].parse().ok().filter(|code| *code > 0);
    }

    if text.to_ascii_uppercase().ends_with("CRS84") {
        return Some(EPSG_WGS84);
    }

    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        return text.parse().ok().filter(|code| *code > 0);
    }

    None
}

/// Read an EPSG code from a JSON string or number.
pub fn epsg_from_value(value: &Value) -> Option<u32> {
    match value {
        Value::String(s) => extract_epsg(s),
        Value::Number(n) => n
            .as_u64()
            .and_then(|code| u32::try_from(code).ok())
            .filter(|code| *code > 0),
        _ => None,
    }
}

/// Read the `crs` member of a GeoJSON object.
///
/// Handles `{"crs": {"properties": {"name": ...}}}`, `{"crs": {"name": ...}}`
/// and `{"crs": "EPSG:25833"}`; anything else yields `fallback`.
pub fn epsg_from_crs_block(data: &Value, fallback: u32) -> u32 {
    let crs = match data.get("crs") {
        Some(crs) => crs,
        None => return fallback,
    };

    let name = match crs {
        Value::Object(_) => crs
            .get("properties")
            .and_then(|props| props.get("name"))
            .filter(|name| !name.is_null())
            .or_else(|| crs.get("name")),
        other => Some(other),
    };

    name.and_then(epsg_from_value).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_marker_variants() {
        assert_eq!(extract_epsg("EPSG:25833"), Some(25833));
        assert_eq!(extract_epsg("urn:ogc:def:crs:EPSG::4258"), Some(4258));
        assert_eq!(extract_epsg("epsg:25832"), Some(25832));
        assert_eq!(extract_epsg("EPSG 4326"), Some(4326));
        assert_eq!(
            extract_epsg("http://www.opengis.net/def/crs/EPSG/0/25833"),
            Some(25833)
        );
    }

    #[test]
    fn test_extract_bare_and_invalid() {
        assert_eq!(extract_epsg("25833"), Some(25833));
        assert_eq!(extract_epsg("urn:ogc:def:crs:OGC:1.3:CRS84"), Some(4326));
        assert_eq!(extract_epsg("unknown"), None);
        assert_eq!(extract_epsg(""), None);
        assert_eq!(extract_epsg("EPSG:0"), None);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let code = extract_epsg("EPSG:25833").unwrap();
        assert_eq!(extract_epsg(&format!("EPSG:{}", code)), Some(code));
    }

    #[test]
    fn test_value_forms() {
        assert_eq!(epsg_from_value(&json!(25833)), Some(25833));
        assert_eq!(epsg_from_value(&json!("EPSG:4258")), Some(4258));
        assert_eq!(epsg_from_value(&json!(null)), None);
        assert_eq!(epsg_from_value(&json!(-5)), None);
    }

    #[test]
    fn test_crs_block() {
        let named = json!({"crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::4258"}}});
        assert_eq!(epsg_from_crs_block(&named, 25833), 4258);

        let flat = json!({"crs": {"name": "EPSG:25832"}});
        assert_eq!(epsg_from_crs_block(&flat, 25833), 25832);

        let string = json!({"crs": "EPSG:25835"});
        assert_eq!(epsg_from_crs_block(&string, 25833), 25835);

        assert_eq!(epsg_from_crs_block(&json!({}), 25833), 25833);
        assert_eq!(epsg_from_crs_block(&json!({"crs": {"properties": {}}}), 5973), 5973);
    }
}
