//! Plain-text result table, one column set per hit kind.

use kvseek::models::{AdminUnit, Hit, HitKind};

fn opt(value: Option<u32>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

fn or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

pub fn headers(kind: HitKind) -> &'static [&'static str] {
    match kind {
        HitKind::Address => &["Adresse", "Objtype", "Kommune", "Gnr/Bnr", "Postnr", "Poststed"],
        HitKind::Property => &["Eiendom", "Objekt", "Gnr", "Bnr", "Fnr", "Snr", "TeigID", "Geom"],
        HitKind::County | HitKind::Municipality => &["Navn", "Nummer"],
        HitKind::PlaceName => &["Navn", "Type", "Kommune"],
    }
}

pub fn row(hit: &Hit) -> Vec<String> {
    let attrs = hit.attributes();

    match hit.kind() {
        HitKind::Address => vec![
            hit.label().to_string(),
            attrs.object_type.clone(),
            or(&attrs.municipality_name, &attrs.municipality_number).to_string(),
            attrs.property_ref.clone(),
            attrs.postal_code.clone(),
            attrs.postal_place.clone(),
        ],
        HitKind::Property => {
            let cadastre = attrs.cadastre.clone().unwrap_or_default();
            vec![
                or(&attrs.property_ref, hit.label()).to_string(),
                attrs.object_type.clone(),
                opt(cadastre.gnr),
                opt(cadastre.bnr),
                cadastre.fnr.unwrap_or(0).to_string(),
                cadastre.snr.unwrap_or(0).to_string(),
                cadastre.teig_id.map(|id| id.to_string()).unwrap_or_default(),
                cadastre.parcel_type,
            ]
        }
        HitKind::County => vec![
            or(&attrs.county_name, hit.label()).to_string(),
            attrs.county_number.clone(),
        ],
        HitKind::Municipality => vec![
            or(&attrs.municipality_name, hit.label()).to_string(),
            attrs.municipality_number.clone(),
        ],
        HitKind::PlaceName => vec![
            hit.label().to_string(),
            attrs.object_type.clone(),
            attrs.municipality_name.clone(),
        ],
    }
}

fn format_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Render rows under headers with columns padded to their widest cell.
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = format_line(headers, &widths);
    out.push('\n');
    out.push_str(&format_line(&rule, &widths));
    out.push('\n');
    for row in rows {
        out.push_str(&format_line(row, &widths));
        out.push('\n');
    }
    out
}

pub fn render_hits(kind: HitKind, hits: &[Hit]) -> String {
    let rows: Vec<Vec<String>> = hits.iter().map(row).collect();
    render(headers(kind), &rows)
}

pub fn render_units(units: &[AdminUnit]) -> String {
    let rows: Vec<Vec<String>> = units
        .iter()
        .map(|unit| vec![unit.name.clone(), unit.number.clone()])
        .collect();
    render(&["Navn", "Nummer"], &rows)
}
