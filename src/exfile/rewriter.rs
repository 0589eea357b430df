use crate::error::FormatError;
use crate::exfile::header::{ElementHeader, HeaderVariant};
use crate::exfile::scanner::{scan, Segment, SegmentKind};

/// Record appended to every element whose header declares a scale factor set
pub const SCALE_FACTORS_RECORD: &str = "Scale factors:\n-1\n";

/// Rewrite the 2D element block of a raw EX buffer so that each element is described by the
/// header of its variant.
///
/// `variants` holds one entry per 2D element, in element order. The 2D records must carry
/// identifiers `1..=variants.len()` in that order. A header is emitted ahead of the first
/// element and again whenever the variant changes. Everything outside the 2D element records is
/// copied as-is.
pub fn rewrite(buffer: &str, variants: &[HeaderVariant]) -> Result<String, FormatError> {
    let segments = scan(buffer);

    let shape_idx = segments
        .iter()
        .position(|s| s.kind == SegmentKind::Shape { dimension: 2 })
        .ok_or(FormatError::MissingSurfaceShape)?;

    let header_segment = segments
        .get(shape_idx + 1)
        .filter(|s| s.kind == SegmentKind::ElementHeader)
        .ok_or(FormatError::MissingElementHeader)?;
    let header = ElementHeader::parse(header_segment.text)?;

    let records_start = shape_idx + 2;
    let records: Vec<&Segment> = segments[records_start..]
        .iter()
        .take_while(|s| s.kind == SegmentKind::ElementRecord)
        .collect();
    check_records(&records, variants.len())?;

    let mut out = String::with_capacity(buffer.len() + buffer.len() / 4);
    for segment in segments[..=shape_idx].iter() {
        out.push_str(segment.text);
    }

    let mut current: Option<HeaderVariant> = None;
    for (record, variant) in records.iter().zip(variants.iter().copied()) {
        if current != Some(variant) {
            out.push_str(&header.render(variant));
            current = Some(variant);
        }

        out.push_str(record.text);
        if !record.text.ends_with('\n') {
            out.push('\n');
        }
        if variant.declares_scale_factors() {
            out.push_str(SCALE_FACTORS_RECORD);
        }
    }

    for segment in segments[records_start + records.len()..].iter() {
        out.push_str(segment.text);
    }

    log::debug!(
        "Rewrote {} element records with {} header changes",
        records.len(),
        variants.windows(2).filter(|w| w[0] != w[1]).count() + usize::from(!variants.is_empty())
    );

    Ok(out)
}

fn check_records(records: &[&Segment], expected: usize) -> Result<(), FormatError> {
    for (position, record) in records.iter().enumerate() {
        if record.element_identifier() != Some(position + 1) {
            return Err(FormatError::UnexpectedElement {
                position,
                expected: position + 1,
                found: record.first_line().trim().to_string(),
            });
        }
    }

    if records.len() != expected {
        return Err(FormatError::ElementCount {
            expected,
            found: records.len(),
        });
    }

    Ok(())
}
